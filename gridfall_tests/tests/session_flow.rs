//! Full game-flow integration tests driven through the public session and
//! command APIs with seeded RNG.

use gridfall_core::command::{self, Command};
use gridfall_core::config::GameConfig;
use gridfall_core::event::GameEvent;
use gridfall_core::math::Vec3;
use gridfall_core::piece::PieceKind;
use gridfall_core::session::{GamePhase, GameSession, PieceModels};

fn session_with(config: GameConfig, seed: u64) -> GameSession {
    gridfall_tests::init_tracing();
    GameSession::new(config, PieceModels::sequential(), Some(seed))
}

/// Finds a seed whose first piece has the given kind. Sampling is uniform
/// over five kinds, so a handful of probes always suffices.
fn seeded_with_first_piece(config: GameConfig, kind: PieceKind) -> GameSession {
    for seed in 0..64 {
        let session = session_with(config.clone(), seed);
        if session.piece().kind == kind {
            return session;
        }
    }
    unreachable!("no seed in 0..64 produced {:?}", kind);
}

/// Pieces fall under gravity, lock, and score, with nothing but time input.
#[test]
fn pieces_fall_lock_and_score() {
    let mut session = session_with(GameConfig::default(), 11);
    session.drain_events();

    let mut locks = 0;
    for tick in 1..=60u64 {
        session.advance(tick * 1000);
        for event in session.drain_events() {
            if let GameEvent::PieceLocked { score, .. } = event {
                locks += 1;
                assert_eq!(score, locks * 10);
            }
        }
    }

    assert!(locks >= 3, "expected several locks in 60 ticks, got {locks}");
    assert_eq!(session.phase(), GamePhase::Falling);
    assert_eq!(session.score(), locks * 10);
    // Spawn-column stacking never fills a 7x7 layer, so every cube stays.
    assert_eq!(session.container().occupied_count(), locks as usize * 4);
}

/// A dropped square fills the whole layer of a 2x2 footprint container and
/// the layer clears, reported through the event queue.
#[test]
fn full_layer_clears_and_reports() {
    let config = GameConfig {
        grid_dims: (2, 4, 2),
        grid_offsets: Vec3::new(0.0, -0.5, 0.0),
        spawn_location: Vec3::new(0.0, 4.5, 0.0),
        ..GameConfig::default()
    };
    let mut session = seeded_with_first_piece(config, PieceKind::Square);
    session.drain_events();

    session.drop_piece(0);
    session.advance(1000);

    let events = session.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::PieceLocked { score: 10, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::LayersCleared { count: 1 })));
    assert_eq!(session.container().occupied_count(), 0);
    assert_eq!(session.score(), 10);
    assert_eq!(session.phase(), GamePhase::Falling);
}

/// A dropped piece rests on the floor for one full tick interval before it
/// locks.
#[test]
fn drop_rests_for_one_interval_before_locking() {
    let mut session = session_with(GameConfig::default(), 5);

    session.drop_piece(3000);
    assert_eq!(session.container().occupied_count(), 0);

    session.advance(3999);
    assert_eq!(session.container().occupied_count(), 0);

    session.advance(4000);
    assert_eq!(session.container().occupied_count(), 4);
}

/// The whole input path: parsed drop commands stack pieces until the game
/// ends, and the terminal state reports through `status`.
#[test]
fn stacked_drops_reach_game_over_through_commands() {
    let mut session = session_with(GameConfig::default(), 2);
    let drop = command::parse("drop").unwrap().unwrap();

    let mut now = 0;
    for _ in 0..100 {
        if session.phase() == GamePhase::GameOver {
            break;
        }
        command::apply(&mut session, drop, now);
        now += 1000;
        session.advance(now);
    }

    assert_eq!(session.phase(), GamePhase::GameOver);
    let out = command::apply(&mut session, Command::Status, now);
    assert!(out.iter().any(|l| l == "game over"));

    // One terminal event, then silence.
    let game_overs = session
        .drain_events()
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);

    session.advance(now + 50_000);
    assert!(session.drain_events().is_empty());
}

/// Config overrides loaded from JSON flow through to the tick cadence.
#[test]
fn json_config_overrides_tick_cadence() -> anyhow::Result<()> {
    let config = GameConfig::from_json_str(r#"{ "tick_ms": 100 }"#)?;
    assert_eq!(config.grid_dims, (7, 14, 7));

    let mut session = GameSession::new(config, PieceModels::sequential(), Some(9));
    let y0 = session.piece().location.y;

    session.advance(0);
    session.advance(99);
    assert_eq!(session.piece().location.y, y0);
    session.advance(100);
    assert_eq!(session.piece().location.y, y0 - 1.0);
    Ok(())
}

/// Moves and rotations rejected at the walls leave the piece exactly where
/// it was, across a long mixed sequence.
#[test]
fn rejected_inputs_never_corrupt_state() {
    let mut session = session_with(GameConfig::default(), 17);

    for i in 0..200 {
        let before = session.piece().model_matrix();
        let kept = match i % 4 {
            0 => session.translate(3.0, 0.0, 0.0),
            1 => session.translate(0.0, 0.0, -3.0),
            2 => session.rotate(90.0, Vec3::new(0.0, 1.0, 0.0)),
            _ => session.rotate(-90.0, Vec3::new(1.0, 0.0, 0.0)),
        };
        if !kept {
            assert_eq!(session.piece().model_matrix(), before);
        }
    }
    assert_eq!(session.phase(), GamePhase::Falling);
}
