//! Smoke tests: long runs through the full surface without panicking.

use gridfall_core::board::{Board, Mark, MarkModels};
use gridfall_core::camera::CameraMode;
use gridfall_core::config::GameConfig;
use gridfall_core::render::NullRenderer;
use gridfall_core::session::{GamePhase, GameSession, PieceModels};
use gridfall_app::view;

/// A session survives minutes of frames with mixed input, drawing every
/// frame.
#[test]
fn session_runs_many_frames() {
    gridfall_tests::init_tracing();

    let mut session =
        GameSession::new(GameConfig::default(), PieceModels::sequential(), Some(42));
    let mut renderer = NullRenderer::default();

    let modes = [
        CameraMode::Pan,
        CameraMode::Tilt,
        CameraMode::Arc,
        CameraMode::Dolly,
        CameraMode::FreeOrbit,
    ];

    let mut now = 0u64;
    for frame in 0..10_000u64 {
        now += 16;
        session.advance(now);

        match frame % 97 {
            0 => {
                session.translate(1.0, 0.0, 0.0);
            }
            13 => {
                session.rotate(90.0, gridfall_core::math::Vec3::Y);
            }
            31 => {
                let mode = modes[(frame / 97) as usize % modes.len()];
                session.camera_mut().set_mode(mode);
            }
            47 => session.camera_mut().drag(5.0, -3.0),
            71 => session.drop_piece(now),
            _ => {}
        }

        session.draw(&mut renderer);
        session.drain_events();

        if session.phase() == GamePhase::GameOver {
            session.reset();
        }
    }

    assert_eq!(renderer.frames, 10_000);
    // The view renders whatever state the run ended in.
    let text = view::render(&session);
    assert!(text.contains("score:"));
}

/// The tic-tac-toe board survives a full game's worth of marks and camera
/// orbits.
#[test]
fn board_runs_a_full_game() {
    let mut board = Board::new(GameConfig::default(), MarkModels::sequential());
    let mut renderer = NullRenderer::default();

    let mut turn = 0;
    for x in 0..3 {
        for y in 0..3 {
            for z in 0..3 {
                let mark = if turn % 2 == 0 { Mark::X } else { Mark::O };
                assert!(board.place(x, y, z, mark));
                board.camera_mut().drag(3.0, 2.0);
                board.draw(&mut renderer);
                turn += 1;
            }
        }
    }

    assert!(board.place(0, 0, 0, Mark::W));
    board.draw(&mut renderer);
    assert_eq!(renderer.frames, 28);
    assert_eq!(renderer.draws.len(), 27);
}
