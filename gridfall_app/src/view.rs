//! ASCII view of the game state.
//!
//! One slice per layer, top layer first, so the stack reads top-down the
//! way it looks in the container. `#` is a settled cube, `*` a cube of the
//! falling piece, `.` an empty cell.

use std::collections::HashSet;

use gridfall_core::session::{GamePhase, GameSession};

/// Renders the whole container plus a status line.
pub fn render(session: &GameSession) -> String {
    let container = session.container();
    let dims = container.dims();

    let mut falling: HashSet<(i64, i64, i64)> = HashSet::new();
    if session.phase() != GamePhase::GameOver {
        let matrix = session.piece().model_matrix();
        for &center in session.piece().kind.centers() {
            falling.insert(container.indices_of(center, &matrix));
        }
    }

    let mut out = String::new();
    for y in (0..dims.y).rev() {
        // Skip empty layers above the action to keep the printout short.
        let layer_active = (0..dims.x).any(|x| {
            (0..dims.z).any(|z| {
                container.get(x, y, z).is_some()
                    || falling.contains(&(x as i64, y as i64, z as i64))
            })
        });
        if !layer_active {
            continue;
        }

        out.push_str(&format!("y={}\n", y));
        for z in 0..dims.z {
            for x in 0..dims.x {
                let c = if falling.contains(&(x as i64, y as i64, z as i64)) {
                    '*'
                } else if container.get(x, y, z).is_some() {
                    '#'
                } else {
                    '.'
                };
                out.push(c);
            }
            out.push('\n');
        }
    }

    out.push_str(&format!(
        "score: {}  phase: {:?}  next: {:?}\n",
        session.score(),
        session.phase(),
        session.next_kind()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfall_core::config::GameConfig;
    use gridfall_core::session::PieceModels;

    #[test]
    fn view_shows_piece_and_score() {
        let mut session =
            GameSession::new(GameConfig::default(), PieceModels::sequential(), Some(1));
        session.drop_piece(0);

        let text = render(&session);
        assert!(text.contains('*'));
        assert!(text.contains("score: 0"));

        session.advance(1000);
        let text = render(&session);
        assert!(text.contains('#'));
        assert!(text.contains("score: 10"));
    }

    #[test]
    fn empty_layers_are_skipped() {
        let session =
            GameSession::new(GameConfig::default(), PieceModels::sequential(), Some(1));
        let text = render(&session);
        // Only layers the spawned piece touches are printed.
        assert!(!text.contains("y=0\n"));
    }
}
