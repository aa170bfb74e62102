//! Command parsing and dispatch.
//!
//! The frontend feeds input here one line at a time; parsing is separate
//! from application so tests can exercise either half. Bad input is a
//! usage error, not a crash.

use anyhow::{bail, Result};

use crate::camera::CameraMode;
use crate::math::Vec3;
use crate::session::{GamePhase, GameSession, ProjectionMode};

/// One parsed input command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move { dx: f32, dy: f32, dz: f32 },
    Rotate { angle_deg: f32, axis: Vec3 },
    Drop,
    Pause,
    Reset,
    Camera(CameraMode),
    Drag { dx: f32, dy: f32 },
    Projection(ProjectionMode),
    Status,
    Score,
    Help,
}

const HELP: &[&str] = &[
    "move +x|-x|+z|-z|down   nudge the falling piece",
    "rotate +x|-x|+y|-y|+z|-z  quarter-turn about a world axis",
    "drop                    send the piece to the floor",
    "pause                   toggle pause",
    "reset                   start a fresh game",
    "camera <mode>           off pan tilt pedestal tongue crane dolly trunk arc cant orbit",
    "drag <dx> <dy>          apply a drag to the active camera mode",
    "projection ortho|persp  switch projection",
    "status                  print phase, score and piece",
    "score                   print the score",
    "help                    this text",
    "show                    print the board (handled by the frontend)",
    "quit                    exit (handled by the frontend)",
];

/// Parses one input line. Blank lines and `//` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let cmd = match tokens[0] {
        "move" => {
            if tokens.len() != 2 {
                bail!("usage: move +x|-x|+z|-z|down");
            }
            let (dx, dy, dz) = match tokens[1] {
                "+x" => (1.0, 0.0, 0.0),
                "-x" => (-1.0, 0.0, 0.0),
                "+z" => (0.0, 0.0, 1.0),
                "-z" => (0.0, 0.0, -1.0),
                "down" => (0.0, -1.0, 0.0),
                dir => bail!("unknown direction: {}", dir),
            };
            Command::Move { dx, dy, dz }
        }
        "rotate" => {
            if tokens.len() != 2 {
                bail!("usage: rotate +x|-x|+y|-y|+z|-z");
            }
            let (angle_deg, axis) = match tokens[1] {
                "+x" => (90.0, Vec3::new(1.0, 0.0, 0.0)),
                "-x" => (-90.0, Vec3::new(1.0, 0.0, 0.0)),
                "+y" => (90.0, Vec3::new(0.0, 1.0, 0.0)),
                "-y" => (-90.0, Vec3::new(0.0, 1.0, 0.0)),
                "+z" => (90.0, Vec3::new(0.0, 0.0, 1.0)),
                "-z" => (-90.0, Vec3::new(0.0, 0.0, 1.0)),
                dir => bail!("unknown axis: {}", dir),
            };
            Command::Rotate { angle_deg, axis }
        }
        "drop" => Command::Drop,
        "pause" => Command::Pause,
        "reset" => Command::Reset,
        "camera" => {
            if tokens.len() != 2 {
                bail!("usage: camera <mode>");
            }
            let mode = match tokens[1] {
                "off" => CameraMode::Off,
                "pan" => CameraMode::Pan,
                "tilt" => CameraMode::Tilt,
                "pedestal" => CameraMode::Pedestal,
                "tongue" => CameraMode::Tongue,
                "crane" => CameraMode::Crane,
                "dolly" => CameraMode::Dolly,
                "trunk" => CameraMode::Trunk,
                "arc" => CameraMode::Arc,
                "cant" => CameraMode::Cant,
                "orbit" => CameraMode::FreeOrbit,
                name => bail!("unknown camera mode: {}", name),
            };
            Command::Camera(mode)
        }
        "drag" => {
            if tokens.len() != 3 {
                bail!("usage: drag <dx> <dy>");
            }
            let dx: f32 = tokens[1].parse()?;
            let dy: f32 = tokens[2].parse()?;
            Command::Drag { dx, dy }
        }
        "projection" => {
            if tokens.len() != 2 {
                bail!("usage: projection ortho|persp");
            }
            match tokens[1] {
                "ortho" => Command::Projection(ProjectionMode::Orthographic),
                "persp" => Command::Projection(ProjectionMode::Perspective),
                name => bail!("unknown projection: {}", name),
            }
        }
        "status" => Command::Status,
        "score" => Command::Score,
        "help" => Command::Help,
        name => bail!("unknown command: {}", name),
    };
    Ok(Some(cmd))
}

/// Applies a command to the session. Returns lines to show the player.
pub fn apply(session: &mut GameSession, cmd: Command, now_ms: u64) -> Vec<String> {
    let mut out = Vec::new();
    match cmd {
        Command::Move { dx, dy, dz } => {
            if !session.translate(dx, dy, dz) {
                out.push("blocked".to_string());
            }
        }
        Command::Rotate { angle_deg, axis } => {
            if !session.rotate(angle_deg, axis) {
                out.push("blocked".to_string());
            }
        }
        Command::Drop => session.drop_piece(now_ms),
        Command::Pause => {
            session.toggle_pause();
            out.push(format!("{:?}", session.phase()).to_lowercase());
        }
        Command::Reset => {
            session.reset();
            out.push("new game".to_string());
        }
        Command::Camera(mode) => {
            session.camera_mut().set_mode(mode);
            out.push(format!("camera: {:?}", mode).to_lowercase());
        }
        Command::Drag { dx, dy } => session.camera_mut().drag(dx, dy),
        Command::Projection(mode) => {
            session.set_projection_mode(mode);
            out.push(format!("projection: {:?}", mode).to_lowercase());
        }
        Command::Status => {
            out.push(format!(
                "phase: {:?}  score: {}  piece: {:?}  next: {:?}",
                session.phase(),
                session.score(),
                session.piece().kind,
                session.next_kind()
            ));
            if session.phase() == GamePhase::GameOver {
                out.push("game over".to_string());
            }
        }
        Command::Score => out.push(format!("score: {}", session.score())),
        Command::Help => out.extend(HELP.iter().map(|s| s.to_string())),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::session::PieceModels;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default(), PieceModels::sequential(), Some(3))
    }

    #[test]
    fn parse_move_directions() {
        assert_eq!(
            parse("move +x").unwrap(),
            Some(Command::Move {
                dx: 1.0,
                dy: 0.0,
                dz: 0.0
            })
        );
        assert_eq!(
            parse("move down").unwrap(),
            Some(Command::Move {
                dx: 0.0,
                dy: -1.0,
                dz: 0.0
            })
        );
        assert!(parse("move up").is_err());
        assert!(parse("move").is_err());
    }

    #[test]
    fn parse_skips_blank_and_comments() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("// camera pan").unwrap(), None);
    }

    #[test]
    fn parse_rejects_unknown_command() {
        assert!(parse("teleport 1 2 3").is_err());
        assert!(parse("camera zoom").is_err());
        assert!(parse("drag 1").is_err());
    }

    #[test]
    fn apply_moves_the_piece() {
        let mut s = session();
        let x0 = s.piece().location.x;
        let out = apply(&mut s, parse("move +x").unwrap().unwrap(), 0);
        assert!(out.is_empty());
        assert_eq!(s.piece().location.x, x0 + 1.0);
    }

    #[test]
    fn apply_reports_blocked_moves() {
        let mut s = session();
        while s.translate(1.0, 0.0, 0.0) {}
        let out = apply(&mut s, Command::Move { dx: 1.0, dy: 0.0, dz: 0.0 }, 0);
        assert_eq!(out, vec!["blocked".to_string()]);
    }

    #[test]
    fn apply_switches_camera_mode() {
        let mut s = session();
        apply(&mut s, parse("camera arc").unwrap().unwrap(), 0);
        assert_eq!(s.camera().mode(), CameraMode::Arc);
        apply(&mut s, parse("camera orbit").unwrap().unwrap(), 0);
        assert_eq!(s.camera().mode(), CameraMode::FreeOrbit);
    }

    #[test]
    fn help_lists_the_frontend_commands_too() {
        let mut s = session();
        let out = apply(&mut s, Command::Help, 0);
        assert!(out.iter().any(|l| l.starts_with("show")));
        assert!(out.iter().any(|l| l.starts_with("quit")));
    }

    #[test]
    fn apply_drop_then_status() {
        let mut s = session();
        apply(&mut s, Command::Drop, 1000);
        s.advance(2000);
        let out = apply(&mut s, Command::Status, 2000);
        assert!(out[0].contains("score: 10"));
    }
}
