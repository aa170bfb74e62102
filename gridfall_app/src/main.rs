//! Standalone game binary.
//!
//! Usage:
//!   cargo run -p gridfall_app -- [--config game.json] [--seed 42] [--fps 60]
//!
//! Console commands:
//!   move +x|-x|+z|-z|down  - Nudge the falling piece
//!   rotate +x|-x|+y|-y|+z|-z - Quarter-turn about a world axis
//!   drop                   - Send the piece to the floor
//!   pause / reset          - Toggle pause, start over
//!   camera <mode>          - Select a camera manipulation mode
//!   drag <dx> <dy>         - Apply a drag to the camera
//!   show                   - Print the board
//!   quit                   - Exit

use std::env;
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::Context;
use gridfall_app::view;
use gridfall_core::command;
use gridfall_core::config::GameConfig;
use gridfall_core::event::GameEvent;
use gridfall_core::session::{GameSession, PieceModels};
use tokio::sync::mpsc;
use tracing::info;

struct Args {
    config_path: Option<String>,
    seed: Option<u64>,
    fps: u32,
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config_path: None,
        seed: None,
        fps: 60,
    };
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                parsed.config_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--seed" if i + 1 < args.len() => {
                parsed.seed = args[i + 1].parse().ok();
                i += 2;
            }
            "--fps" if i + 1 < args.len() => {
                parsed.fps = args[i + 1].parse().ok().filter(|f| *f > 0).unwrap_or(60);
                i += 2;
            }
            _ => i += 1,
        }
    }
    parsed
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args();
    let config = match &args.config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path))?;
            GameConfig::from_json_str(&text).context("parsing config")?
        }
        None => GameConfig::default(),
    };

    info!(seed = ?args.seed, fps = args.fps, "Starting game");
    let mut session = GameSession::new(config, PieceModels::sequential(), args.seed);

    // Stdin reader thread feeding the frame loop.
    let (input_tx, mut input_rx) = mpsc::channel::<String>(32);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            print!("] ");
            let _ = stdout.flush();
            let mut line = String::new();
            if stdin.lock().read_line(&mut line).is_err() {
                break;
            }
            let line = line.trim().to_string();
            if !line.is_empty() {
                if input_tx.blocking_send(line).is_err() {
                    break;
                }
            }
        }
    });

    println!("Type 'help' for commands, 'quit' to exit.");
    println!();

    let frame_interval = Duration::from_secs_f32(1.0 / args.fps as f32);
    let start = Instant::now();

    'frames: loop {
        let now_ms = start.elapsed().as_millis() as u64;

        while let Ok(line) = input_rx.try_recv() {
            match line.as_str() {
                "quit" => break 'frames,
                "show" => print!("{}", view::render(&session)),
                _ => match command::parse(&line) {
                    Ok(Some(cmd)) => {
                        for line in command::apply(&mut session, cmd, now_ms) {
                            println!("{}", line);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => println!("Error: {}", e),
                },
            }
        }

        session.advance(now_ms);

        for event in session.drain_events() {
            match event {
                GameEvent::PieceSpawned { kind } => {
                    info!(?kind, "piece spawned");
                }
                GameEvent::PieceLocked { kind, score } => {
                    info!(?kind, score, "piece locked");
                    print!("{}", view::render(&session));
                }
                GameEvent::LayersCleared { count } => {
                    info!(count, "layers cleared");
                    println!("cleared {} layer(s)", count);
                }
                GameEvent::GameOver { score } => {
                    info!(score, "game over");
                    println!("game over, final score {}", score);
                    println!("'reset' starts a new game, 'quit' exits");
                }
            }
        }

        tokio::time::sleep(frame_interval).await;
    }

    info!(score = session.score(), "Exiting");
    Ok(())
}
