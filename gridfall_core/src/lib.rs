//! `gridfall_core`
//!
//! Engine and game rules shared by the falling-piece game and the
//! tic-tac-toe board.
//!
//! Design goals:
//! - Deterministic and modular where practical.
//! - Clear separation of concerns (math, camera, grid, piece, session).
//! - Traits for abstraction and dependency injection.
//! - No `unsafe`.

pub mod board;
pub mod camera;
pub mod command;
pub mod config;
pub mod event;
pub mod grid;
pub mod math;
pub mod piece;
pub mod render;
pub mod session;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::camera::*;
    pub use crate::config::*;
    pub use crate::event::*;
    pub use crate::grid::*;
    pub use crate::math::*;
    pub use crate::piece::*;
    pub use crate::render::*;
    pub use crate::session::*;
}
