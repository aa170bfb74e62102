//! 3x3x3 tic-tac-toe board.
//!
//! The second game on the engine. Every cell starts occupied by an empty
//! marker model; placing a mark swaps the model and keeps the transform,
//! so the board never adds or removes cells after construction. Who may
//! place what, and who has won, is left to the players.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::{CameraMode, CameraRig};
use crate::config::GameConfig;
use crate::grid::{Cell, Container, GridDims};
use crate::math::{Mat4, Vec3};
use crate::render::{ModelHandle, RenderBackend};
use crate::session::ProjectionMode;

const BOARD_DIM: usize = 3;
/// World distance between neighboring cell centers.
const CELL_SPACING: f32 = 2.5;

/// What occupies a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    Empty,
    X,
    O,
    /// The winner highlight marker.
    W,
}

/// Model handles for each mark's mesh.
#[derive(Debug, Clone, Copy)]
pub struct MarkModels {
    pub empty: ModelHandle,
    pub x: ModelHandle,
    pub o: ModelHandle,
    pub w: ModelHandle,
}

impl MarkModels {
    /// Distinct placeholder handles, for headless runs and tests.
    pub fn sequential() -> Self {
        Self {
            empty: ModelHandle(0),
            x: ModelHandle(1),
            o: ModelHandle(2),
            w: ModelHandle(3),
        }
    }

    fn for_mark(&self, mark: Mark) -> ModelHandle {
        match mark {
            Mark::Empty => self.empty,
            Mark::X => self.x,
            Mark::O => self.o,
            Mark::W => self.w,
        }
    }
}

/// One tic-tac-toe game: the marker grid plus its camera.
pub struct Board {
    container: Container,
    camera: CameraRig,
    models: MarkModels,
    marks: [[[Mark; BOARD_DIM]; BOARD_DIM]; BOARD_DIM],
    projection_mode: ProjectionMode,
    projection: Mat4,
    config: GameConfig,
}

impl Board {
    pub fn new(config: GameConfig, models: MarkModels) -> Self {
        let mut container = Container::new(
            GridDims {
                x: BOARD_DIM,
                y: BOARD_DIM,
                z: BOARD_DIM,
            },
            Vec3::ZERO,
        );

        for x in 0..BOARD_DIM {
            for y in 0..BOARD_DIM {
                for z in 0..BOARD_DIM {
                    let mut transform = Mat4::identity();
                    transform.translate(
                        x as f32 * CELL_SPACING,
                        y as f32 * CELL_SPACING,
                        z as f32 * CELL_SPACING,
                    );
                    container.set_cell(
                        x,
                        y,
                        z,
                        Cell {
                            model: models.empty,
                            transform,
                        },
                    );
                }
            }
        }

        let mut camera = CameraRig::new(GameConfig::tic_tac_toe_camera());
        camera.set_mode(CameraMode::FreeOrbit);

        let mut board = Self {
            container,
            camera,
            models,
            marks: [[[Mark::Empty; BOARD_DIM]; BOARD_DIM]; BOARD_DIM],
            projection_mode: ProjectionMode::default(),
            projection: Mat4::identity(),
            config,
        };
        board.rebuild_projection();
        board
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn mark_at(&self, x: usize, y: usize, z: usize) -> Option<Mark> {
        if x >= BOARD_DIM || y >= BOARD_DIM || z >= BOARD_DIM {
            return None;
        }
        Some(self.marks[x][y][z])
    }

    /// Places a mark, overwriting whatever is there. Returns false when the
    /// cell is out of bounds.
    pub fn place(&mut self, x: usize, y: usize, z: usize, mark: Mark) -> bool {
        if x >= BOARD_DIM || y >= BOARD_DIM || z >= BOARD_DIM {
            debug!(x, y, z, "place out of bounds");
            return false;
        }
        self.marks[x][y][z] = mark;
        self.container.replace_model(x, y, z, self.models.for_mark(mark))
    }

    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.projection_mode = mode;
        self.rebuild_projection();
    }

    fn rebuild_projection(&mut self) {
        let p = &self.config.projection;
        match self.projection_mode {
            ProjectionMode::Orthographic => {
                let left = -p.ortho_half_width;
                let right = p.ortho_half_width;
                let top = (right - left) / p.aspect / 2.0;
                self.projection
                    .set_ortho(left, right, -top, top, p.near, p.far);
            }
            ProjectionMode::Perspective => {
                self.projection
                    .set_perspective(p.fovy_deg, p.aspect, p.near, p.far);
            }
        }
    }

    /// Issues one frame: all 27 cells, whatever marks they hold.
    pub fn draw(&self, backend: &mut dyn RenderBackend) {
        backend.begin_frame();

        let mut view_proj = self.projection;
        view_proj.multiply(&self.camera.view_matrix());
        backend.set_view_proj(view_proj);

        for (_, _, _, cell) in self.container.occupied() {
            backend.draw_model(cell.model, &cell.transform);
        }

        backend.end_frame();
    }
}
