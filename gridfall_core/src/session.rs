//! Game session state machine.
//!
//! An explicit session object owns the container, the camera rig, the
//! active piece, and the score; input dispatch and the frame loop hold a
//! reference to it instead of any ambient global. Moves are speculative:
//! update state, rebuild the placement transform, validate against the
//! container, and roll the state back if the placement is invalid.

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::camera::CameraRig;
use crate::config::GameConfig;
use crate::event::{EventQueue, GameEvent};
use crate::grid::Container;
use crate::math::{Mat4, Vec3};
use crate::piece::{Piece, PieceKind, Rotation};
use crate::render::{ModelHandle, RenderBackend};

/// Where the session is in its lifecycle. `GameOver` is terminal; only a
/// reset leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Falling,
    Paused,
    GameOver,
}

/// Projection selected for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectionMode {
    Orthographic,
    #[default]
    Perspective,
}

/// Model handles for the sub-cubes of each piece kind, supplied once by the
/// loading collaborator.
#[derive(Debug, Clone)]
pub struct PieceModels {
    handles: [[ModelHandle; 4]; 5],
}

impl PieceModels {
    pub fn new(handles: [[ModelHandle; 4]; 5]) -> Self {
        Self { handles }
    }

    /// Distinct placeholder handles, for headless runs and tests.
    pub fn sequential() -> Self {
        let mut handles = [[ModelHandle(0); 4]; 5];
        for (k, kind) in handles.iter_mut().enumerate() {
            for (c, handle) in kind.iter_mut().enumerate() {
                *handle = ModelHandle((k * 4 + c) as u32);
            }
        }
        Self { handles }
    }

    pub fn for_kind(&self, kind: PieceKind) -> &[ModelHandle] {
        let idx = PieceKind::ALL.iter().position(|k| *k == kind).unwrap_or(0);
        &self.handles[idx]
    }
}

/// One falling-piece game.
pub struct GameSession {
    config: GameConfig,
    container: Container,
    camera: CameraRig,
    models: PieceModels,

    piece: Piece,
    next_kind: PieceKind,
    phase: GamePhase,
    score: u32,

    projection_mode: ProjectionMode,
    projection: Mat4,

    /// Timestamp of the last gravity step; `None` until the first frame.
    last_gravity_ms: Option<u64>,

    events: EventQueue,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session. `seed` pins the piece sequence for tests; `None`
    /// draws from OS entropy.
    pub fn new(config: GameConfig, models: PieceModels, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let kind = PieceKind::sample(&mut rng);
        let next_kind = PieceKind::sample(&mut rng);
        let camera = CameraRig::new(config.camera);

        let mut session = Self {
            container: Container::new(config.grid_dims.into(), config.grid_offsets),
            piece: Piece::new(kind, config.spawn_location),
            camera,
            models,
            next_kind,
            phase: GamePhase::Falling,
            score: 0,
            projection_mode: ProjectionMode::default(),
            projection: Mat4::identity(),
            last_gravity_ms: None,
            events: EventQueue::default(),
            rng,
            config,
        };
        session.rebuild_projection();
        session.events.push(GameEvent::PieceSpawned { kind });
        session
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection_mode
    }

    /// Removes and returns pending events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Advances wall-clock time. At most one gravity step happens per call,
    /// and only once the tick interval has elapsed.
    pub fn advance(&mut self, now_ms: u64) {
        if self.phase != GamePhase::Falling {
            return;
        }

        let prev = *self.last_gravity_ms.get_or_insert(now_ms);
        if now_ms.saturating_sub(prev) < self.config.tick_ms {
            return;
        }

        if !self.translate(0.0, -1.0, 0.0) {
            self.lock_piece();
        }
        self.last_gravity_ms = Some(now_ms);
    }

    /// Freezes the active piece into the container, scores it, clears any
    /// full layers, and spawns the next piece. A failed commit means the
    /// piece came to rest sticking out of the container: game over.
    fn lock_piece(&mut self) {
        let kind = self.piece.kind;
        let matrix = self.piece.model_matrix();
        let committed = self.container.add_piece(
            self.models.for_kind(kind),
            kind.centers(),
            &matrix,
        );

        // The resting piece scores whether or not it fit.
        self.score += self.config.score_per_piece;

        if !committed {
            info!(score = self.score, "game over: piece rests above the container");
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            return;
        }

        self.events.push(GameEvent::PieceLocked {
            kind,
            score: self.score,
        });

        let cleared = self.container.clear_full_layers();
        if cleared > 0 {
            info!(cleared, "layers cleared");
            self.events.push(GameEvent::LayersCleared { count: cleared });
        }

        let kind = self.next_kind;
        self.piece = Piece::new(kind, self.config.spawn_location);
        self.next_kind = PieceKind::sample(&mut self.rng);
        debug!(?kind, next = ?self.next_kind, "piece spawned");
        self.events.push(GameEvent::PieceSpawned { kind });
    }

    /// Tries to move the active piece. Returns whether the move was kept;
    /// an invalid move is rolled back exactly and silently.
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) -> bool {
        if self.phase != GamePhase::Falling {
            return false;
        }

        self.piece.location = self.piece.location + Vec3::new(dx, dy, dz);

        let matrix = self.piece.model_matrix();
        if self
            .container
            .placement_is_valid(self.piece.kind.centers(), &matrix)
        {
            true
        } else {
            self.piece.location = self.piece.location - Vec3::new(dx, dy, dz);
            debug!(dx, dy, dz, "translate rejected");
            false
        }
    }

    /// Tries to rotate the active piece about a world axis through its
    /// origin. Invalid rotations pop back off the history.
    pub fn rotate(&mut self, angle_deg: f32, axis: Vec3) -> bool {
        if self.phase != GamePhase::Falling {
            return false;
        }

        self.piece.push_rotation(Rotation { angle_deg, axis });

        let matrix = self.piece.model_matrix();
        if self
            .container
            .placement_is_valid(self.piece.kind.centers(), &matrix)
        {
            true
        } else {
            self.piece.pop_rotation();
            debug!(angle_deg, ?axis, "rotate rejected");
            false
        }
    }

    /// Drives the piece straight down until it rests, then restarts the
    /// tick interval so it sits for one beat before locking.
    pub fn drop_piece(&mut self, now_ms: u64) {
        while self.translate(0.0, -1.0, 0.0) {}
        self.last_gravity_ms = Some(now_ms);
    }

    /// Toggles between `Falling` and `Paused`. No effect once the game is
    /// over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Falling => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Falling,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Starts a fresh game in place: empty container, zero score, default
    /// camera. The piece sequence continues from the session's RNG.
    pub fn reset(&mut self) {
        info!("session reset");
        self.container = Container::new(self.config.grid_dims.into(), self.config.grid_offsets);
        let kind = PieceKind::sample(&mut self.rng);
        self.piece = Piece::new(kind, self.config.spawn_location);
        self.next_kind = PieceKind::sample(&mut self.rng);
        self.phase = GamePhase::Falling;
        self.score = 0;
        self.last_gravity_ms = None;
        self.events = EventQueue::default();
        self.camera.reset();
        self.events.push(GameEvent::PieceSpawned { kind });
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
                let height = (right - left) / p.aspect;
                let top = height / 2.0;
                self.projection
                    .set_ortho(left, right, -top, top, p.near, p.far);
            }
            ProjectionMode::Perspective => {
                self.projection
                    .set_perspective(p.fovy_deg, p.aspect, p.near, p.far);
            }
        }
    }

    /// Issues one frame to the rendering collaborator: the settled cubes
    /// under their frozen transforms, then the falling piece.
    pub fn draw(&self, backend: &mut dyn RenderBackend) {
        backend.begin_frame();

        let mut view_proj = self.projection;
        view_proj.multiply(&self.camera.view_matrix());
        backend.set_view_proj(view_proj);

        for (_, _, _, cell) in self.container.occupied() {
            backend.draw_model(cell.model, &cell.transform);
        }

        if self.phase != GamePhase::GameOver {
            let matrix = self.piece.model_matrix();
            for &model in self.models.for_kind(self.piece.kind) {
                backend.draw_model(model, &matrix);
            }
        }

        backend.end_frame();
    }
}
