//! Configuration system.
//!
//! Loads game configuration from JSON strings/files (file IO left to app).

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Camera starting state and drag sensitivity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub at: Vec3,
    pub up: Vec3,
    /// Degrees of rotation per pixel of drag.
    #[serde(default = "default_rotate_angle")]
    pub rotate_angle: f32,
    /// World units of translation per pixel of drag.
    #[serde(default = "default_offset_camera")]
    pub offset_camera: f32,
    /// Arm length of the boom pivot used by tongue/crane moves.
    #[serde(default = "default_boom_length")]
    pub boom_length: f32,
}

fn default_rotate_angle() -> f32 {
    0.1
}

fn default_offset_camera() -> f32 {
    0.1
}

fn default_boom_length() -> f32 {
    20.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(25.0, 20.0, 22.0),
            at: Vec3::new(0.0, 5.0, 0.0),
            up: Vec3::Y,
            rotate_angle: default_rotate_angle(),
            offset_camera: default_offset_camera(),
            boom_length: default_boom_length(),
        }
    }
}

/// Projection parameters shared by both projection modes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees (perspective mode).
    pub fovy_deg: f32,
    /// Half of the horizontal extent (orthographic mode).
    pub ortho_half_width: f32,
    pub near: f32,
    pub far: f32,
    /// Canvas width / height.
    pub aspect: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fovy_deg: 30.0,
            ortho_half_width: 6.0,
            near: 1.0,
            far: 150.0,
            aspect: 1.0,
        }
    }
}

/// Root configuration for a falling-piece game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Container cell counts along x, y, z.
    #[serde(default = "default_grid_dims")]
    pub grid_dims: (usize, usize, usize),
    /// Added to a world-space cube center to produce array indices.
    #[serde(default = "default_grid_offsets")]
    pub grid_offsets: Vec3,
    /// Where a new piece appears, in world space.
    #[serde(default = "default_spawn_location")]
    pub spawn_location: Vec3,
    /// Milliseconds between gravity steps.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Points awarded per committed piece.
    #[serde(default = "default_score_per_piece")]
    pub score_per_piece: u32,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
}

// The 7x14x7 container is centered at the origin on x/z and sits entirely
// above y = 0; cube centers have half-integer heights.
fn default_grid_dims() -> (usize, usize, usize) {
    (7, 14, 7)
}

fn default_grid_offsets() -> Vec3 {
    Vec3::new(3.0, -0.5, 3.0)
}

fn default_spawn_location() -> Vec3 {
    Vec3::new(0.0, 14.5, 0.0)
}

fn default_tick_ms() -> u64 {
    1000
}

fn default_score_per_piece() -> u32 {
    10
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_dims: default_grid_dims(),
            grid_offsets: default_grid_offsets(),
            spawn_location: default_spawn_location(),
            tick_ms: default_tick_ms(),
            score_per_piece: default_score_per_piece(),
            camera: CameraConfig::default(),
            projection: ProjectionConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Camera preset used by the tic-tac-toe board: a closer orbit with a
    /// coarser rotation step.
    pub fn tic_tac_toe_camera() -> CameraConfig {
        CameraConfig {
            eye: Vec3::new(19.5, 19.5, 19.5),
            at: Vec3::new(1.0, 2.0, 0.0),
            up: Vec3::Y,
            rotate_angle: 0.3,
            offset_camera: 0.1,
            boom_length: 20.0,
        }
    }
}
