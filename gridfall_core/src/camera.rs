//! Virtual camera rig.
//!
//! One rig serves both games. It keeps the authoritative `eye`/`at`/`up`
//! state and exposes the drag-driven manipulations (pan, tilt, pedestal,
//! tongue, crane, dolly, trunk, arc, cant). Every manipulation re-derives
//! the orthonormal camera basis `(u, v, n)` from the current state before
//! touching anything, so the basis is never stale.
//!
//! Rotating moves pivot either at the eye (pan/tilt: the reversed view
//! vector is rotated and `at` is re-derived at the original distance) or at
//! `at` (arc moves re-derive the eye). The boom moves (tongue/crane) pivot
//! around an anchor point a fixed arm length away from the eye.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CameraConfig;
use crate::math::{Mat4, Vec3};

/// Which manipulation a mouse drag is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraMode {
    #[default]
    Off,
    Pan,
    Tilt,
    Pedestal,
    Tongue,
    Crane,
    Dolly,
    Trunk,
    Arc,
    Cant,
    /// Composite orbit used by the tic-tac-toe board: one drag arcs both
    /// vertically and horizontally.
    FreeOrbit,
}

/// Drag-driven virtual camera.
#[derive(Debug, Clone)]
pub struct CameraRig {
    eye: Vec3,
    at: Vec3,
    up: Vec3,

    eye_default: Vec3,
    at_default: Vec3,
    up_default: Vec3,

    rotate_angle: f32,
    offset_camera: f32,
    boom_length: f32,

    mode: CameraMode,
    boom_angle: f32,
    boom_base: Vec3,

    view: Mat4,
}

impl CameraRig {
    pub fn new(cfg: CameraConfig) -> Self {
        let mut rig = Self {
            eye: cfg.eye,
            at: cfg.at,
            up: cfg.up,
            eye_default: cfg.eye,
            at_default: cfg.at,
            up_default: cfg.up,
            rotate_angle: cfg.rotate_angle,
            offset_camera: cfg.offset_camera,
            boom_length: cfg.boom_length,
            mode: CameraMode::Off,
            boom_angle: 0.0,
            boom_base: Vec3::ZERO,
            view: Mat4::identity(),
        };
        rig.update_view();
        rig
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn at(&self) -> Vec3 {
        self.at
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Binds a manipulation to subsequent drags. Selecting a boom move
    /// re-anchors the boom base at the current camera state.
    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
        if matches!(mode, CameraMode::Tongue | CameraMode::Crane) {
            self.compute_boom_base();
        }
    }

    /// Applies a drag of `(dx, dy)` pixels under the current mode.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        match self.mode {
            CameraMode::Off => {}
            CameraMode::Pan => self.pan(dx, dy),
            CameraMode::Tilt => self.tilt(dx, dy),
            CameraMode::Pedestal => self.pedestal(dx, dy),
            CameraMode::Tongue => self.tongue(dx, dy),
            CameraMode::Crane => self.crane(dx, dy),
            CameraMode::Dolly => {
                self.dolly(dx, dy);
            }
            CameraMode::Trunk => self.trunk(dx, dy),
            CameraMode::Arc => self.arc(dx, dy),
            CameraMode::Cant => self.cant(dx, dy),
            CameraMode::FreeOrbit => {
                self.arc_vertical(dx, dy);
                self.arc_horizontal(dx, dy);
            }
        }
    }

    /// Restores the default view and zeroes the accumulated boom angle.
    pub fn reset(&mut self) {
        self.eye = self.eye_default;
        self.at = self.at_default;
        self.up = self.up_default;
        self.boom_angle = 0.0;
        self.compute_boom_base();
        self.update_view();
    }

    /// Derives the orthonormal camera basis from `eye`, `at`, `up`:
    /// `n` points from the target back toward the eye, `u` right, `v` up.
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let n = (self.eye - self.at).normalize();
        let u = self.up.cross(n).normalize();
        let v = n.cross(u).normalize();
        (u, v, n)
    }

    fn update_view(&mut self) {
        self.view.set_look_at(self.eye, self.at, self.up);
    }

    /// Rotates the view left/right about the eye.
    pub fn pan(&mut self, dx: f32, _dy: f32) {
        let (_, v, n) = self.basis();
        let angle = self.rotate_angle * dx;

        let m = Mat4::rotation(angle, v.x, v.y, v.z);
        let n_new = m.transform_direction(-n);

        let dist = self.eye.distance(self.at);
        self.at = self.eye + n_new.scale(dist);
        self.update_view();
    }

    /// Rotates the view up/down about the eye.
    pub fn tilt(&mut self, _dx: f32, dy: f32) {
        let (u, _, n) = self.basis();
        let angle = self.rotate_angle * dy;

        let m = Mat4::rotation(angle, u.x, u.y, u.z);
        let n_new = m.transform_direction(-n);

        let dist = self.eye.distance(self.at);
        self.at = self.eye + n_new.scale(dist);
        self.update_view();
    }

    /// Raises or lowers the whole camera along its up axis.
    pub fn pedestal(&mut self, _dx: f32, dy: f32) {
        let (_, v, _) = self.basis();
        let offset = v.scale(self.offset_camera * dy);
        self.eye = self.eye + offset;
        self.at = self.at + offset;
        self.update_view();
    }

    /// Anchors the boom: the base sits one arm length from the eye along
    /// the ground-parallel view direction, swung by the current boom angle.
    fn compute_boom_base(&mut self) {
        let (u, _, n) = self.basis();
        let arm = Vec3::new(n.x, 0.0, n.z)
            .normalize()
            .scale(self.boom_length);

        let m = Mat4::rotation(self.boom_angle, u.x, u.y, u.z);
        self.boom_base = self.eye + m.transform_direction(arm);
    }

    /// Swings the eye horizontally around the boom base.
    pub fn tongue(&mut self, dx: f32, _dy: f32) {
        let (_, _, n) = self.basis();
        self.boom_angle += self.rotate_angle * -dx;

        let m = Mat4::rotation(self.boom_angle, self.up.x, self.up.y, self.up.z);
        let arm = Vec3::new(-n.x, 0.0, -n.z)
            .normalize()
            .scale(self.boom_length);

        self.eye = self.boom_base + m.transform_direction(arm);
        self.update_view();
    }

    /// Swings the eye vertically around the boom base.
    pub fn crane(&mut self, _dx: f32, dy: f32) {
        let (u, _, n) = self.basis();
        self.boom_angle += self.rotate_angle * -dy;

        let m = Mat4::rotation(self.boom_angle, u.x, u.y, u.z);
        let arm = Vec3::new(-n.x, 0.0, -n.z)
            .normalize()
            .scale(self.boom_length);

        self.eye = self.boom_base + m.transform_direction(arm);
        self.update_view();
    }

    /// Moves the eye toward or away from the target. The move is rejected
    /// (eye restored exactly) if it would bring the eye within one unit of
    /// `at`. Returns whether the move was kept.
    pub fn dolly(&mut self, dx: f32, dy: f32) -> bool {
        let (_, _, n) = self.basis();
        let eye_saved = self.eye;

        // The larger of the two deltas drives the move.
        let amount = if dx.abs() > dy.abs() { dx } else { -dy };
        let distance = self.offset_camera * amount;

        self.eye = self.eye + n.scale(-distance);

        if self.eye.distance(self.at) < 1.0 {
            debug!(?eye_saved, "dolly rejected: eye too close to target");
            self.eye = eye_saved;
            false
        } else {
            self.update_view();
            true
        }
    }

    /// Slides the whole camera sideways.
    pub fn trunk(&mut self, dx: f32, _dy: f32) {
        let (u, _, _) = self.basis();
        let offset = u.scale(-self.offset_camera * dx);
        self.eye = self.eye + offset;
        self.at = self.at + offset;
        self.update_view();
    }

    /// Orbits the eye around the target about the up vector.
    pub fn arc(&mut self, dx: f32, _dy: f32) {
        let (_, _, n) = self.basis();
        let angle = self.rotate_angle * dx;

        let m = Mat4::rotation(angle, self.up.x, self.up.y, self.up.z);
        let n_new = m.transform_direction(n);

        let dist = self.eye.distance(self.at);
        self.eye = self.at + n_new.scale(dist);
        self.update_view();
    }

    /// Orbits around the target about the world y axis.
    pub fn arc_horizontal(&mut self, dx: f32, _dy: f32) {
        let (_, _, n) = self.basis();
        let angle = self.rotate_angle * dx;

        let m = Mat4::rotation(-angle, 0.0, 1.0, 0.0);
        let n_new = m.transform_direction(n);

        let dist = self.eye.distance(self.at);
        self.eye = self.at + n_new.scale(dist);
        self.update_view();
    }

    /// Orbits around the target about a fixed diagonal ground axis.
    pub fn arc_vertical(&mut self, _dx: f32, dy: f32) {
        let (_, _, n) = self.basis();
        let angle = self.rotate_angle * dy;

        let m = Mat4::rotation(-angle, 1.0, 0.0, -1.0);
        let n_new = m.transform_direction(n);

        let dist = self.eye.distance(self.at);
        self.eye = self.at + n_new.scale(dist);
        self.update_view();
    }

    /// Rolls the camera by rotating `up` around the view direction.
    pub fn cant(&mut self, dx: f32, _dy: f32) {
        let (_, _, n) = self.basis();
        let angle = self.rotate_angle * dx;

        let m = Mat4::rotation(angle, n.x, n.y, n.z);
        self.up = m.transform_direction(self.up);
        self.update_view();
    }
}
