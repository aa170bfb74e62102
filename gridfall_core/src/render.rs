//! Rendering abstraction.
//!
//! This crate intentionally does not depend on a graphics backend. Model
//! loading (OBJ/MTL parsing, buffer uploads, textures) happens on the other
//! side of this boundary; the core only holds opaque handles and the frozen
//! transforms to draw them with.

use serde::{Deserialize, Serialize};

use crate::math::Mat4;

/// Opaque reference to a loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelHandle(pub u32);

/// A minimal rendering API.
pub trait RenderBackend {
    fn begin_frame(&mut self);
    /// Sets the combined projection * view transform for the frame.
    fn set_view_proj(&mut self, view_proj: Mat4);
    /// Draws one model under the given model transform.
    fn draw_model(&mut self, model: ModelHandle, transform: &Mat4);
    fn end_frame(&mut self);
}

/// A renderer that records draw calls, useful for headless runs and tests.
#[derive(Default)]
pub struct NullRenderer {
    pub view_proj: Mat4,
    pub draws: Vec<(ModelHandle, Mat4)>,
    pub frames: u32,
}

impl RenderBackend for NullRenderer {
    fn begin_frame(&mut self) {
        self.draws.clear();
    }

    fn set_view_proj(&mut self, view_proj: Mat4) {
        self.view_proj = view_proj;
    }

    fn draw_model(&mut self, model: ModelHandle, transform: &Mat4) {
        self.draws.push((model, *transform));
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}
