//! The `Scene` trait that every demo step implements.
//!
//! A scene owns its GPU objects. Construction (geometry upload, shader
//! compile/link, texture load) happens once in the scene's constructor with
//! a live GL context; after that the runtime only calls [`Scene::draw`] once
//! per frame, [`Scene::resize`] when the framebuffer changes, and
//! [`Scene::destroy`] on shutdown.

use crate::error::SceneError;

/// Clear color shared by every scene, matching the teal backdrop the whole
/// series renders against.
pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

/// Per-frame context handed to [`Scene::draw`].
#[derive(Debug, Clone, Copy)]
pub struct FrameCtx {
    /// Seconds since the runtime started, unclamped.
    pub elapsed_secs: f32,
    /// Seconds since the previous frame, clamped against long stalls.
    pub delta_secs: f32,
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Current framebuffer width in pixels.
    pub width: u32,
    /// Current framebuffer height in pixels.
    pub height: u32,
}

impl FrameCtx {
    /// Width over height, guarding the degenerate zero-height window.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// One demo step: a fixed set of GPU objects and a per-frame draw.
///
/// The trait is object-safe; the registry wraps every scene in an enum and
/// delegates, so the runtime can stay generic over a single concrete type.
pub trait Scene {
    /// Renders one frame. The runtime has already cleared the framebuffer.
    fn draw(&mut self, gl: &glow::Context, frame: &FrameCtx) -> Result<(), SceneError>;

    /// Called when the framebuffer size changes (and once after creation).
    ///
    /// The runtime keeps the GL viewport in sync; scenes only override this
    /// to recompute size-dependent state such as a projection matrix.
    fn resize(&mut self, _gl: &glow::Context, _width: u32, _height: u32) {}

    /// Whether the runtime should enable depth testing and clear the depth
    /// buffer for this scene. Defaults to `false`; only the 3D scenes need it.
    fn uses_depth(&self) -> bool {
        false
    }

    /// Deletes the scene's GPU objects. Called once on clean shutdown.
    fn destroy(&mut self, gl: &glow::Context);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(width: u32, height: u32) -> FrameCtx {
        FrameCtx {
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_index: 0,
            width,
            height,
        }
    }

    #[test]
    fn aspect_is_width_over_height() {
        let frame = ctx(800, 600);
        assert!((frame.aspect() - 800.0 / 600.0).abs() < f32::EPSILON);
    }

    #[test]
    fn aspect_of_zero_height_window_is_one() {
        let frame = ctx(800, 0);
        assert!((frame.aspect() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn clear_color_is_opaque() {
        assert!((CLEAR_COLOR[3] - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn scene_trait_is_object_safe() {
        // Compile-time check: Box<dyn Scene> must be a valid type.
        fn _takes_boxed(_scene: Box<dyn Scene>) {}
    }
}
