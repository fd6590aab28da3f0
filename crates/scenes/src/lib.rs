#![deny(unsafe_code)]
//! Scene registry: name-based construction and trait delegation.
//!
//! This crate sits between `gl-steps-core` (which defines the `Scene`
//! trait) and the individual scene crates. The CLI depends on this crate
//! so scene selection stays in one place: [`SceneId`] handles names,
//! [`SceneKind`] handles construction and delegates the trait.

use gl_steps_core::assets::Assets;
use gl_steps_core::error::SceneError;
use gl_steps_core::scene::{FrameCtx, Scene};

use gl_steps_indexed_quad::IndexedQuad;
use gl_steps_pulse::Pulse;
use gl_steps_spinning_cube::SpinningCube;
use gl_steps_textured_quad::TexturedQuad;
use gl_steps_triangle::Triangle;
use gl_steps_vertex_colors::VertexColors;

/// Identifier for each demo step, in series order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneId {
    /// First triangle with inline shaders.
    Triangle,
    /// Quad drawn through an element buffer.
    IndexedQuad,
    /// Quad with file-loaded shaders and an animated uniform color.
    Pulse,
    /// Triangle with an interleaved per-vertex color attribute.
    VertexColors,
    /// Quad blending two textures under an animated transform.
    TexturedQuad,
    /// Rotating textured cube with model/view/projection.
    SpinningCube,
}

impl SceneId {
    /// All scenes in series order.
    pub const ALL: [SceneId; 6] = [
        SceneId::Triangle,
        SceneId::IndexedQuad,
        SceneId::Pulse,
        SceneId::VertexColors,
        SceneId::TexturedQuad,
        SceneId::SpinningCube,
    ];

    /// The kebab-case name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            SceneId::Triangle => "triangle",
            SceneId::IndexedQuad => "indexed-quad",
            SceneId::Pulse => "pulse",
            SceneId::VertexColors => "vertex-colors",
            SceneId::TexturedQuad => "textured-quad",
            SceneId::SpinningCube => "spinning-cube",
        }
    }
}

impl std::str::FromStr for SceneId {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| SceneError::UnknownScene(s.to_string()))
    }
}

/// Returns every recognized scene name, in series order.
pub fn list_scenes() -> Vec<&'static str> {
    SceneId::ALL.into_iter().map(SceneId::name).collect()
}

/// Enumeration over all constructed scenes.
///
/// Wraps each scene struct and delegates the [`Scene`] trait, so the
/// runtime stays generic over a single concrete type.
pub enum SceneKind {
    /// See [`Triangle`].
    Triangle(Triangle),
    /// See [`IndexedQuad`].
    IndexedQuad(IndexedQuad),
    /// See [`Pulse`].
    Pulse(Pulse),
    /// See [`VertexColors`].
    VertexColors(VertexColors),
    /// See [`TexturedQuad`].
    TexturedQuad(TexturedQuad),
    /// See [`SpinningCube`].
    SpinningCube(SpinningCube),
}

impl SceneKind {
    /// Constructs the scene for `id` against a live GL context.
    ///
    /// # Errors
    ///
    /// Forwards whatever the scene constructor reports (shader compile,
    /// missing asset file, GL object creation).
    pub fn create(id: SceneId, gl: &glow::Context, assets: &Assets) -> Result<Self, SceneError> {
        Ok(match id {
            SceneId::Triangle => SceneKind::Triangle(Triangle::new(gl)?),
            SceneId::IndexedQuad => SceneKind::IndexedQuad(IndexedQuad::new(gl)?),
            SceneId::Pulse => SceneKind::Pulse(Pulse::new(gl, assets)?),
            SceneId::VertexColors => SceneKind::VertexColors(VertexColors::new(gl, assets)?),
            SceneId::TexturedQuad => SceneKind::TexturedQuad(TexturedQuad::new(gl, assets)?),
            SceneId::SpinningCube => SceneKind::SpinningCube(SpinningCube::new(gl, assets)?),
        })
    }
}

impl Scene for SceneKind {
    fn draw(&mut self, gl: &glow::Context, frame: &FrameCtx) -> Result<(), SceneError> {
        match self {
            SceneKind::Triangle(s) => s.draw(gl, frame),
            SceneKind::IndexedQuad(s) => s.draw(gl, frame),
            SceneKind::Pulse(s) => s.draw(gl, frame),
            SceneKind::VertexColors(s) => s.draw(gl, frame),
            SceneKind::TexturedQuad(s) => s.draw(gl, frame),
            SceneKind::SpinningCube(s) => s.draw(gl, frame),
        }
    }

    fn resize(&mut self, gl: &glow::Context, width: u32, height: u32) {
        match self {
            SceneKind::Triangle(s) => s.resize(gl, width, height),
            SceneKind::IndexedQuad(s) => s.resize(gl, width, height),
            SceneKind::Pulse(s) => s.resize(gl, width, height),
            SceneKind::VertexColors(s) => s.resize(gl, width, height),
            SceneKind::TexturedQuad(s) => s.resize(gl, width, height),
            SceneKind::SpinningCube(s) => s.resize(gl, width, height),
        }
    }

    fn uses_depth(&self) -> bool {
        match self {
            SceneKind::Triangle(s) => s.uses_depth(),
            SceneKind::IndexedQuad(s) => s.uses_depth(),
            SceneKind::Pulse(s) => s.uses_depth(),
            SceneKind::VertexColors(s) => s.uses_depth(),
            SceneKind::TexturedQuad(s) => s.uses_depth(),
            SceneKind::SpinningCube(s) => s.uses_depth(),
        }
    }

    fn destroy(&mut self, gl: &glow::Context) {
        match self {
            SceneKind::Triangle(s) => s.destroy(gl),
            SceneKind::IndexedQuad(s) => s.destroy(gl),
            SceneKind::Pulse(s) => s.destroy(gl),
            SceneKind::VertexColors(s) => s.destroy(gl),
            SceneKind::TexturedQuad(s) => s.destroy(gl),
            SceneKind::SpinningCube(s) => s.destroy(gl),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_round_trips_through_its_name() {
        for id in SceneId::ALL {
            let parsed: SceneId = id.name().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn unknown_name_is_rejected_with_the_input() {
        let err = "teapot".parse::<SceneId>().unwrap_err();
        match err {
            SceneError::UnknownScene(name) => assert_eq!(name, "teapot"),
            other => panic!("expected UnknownScene, got: {other}"),
        }
    }

    #[test]
    fn list_matches_series_order() {
        assert_eq!(
            list_scenes(),
            vec![
                "triangle",
                "indexed-quad",
                "pulse",
                "vertex-colors",
                "textured-quad",
                "spinning-cube",
            ]
        );
    }

    #[test]
    fn names_are_kebab_case() {
        for name in list_scenes() {
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "name '{name}' is not kebab-case"
            );
        }
    }

    #[test]
    #[ignore = "requires GL context"]
    fn create_builds_every_scene() {
        // Would test: SceneKind::create for each SceneId::ALL entry
        // against the repo assets directory.
    }
}
