#![deny(unsafe_code)]
//! First triangle.
//!
//! The starting point of the series: three position-only vertices uploaded
//! once, an inline shader pair, and a constant orange fill. Everything else
//! (window, context, loop) comes from the core runtime.

use gl_steps_core::error::SceneError;
use gl_steps_core::geometry::{MeshData, VertexLayout};
use gl_steps_core::render::{GpuMesh, Program};
use gl_steps_core::scene::{FrameCtx, Scene};

const VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec3 a_pos;
void main() {
    gl_Position = vec4(a_pos, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 330 core
out vec4 frag_color;
void main() {
    frag_color = vec4(1.0, 0.5, 0.2, 1.0);
}
"#;

/// One triangle centered on the origin.
const VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0, //
    0.0, 0.5, 0.0,
];

/// The first-triangle scene.
pub struct Triangle {
    program: Program,
    mesh: GpuMesh,
}

impl Triangle {
    /// Uploads the triangle and compiles the inline shader pair.
    pub fn new(gl: &glow::Context) -> Result<Self, SceneError> {
        let data = MeshData::new(&VERTICES, VertexLayout::position3())?;
        let mesh = GpuMesh::upload(gl, &data)?;
        let program = Program::from_sources(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        Ok(Self { program, mesh })
    }
}

impl Scene for Triangle {
    fn draw(&mut self, gl: &glow::Context, _frame: &FrameCtx) -> Result<(), SceneError> {
        self.program.bind(gl);
        self.mesh.draw(gl);
        Ok(())
    }

    fn destroy(&mut self, gl: &glow::Context) {
        self.program.destroy(gl);
        self.mesh.destroy(gl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_data_is_three_positions() {
        let data = MeshData::new(&VERTICES, VertexLayout::position3()).unwrap();
        assert_eq!(data.vertex_count(), 3);
        assert_eq!(data.element_count(), 3);
        assert!(data.indices().is_none());
    }

    #[test]
    fn shaders_declare_the_gl_version() {
        assert!(VERTEX_SHADER.starts_with("#version 330 core"));
        assert!(FRAGMENT_SHADER.starts_with("#version 330 core"));
    }

    #[test]
    fn vertex_shader_reads_the_position_attribute() {
        assert!(
            VERTEX_SHADER.contains("layout (location = 0)"),
            "position must bind location 0:\n{VERTEX_SHADER}"
        );
        assert!(VERTEX_SHADER.contains("gl_Position"));
    }

    #[test]
    #[ignore = "requires GL context"]
    fn new_uploads_mesh_and_program() {
        // Would test: Triangle::new returns Ok against a live context.
    }
}
