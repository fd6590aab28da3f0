#![deny(unsafe_code)]
//! Indexed quad.
//!
//! Second step: four corner vertices and an element buffer describing two
//! triangles, so the shared corners are stored once. Shading is unchanged
//! from the first triangle.

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

/// Quad corners: top right, bottom right, bottom left, top left.
const VERTICES: [f32; 12] = [
    0.5, 0.5, 0.0, //
    0.5, -0.5, 0.0, //
    -0.5, -0.5, 0.0, //
    -0.5, 0.5, 0.0,
];

/// Two triangles over the shared corners.
const INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// The indexed-quad scene.
pub struct IndexedQuad {
    program: Program,
    mesh: GpuMesh,
}

impl IndexedQuad {
    /// Uploads the quad with its element buffer and compiles the shaders.
    pub fn new(gl: &glow::Context) -> Result<Self, SceneError> {
        let data = MeshData::with_indices(&VERTICES, &INDICES, VertexLayout::position3())?;
        let mesh = GpuMesh::upload(gl, &data)?;
        let program = Program::from_sources(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        Ok(Self { program, mesh })
    }
}

impl Scene for IndexedQuad {
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
