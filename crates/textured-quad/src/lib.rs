#![deny(unsafe_code)]
//! Textured, transformed quad.
//!
//! Two textures are sampled on units 0 and 1 and blended in the fragment
//! shader. A `mat4` uniform moves the quad to the lower-right corner and
//! spins it around the Z axis at one radian per second.

use glam::{Mat4, Vec3};

use gl_steps_core::assets::Assets;
use gl_steps_core::error::SceneError;
use gl_steps_core::geometry::{MeshData, VertexAttribute, VertexLayout};
use gl_steps_core::render::{
    bind_texture_unit, create_texture, load_source, GpuMesh, Program, TextureImage,
};
use gl_steps_core::scene::{FrameCtx, Scene};

/// Interleaved position (3) + texture coordinate (2) per vertex.
const VERTICES: [f32; 20] = [
    0.5, 0.5, 0.0, 1.0, 1.0, // top right
    0.5, -0.5, 0.0, 1.0, 0.0, // bottom right
    -0.5, -0.5, 0.0, 0.0, 0.0, // bottom left
    -0.5, 0.5, 0.0, 0.0, 1.0, // top left
];

const INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

fn layout() -> Result<VertexLayout, SceneError> {
    VertexLayout::new(vec![
        VertexAttribute {
            location: 0,
            components: 3,
        },
        VertexAttribute {
            location: 1,
            components: 2,
        },
    ])
}

/// Transform for a given elapsed time: shift to the lower-right corner,
/// then rotate about Z by the elapsed seconds.
pub fn spin_transform(elapsed_secs: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.5, -0.5, 0.0)) * Mat4::from_rotation_z(elapsed_secs)
}

/// The textured-quad scene.
pub struct TexturedQuad {
    program: Program,
    mesh: GpuMesh,
    textures: [glow::Texture; 2],
}

impl TexturedQuad {
    /// Uploads the quad, compiles the file-loaded shader pair, and
    /// decodes both textures (`container.png`, `emblem.png`).
    pub fn new(gl: &glow::Context, assets: &Assets) -> Result<Self, SceneError> {
        let vertex_src = load_source(&assets.shader("textured_quad.vert"))?;
        let fragment_src = load_source(&assets.shader("textured_quad.frag"))?;

        let data = MeshData::with_indices(&VERTICES, &INDICES, layout()?)?;
        let mesh = GpuMesh::upload(gl, &data)?;
        let program = Program::from_sources(gl, &vertex_src, &fragment_src)?;

        let container = TextureImage::load(&assets.texture("container.png"))?;
        let emblem = TextureImage::load(&assets.texture("emblem.png"))?;
        let textures = [
            create_texture(gl, &container)?,
            create_texture(gl, &emblem)?,
        ];

        // Samplers are bound to their units once; the units never change.
        program.bind(gl);
        program.set_i32(gl, "u_texture0", 0);
        program.set_i32(gl, "u_texture1", 1);

        Ok(Self {
            program,
            mesh,
            textures,
        })
    }
}

impl Scene for TexturedQuad {
    fn draw(&mut self, gl: &glow::Context, frame: &FrameCtx) -> Result<(), SceneError> {
        bind_texture_unit(gl, 0, self.textures[0]);
        bind_texture_unit(gl, 1, self.textures[1]);

        self.program.bind(gl);
        self.program
            .set_mat4(gl, "u_transform", &spin_transform(frame.elapsed_secs));
        self.mesh.draw(gl);
        Ok(())
    }

    #[allow(unsafe_code)]
    fn destroy(&mut self, gl: &glow::Context) {
        use glow::HasContext;
        self.program.destroy(gl);
        self.mesh.destroy(gl);
        // SAFETY: both handles are live and unused after destroy.
        unsafe {
            gl.delete_texture(self.textures[0]);
            gl.delete_texture(self.textures[1]);
        }
    }
}
