#![deny(unsafe_code)]
//! Spinning textured cube.
//!
//! The final step goes 3D: 36 position+uv vertices (six faces, two
//! triangles each, no index buffer), the same two blended textures, and a
//! full model/view/projection chain. The model matrix accumulates rotation
//! about a tilted axis from per-frame delta time; the projection tracks
//! the window's aspect ratio through `resize`. Depth testing is on so near
//! faces win regardless of draw order.

use glam::{Mat4, Vec3};

use gl_steps_core::assets::Assets;
use gl_steps_core::error::SceneError;
use gl_steps_core::geometry::{MeshData, VertexAttribute, VertexLayout};
use gl_steps_core::render::{
    bind_texture_unit, create_texture, load_source, GpuMesh, Program, TextureImage,
};
use gl_steps_core::scene::{FrameCtx, Scene};

/// Rotation speed in radians per second.
const SPIN_SPEED: f32 = 0.9;
/// Tilted rotation axis (normalized at use).
const SPIN_AXIS: Vec3 = Vec3::new(0.5, 1.0, 0.0);
/// Vertical field of view in degrees.
const FOV_Y_DEGREES: f32 = 45.0;
/// Near clip plane.
const Z_NEAR: f32 = 0.1;
/// Far clip plane.
const Z_FAR: f32 = 100.0;

/// Six faces, two triangles each, position (3) + uv (2) interleaved.
#[rustfmt::skip]
const VERTICES: [f32; 180] = [
    // back
    -0.5, -0.5, -0.5,  0.0, 0.0,
     0.5, -0.5, -0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 0.0,
    // front
    -0.5, -0.5,  0.5,  0.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
    -0.5,  0.5,  0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    // left
    -0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5,  0.5,  1.0, 0.0,
    // right
     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5,  0.5,  0.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
    // bottom
    -0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  1.0, 1.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    // top
    -0.5,  0.5, -0.5,  0.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
];

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

/// Camera pulled back three units along +Z.
pub fn view_matrix() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0))
}

/// Perspective projection for the given aspect ratio.
pub fn projection_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR)
}

/// Model matrix after `angle` radians of accumulated spin.
pub fn model_matrix(angle: f32) -> Mat4 {
    Mat4::from_axis_angle(SPIN_AXIS.normalize(), angle)
}

/// The spinning-cube scene.
pub struct SpinningCube {
    program: Program,
    mesh: GpuMesh,
    textures: [glow::Texture; 2],
    angle: f32,
    projection: Mat4,
}

impl SpinningCube {
    /// Uploads the cube, compiles the file-loaded shader pair, and
    /// decodes both textures.
    pub fn new(gl: &glow::Context, assets: &Assets) -> Result<Self, SceneError> {
        let vertex_src = load_source(&assets.shader("spinning_cube.vert"))?;
        let fragment_src = load_source(&assets.shader("spinning_cube.frag"))?;

        let data = MeshData::new(&VERTICES, layout()?)?;
        let mesh = GpuMesh::upload(gl, &data)?;
        let program = Program::from_sources(gl, &vertex_src, &fragment_src)?;

        let container = TextureImage::load(&assets.texture("container.png"))?;
        let emblem = TextureImage::load(&assets.texture("emblem.png"))?;
        let textures = [
            create_texture(gl, &container)?,
            create_texture(gl, &emblem)?,
        ];

        program.bind(gl);
        program.set_i32(gl, "u_texture0", 0);
        program.set_i32(gl, "u_texture1", 1);

        Ok(Self {
            program,
            mesh,
            textures,
            angle: 0.0,
            // Overwritten by the initial resize call before the first frame.
            projection: projection_matrix(1.0),
        })
    }
}

impl Scene for SpinningCube {
    fn draw(&mut self, gl: &glow::Context, frame: &FrameCtx) -> Result<(), SceneError> {
        self.angle += frame.delta_secs * SPIN_SPEED;

        bind_texture_unit(gl, 0, self.textures[0]);
        bind_texture_unit(gl, 1, self.textures[1]);

        self.program.bind(gl);
        self.program.set_mat4(gl, "u_model", &model_matrix(self.angle));
        self.program.set_mat4(gl, "u_view", &view_matrix());
        self.program.set_mat4(gl, "u_projection", &self.projection);
        self.mesh.draw(gl);
        Ok(())
    }

    fn resize(&mut self, _gl: &glow::Context, width: u32, height: u32) {
        let aspect = if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        self.projection = projection_matrix(aspect);
    }

    fn uses_depth(&self) -> bool {
        true
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
