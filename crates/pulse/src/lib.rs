#![deny(unsafe_code)]
//! Pulsing quad.
//!
//! First scene to load its shader pair from disk instead of inline
//! constants, and the first to feed a uniform every frame: the fill color
//! pulses between dark and bright green on a sine of elapsed time.

use glam::Vec4;

use gl_steps_core::assets::Assets;
use gl_steps_core::error::SceneError;
use gl_steps_core::geometry::{MeshData, VertexLayout};
use gl_steps_core::render::{load_source, GpuMesh, Program};
use gl_steps_core::scene::{FrameCtx, Scene};

/// Quad corners: top right, bottom right, bottom left, top left.
const VERTICES: [f32; 12] = [
    0.5, 0.5, 0.0, //
    0.5, -0.5, 0.0, //
    -0.5, -0.5, 0.0, //
    -0.5, 0.5, 0.0,
];

const INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Uniform color for a given elapsed time: fixed red channel, green
/// swinging over [0, 1] on a sine, full alpha.
pub fn pulse_color(elapsed_secs: f32) -> Vec4 {
    let green = elapsed_secs.sin() / 2.0 + 0.5;
    Vec4::new(0.5, green, 0.0, 1.0)
}

/// The pulsing-quad scene.
pub struct Pulse {
    program: Program,
    mesh: GpuMesh,
}

impl Pulse {
    /// Uploads the quad and compiles the shader pair read from the assets
    /// directory (`pulse.vert` / `pulse.frag`).
    pub fn new(gl: &glow::Context, assets: &Assets) -> Result<Self, SceneError> {
        let vertex_src = load_source(&assets.shader("pulse.vert"))?;
        let fragment_src = load_source(&assets.shader("pulse.frag"))?;

        let data = MeshData::with_indices(&VERTICES, &INDICES, VertexLayout::position3())?;
        let mesh = GpuMesh::upload(gl, &data)?;
        let program = Program::from_sources(gl, &vertex_src, &fragment_src)?;
        Ok(Self { program, mesh })
    }
}

impl Scene for Pulse {
    fn draw(&mut self, gl: &glow::Context, frame: &FrameCtx) -> Result<(), SceneError> {
        self.program.bind(gl);
        self.program
            .set_vec4(gl, "u_color", pulse_color(frame.elapsed_secs));
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
    fn pulse_color_green_stays_in_unit_range() {
        let mut t = 0.0f32;
        while t < 20.0 {
            let color = pulse_color(t);
            assert!(
                (0.0..=1.0).contains(&color.y),
                "green {} out of range at t={t}",
                color.y
            );
            t += 0.1;
        }
    }

    #[test]
    fn pulse_color_starts_at_midpoint_green() {
        let color = pulse_color(0.0);
        assert!((color.y - 0.5).abs() < 1e-6, "got green {}", color.y);
    }

    #[test]
    fn pulse_color_red_and_alpha_are_fixed() {
        for t in [0.0, 1.3, 7.9] {
            let color = pulse_color(t);
            assert!((color.x - 0.5).abs() < f32::EPSILON);
            assert!((color.w - 1.0).abs() < f32::EPSILON);
            assert!(color.z.abs() < f32::EPSILON);
        }
    }

    #[test]
    fn pulse_color_peaks_a_quarter_period_in() {
        let color = pulse_color(std::f32::consts::FRAC_PI_2);
        assert!((color.y - 1.0).abs() < 1e-6, "got green {}", color.y);
    }

    #[test]
    fn quad_geometry_validates() {
        let data =
            MeshData::with_indices(&VERTICES, &INDICES, VertexLayout::position3()).unwrap();
        assert_eq!(data.vertex_count(), 4);
        assert_eq!(data.element_count(), 6);
    }

    #[test]
    #[ignore = "requires GL context"]
    fn new_reads_shaders_from_the_assets_root() {
        // Would test: Pulse::new against a live context with the repo
        // assets directory succeeds.
    }
}
