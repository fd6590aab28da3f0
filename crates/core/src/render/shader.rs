//! Shader program compilation, linking, and uniform access.
//!
//! Every scene uses exactly one vertex/fragment pair. [`Program`] owns the
//! linked GL program: it compiles both stages, links, checks the status
//! flags, and deletes the stage objects afterwards. Compile failures carry
//! the driver's info log together with the line-numbered source, so the
//! console message can be matched against the GLSL by eye.

use std::fs;
use std::path::Path;

use crate::error::SceneError;

/// The two shader stages a scene program is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex stage.
    Vertex,
    /// Fragment stage.
    Fragment,
}

impl ShaderStage {
    /// The GL shader-type enum for this stage.
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    /// Human-readable stage name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

/// Reads a shader source file verbatim.
///
/// # Errors
///
/// Returns `SceneError::Io` carrying the path if the file cannot be read.
pub fn load_source(path: &Path) -> Result<String, SceneError> {
    fs::read_to_string(path).map_err(|e| SceneError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Prefixes each source line with its 1-based number, right-aligned.
///
/// Driver compile logs reference line numbers; pairing them with the
/// numbered source makes the error message self-contained.
pub fn number_source_lines(source: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let width = lines.len().max(1).to_string().len();
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A linked vertex+fragment shader program.
pub struct Program {
    handle: glow::Program,
}

impl Program {
    /// Compiles both stages and links them into a program.
    ///
    /// The stage objects are detached and deleted once linking finishes;
    /// the program keeps its own copies.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::Compile` with the numbered source and driver
    /// log if a stage fails, or `SceneError::Link` if linking fails.
    #[allow(unsafe_code)]
    pub fn from_sources(
        gl: &glow::Context,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, SceneError> {
        use glow::HasContext;

        let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_src)?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, fragment_src) {
            Ok(shader) => shader,
            Err(e) => {
                // SAFETY: vertex is a live shader handle from compile_stage.
                unsafe { gl.delete_shader(vertex) };
                return Err(e);
            }
        };

        // SAFETY: both handles are live; we attach, link, then detach and
        // delete them regardless of the link outcome.
        let result = unsafe {
            let program = gl.create_program().map_err(SceneError::Gl)?;
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);

            if gl.get_program_link_status(program) {
                Ok(Self { handle: program })
            } else {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                Err(SceneError::Link(log))
            }
        };

        // SAFETY: the linked program holds its own copies of the stages.
        unsafe {
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
        }

        result
    }

    /// Makes this program current.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: self.handle is a live program handle.
        unsafe { gl.use_program(Some(self.handle)) };
    }

    /// Stores an `i32` uniform (sampler bindings use this).
    #[allow(unsafe_code)]
    pub fn set_i32(&self, gl: &glow::Context, name: &str, value: i32) {
        use glow::HasContext;
        if let Some(location) = self.location(gl, name) {
            // SAFETY: location was just queried from this live program.
            unsafe { gl.uniform_1_i32(Some(&location), value) };
        }
    }

    /// Stores a `vec4` uniform.
    #[allow(unsafe_code)]
    pub fn set_vec4(&self, gl: &glow::Context, name: &str, value: glam::Vec4) {
        use glow::HasContext;
        if let Some(location) = self.location(gl, name) {
            // SAFETY: location was just queried from this live program.
            unsafe { gl.uniform_4_f32(Some(&location), value.x, value.y, value.z, value.w) };
        }
    }

    /// Stores a `mat4` uniform in column-major order.
    #[allow(unsafe_code)]
    pub fn set_mat4(&self, gl: &glow::Context, name: &str, value: &glam::Mat4) {
        use glow::HasContext;
        if let Some(location) = self.location(gl, name) {
            // SAFETY: location was just queried from this live program.
            unsafe {
                gl.uniform_matrix_4_f32_slice(Some(&location), false, &value.to_cols_array())
            };
        }
    }

    /// The raw program handle.
    pub fn handle(&self) -> glow::Program {
        self.handle
    }

    /// Deletes the GL program.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: deleting a live program handle; the handle is not used
        // again after destroy.
        unsafe { gl.delete_program(self.handle) };
    }

    /// Looks up a uniform location, warning once per call when it is
    /// missing. GL would silently ignore stores to an absent uniform;
    /// surfacing the name catches typos between Rust and GLSL.
    #[allow(unsafe_code)]
    fn location(&self, gl: &glow::Context, name: &str) -> Option<glow::UniformLocation> {
        use glow::HasContext;
        // SAFETY: self.handle is a live program handle.
        let location = unsafe { gl.get_uniform_location(self.handle, name) };
        if location.is_none() {
            log::warn!("uniform '{name}' not found in shader program");
        }
        location
    }
}

/// Compiles a single stage, returning the numbered source and driver log
/// on failure.
#[allow(unsafe_code)]
fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, SceneError> {
    use glow::HasContext;

    // SAFETY: stage.gl_type() is a valid shader-type enum and source is a
    // valid UTF-8 string; the shader is deleted on the failure path.
    unsafe {
        let shader = gl.create_shader(stage.gl_type()).map_err(SceneError::Gl)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if gl.get_shader_compile_status(shader) {
            Ok(shader)
        } else {
            let info_log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            Err(SceneError::Compile {
                stage: stage.label(),
                log: format!("{}\n\n{}", number_source_lines(source), info_log),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_labels_are_lowercase_names() {
        assert_eq!(ShaderStage::Vertex.label(), "vertex");
        assert_eq!(ShaderStage::Fragment.label(), "fragment");
    }

    #[test]
    fn stage_gl_types_are_distinct() {
        assert_ne!(ShaderStage::Vertex.gl_type(), ShaderStage::Fragment.gl_type());
    }

    #[test]
    fn numbering_prefixes_each_line() {
        let numbered = number_source_lines("#version 330 core\nvoid main() {\n}");
        assert!(numbered.contains("1: #version 330 core"), "got:\n{numbered}");
        assert!(numbered.contains("2: void main() {"), "got:\n{numbered}");
        assert!(numbered.contains("3: }"), "got:\n{numbered}");
    }

    #[test]
    fn numbering_right_aligns_past_nine_lines() {
        let source = (1..=12)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let numbered = number_source_lines(&source);
        let lines: Vec<&str> = numbered.lines().collect();
        assert!(lines[0].starts_with(" 1: "), "got: '{}'", lines[0]);
        assert!(lines[9].starts_with("10: "), "got: '{}'", lines[9]);
    }

    #[test]
    fn numbering_empty_source_is_empty() {
        assert!(number_source_lines("").is_empty());
    }

    #[test]
    fn load_source_returns_exact_file_contents() {
        let dir = std::env::temp_dir().join("gl-steps-shader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ok.vert");
        std::fs::write(&path, "#version 330 core\nvoid main() {}\n").unwrap();

        let source = load_source(&path).unwrap();
        assert_eq!(source, "#version 330 core\nvoid main() {}\n");
    }

    #[test]
    fn load_source_error_carries_the_path() {
        let missing = Path::new("definitely/not/here.frag");
        let err = load_source(missing).unwrap_err();
        match err {
            SceneError::Io { path, .. } => {
                assert!(path.contains("here.frag"), "path was: {path}")
            }
            other => panic!("expected Io error, got: {other}"),
        }
    }

    #[test]
    #[ignore = "requires GL context"]
    fn from_sources_links_a_trivial_program() {
        // Would test: Program::from_sources with minimal 330 core shaders
        // returns Ok and a nonzero handle.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn bad_fragment_source_reports_compile_error() {
        // Would test: a fragment source with an undeclared identifier
        // produces SceneError::Compile with stage "fragment".
    }
}
