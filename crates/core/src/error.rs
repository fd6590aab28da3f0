//! Error types shared by the runtime, the render helpers, and the scenes.

use thiserror::Error;

/// Errors produced while setting up or driving a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Window, event loop, or GL context creation failed.
    #[error("window setup failed: {0}")]
    Window(String),

    /// The driver refused to create a GL object (buffer, texture, ...).
    #[error("GL object creation failed: {0}")]
    Gl(String),

    /// A shader stage failed to compile.
    #[error("{stage} shader compile error:\n{log}")]
    Compile {
        /// Which stage failed ("vertex" or "fragment").
        stage: &'static str,
        /// Driver info log, prefixed with the line-numbered source.
        log: String,
    },

    /// The shader program failed to link.
    #[error("shader link error:\n{0}")]
    Link(String),

    /// Vertex or index data did not match its declared layout.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// An image could not be decoded or uploaded as a texture.
    #[error("texture error: {0}")]
    Texture(String),

    /// A shader or texture file could not be read.
    #[error("could not read {path}: {message}")]
    Io {
        /// Path as given to the loader.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },

    /// A scene name did not match any registered scene.
    #[error("unknown scene: {0}")]
    UnknownScene(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_the_stage() {
        let err = SceneError::Compile {
            stage: "fragment",
            log: "0:3: 'foo' : undeclared identifier".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("fragment"), "missing stage in: {msg}");
        assert!(msg.contains("undeclared"), "missing log in: {msg}");
    }

    #[test]
    fn io_error_carries_the_path() {
        let err = SceneError::Io {
            path: "assets/shaders/pulse.vert".into(),
            message: "No such file or directory".into(),
        };
        let msg = format!("{err}");
        assert!(
            msg.contains("assets/shaders/pulse.vert"),
            "missing path in: {msg}"
        );
    }

    #[test]
    fn unknown_scene_includes_the_name() {
        let msg = format!("{}", SceneError::UnknownScene("teapot".into()));
        assert!(msg.contains("teapot"), "missing name in: {msg}");
    }

    #[test]
    fn scene_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SceneError>();
    }

    #[test]
    fn scene_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<SceneError>();
    }
}
