#![deny(unsafe_code)]
//! Shared plumbing for the gl-steps demo scenes.
//!
//! Every scene in the workspace repeats the same skeleton: open a window
//! with a GL 3.3 core context, upload vertex data, compile a shader pair,
//! then draw once per frame until the window closes. This crate holds that
//! skeleton exactly once: the [`Scene`] trait and per-frame context, the
//! windowed [`runtime`], the [`render`] helpers (shader programs, meshes,
//! textures), the [`clock`], and asset path resolution.

pub mod assets;
pub mod clock;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod render;
pub mod runtime;
pub mod scene;

pub use assets::Assets;
pub use clock::{FrameClock, FrameTime};
pub use error::SceneError;
pub use geometry::{MeshData, VertexAttribute, VertexLayout};
pub use runtime::{Runtime, WindowConfig};
pub use scene::{FrameCtx, Scene};
