//! GL-side helpers shared by every scene.
//!
//! - [`shader`] -- program compile/link, uniform setters, source file loading.
//! - [`mesh`] -- VAO/VBO/EBO upload and draw from validated [`MeshData`].
//! - [`texture`] -- RGBA8 texture images and GPU upload with mipmaps.
//!
//! [`MeshData`]: crate::geometry::MeshData

pub mod mesh;
pub mod shader;
pub mod texture;

pub use mesh::GpuMesh;
pub use shader::{load_source, number_source_lines, Program, ShaderStage};
pub use texture::{bind_texture_unit, create_texture, TextureImage};
