//! Asset path resolution.
//!
//! The later scenes read their shader pair and texture images from disk at
//! runtime. `Assets` pins those lookups to one configurable root so the
//! CLI can point the binary at the repository's `assets/` directory from
//! any working directory.

use std::path::{Path, PathBuf};

/// Locates shader and texture files under a single root directory.
#[derive(Debug, Clone)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    /// Creates a locator rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a shader source file, e.g. `shader("pulse.vert")`.
    pub fn shader(&self, name: &str) -> PathBuf {
        self.root.join("shaders").join(name)
    }

    /// Path of a texture image, e.g. `texture("container.png")`.
    pub fn texture(&self, name: &str) -> PathBuf {
        self.root.join("textures").join(name)
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::new("assets")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_paths_live_under_shaders() {
        let assets = Assets::new("data");
        assert_eq!(
            assets.shader("pulse.vert"),
            Path::new("data").join("shaders").join("pulse.vert")
        );
    }

    #[test]
    fn texture_paths_live_under_textures() {
        let assets = Assets::new("data");
        assert_eq!(
            assets.texture("container.png"),
            Path::new("data").join("textures").join("container.png")
        );
    }

    #[test]
    fn default_root_is_assets() {
        assert_eq!(Assets::default().root(), Path::new("assets"));
    }
}
