//! Texture decoding and upload.
//!
//! Images are decoded with the `image` crate and normalized to RGBA8 on
//! the CPU before upload, regardless of what the file contains. JPEG
//! sources (no alpha) and PNG sources (alpha) therefore share one upload
//! path, and no caller has to pass a per-file format flag.

use std::path::Path;

use crate::error::SceneError;

/// A decoded image held as tightly packed RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureImage {
    /// Converts any decoded image into RGBA8.
    pub fn from_image(image: image::DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            pixels: rgba.into_raw(),
        }
    }

    /// Decodes an image file from disk.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::Io` if the file cannot be opened and
    /// `SceneError::Texture` if it cannot be decoded.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let image = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(io) => SceneError::Io {
                path: path.display().to_string(),
                message: io.to_string(),
            },
            other => SceneError::Texture(format!("{}: {other}", path.display())),
        })?;
        Ok(Self::from_image(image))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tightly packed RGBA8 bytes, row-major from the top-left.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Uploads an image as a mipmapped 2D texture.
///
/// Wrap mode is `REPEAT` on both axes; filters are trilinear min and
/// linear mag, matching what the textured scenes expect.
///
/// # Errors
///
/// Returns `SceneError::Gl` if the driver refuses to create the texture.
#[allow(unsafe_code)]
pub fn create_texture(
    gl: &glow::Context,
    image: &TextureImage,
) -> Result<glow::Texture, SceneError> {
    use glow::HasContext;

    // SAFETY: the texture is created and bound here; dimensions and pixel
    // buffer agree because TextureImage packs exactly width*height RGBA8.
    unsafe {
        let texture = gl.create_texture().map_err(SceneError::Gl)?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));

        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::LINEAR_MIPMAP_LINEAR as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::LINEAR as i32,
        );

        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA8 as i32,
            image.width() as i32,
            image.height() as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(image.pixels())),
        );
        gl.generate_mipmap(glow::TEXTURE_2D);

        gl.bind_texture(glow::TEXTURE_2D, None);
        Ok(texture)
    }
}

/// Binds `texture` to texture unit `unit` (0-based).
#[allow(unsafe_code)]
pub fn bind_texture_unit(gl: &glow::Context, unit: u32, texture: glow::Texture) {
    use glow::HasContext;
    // SAFETY: TEXTURE0 + unit stays within the guaranteed unit range for
    // the two units the scenes use.
    unsafe {
        gl.active_texture(glow::TEXTURE0 + unit);
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(width: u32, height: u32) -> image::DynamicImage {
        let buffer = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 0])
        });
        image::DynamicImage::ImageRgb8(buffer)
    }

    #[test]
    fn rgb_input_is_normalized_to_rgba() {
        let tex = TextureImage::from_image(gradient_image(8, 4));
        assert_eq!(tex.width(), 8);
        assert_eq!(tex.height(), 4);
        assert_eq!(tex.pixels().len(), 8 * 4 * 4, "expected RGBA8 packing");
    }

    #[test]
    fn normalized_alpha_is_opaque_for_rgb_input() {
        let tex = TextureImage::from_image(gradient_image(2, 2));
        for pixel in tex.pixels().chunks_exact(4) {
            assert_eq!(pixel[3], 255, "RGB source must become opaque RGBA");
        }
    }

    #[test]
    fn rgba_input_keeps_its_alpha() {
        let buffer = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 40]));
        let tex = TextureImage::from_image(image::DynamicImage::ImageRgba8(buffer));
        assert_eq!(&tex.pixels()[..4], &[10, 20, 30, 40]);
    }

    #[test]
    fn load_missing_file_is_an_io_error() {
        let err = TextureImage::load(Path::new("no/such/texture.png")).unwrap_err();
        assert!(
            matches!(err, SceneError::Io { .. }),
            "expected Io error, got: {err}"
        );
    }

    #[test]
    #[ignore = "requires GL context"]
    fn create_texture_returns_a_live_handle() {
        // Would test: create_texture on a 2x2 image returns Ok.
    }
}
