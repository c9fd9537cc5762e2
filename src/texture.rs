//! Texture images sampled during shading.

use std::path::Path;

use image::error::{LimitError, LimitErrorKind};
use image::{ImageError, RgbaImage};

use crate::colors::pack_rgba;

/// A decoded texture in ARGB8888, row-major with top-left origin.
#[derive(Debug, Clone)]
pub struct Texture {
    data: Vec<u32>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG, BMP).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        Self::from_image(&image::open(path)?.to_rgba8())
    }

    /// Converts a decoded image. An image without pixels cannot be sampled
    /// and is rejected.
    pub fn from_image(img: &RgbaImage) -> Result<Self, ImageError> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::Limits(LimitError::from_kind(
                LimitErrorKind::DimensionError,
            )));
        }
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                pack_rgba(r, g, b, a)
            })
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// # UV Coordinate Convention
    /// - (0,0) is bottom-left in OBJ convention, but textures are stored
    ///   top-left origin, so V is flipped: `v_corrected = 1.0 - v`
    /// - UVs outside [0,1] wrap (repeat mode via `rem_euclid`)
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let u = u.rem_euclid(1.0);
        let v = (1.0 - v).rem_euclid(1.0);

        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);

        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
