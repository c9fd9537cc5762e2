//! Render configuration.
//!
//! Every option is fixed for one render call. Values come from
//! [`RenderConfig::default`], optionally overridden by a RON file, and
//! finally by command-line flags.
//!
//! ```ron
//! (
//!     eye: (x: 1.0, y: 0.5, z: 2.0),
//!     light_direction: (x: 0.0, y: 0.0, z: -1.0),
//!     specular: 0.8,
//!     shading: gouraud,
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::colors::{pack_rgba, unpack_rgba, BACKGROUND, FILL, WIREFRAME};
use crate::engine::{RenderMode, ShadingMode};
use crate::error::{ConfigError, RenderError, RenderResult};
use crate::math::vec3::Vec3;

/// All options of a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    pub light_direction: Vec3,
    /// Weight of the specular term.
    pub specular: f32,
    /// Canvas height in pixels; the width follows the mesh aspect ratio.
    pub height: u32,
    /// Values above 1 shrink the model inside the canvas.
    pub scale: f32,
    /// RGBA color used when no texture applies.
    pub fill_color: [u8; 4],
    pub wireframe_color: [u8; 4],
    pub background: [u8; 4],
    pub shading: ShadingMode,
    pub mode: RenderMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            eye: camera.eye,
            center: camera.center,
            up: camera.up,
            light_direction: Vec3::BACK,
            specular: 0.5,
            height: 1000,
            scale: 1.5,
            fill_color: unpack_rgba(FILL),
            wireframe_color: unpack_rgba(WIREFRAME),
            background: unpack_rgba(BACKGROUND),
            shading: ShadingMode::default(),
            mode: RenderMode::default(),
        }
    }
}

impl RenderConfig {
    /// Parses a RON document. Missing fields keep their defaults.
    pub fn from_ron_str(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    /// Reads and parses a RON file.
    pub fn from_ron_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.eye, self.center, self.up)
    }

    pub fn fill_argb(&self) -> u32 {
        let [r, g, b, a] = self.fill_color;
        pack_rgba(r, g, b, a)
    }

    pub fn wireframe_argb(&self) -> u32 {
        let [r, g, b, a] = self.wireframe_color;
        pack_rgba(r, g, b, a)
    }

    pub fn background_argb(&self) -> u32 {
        let [r, g, b, a] = self.background;
        pack_rgba(r, g, b, a)
    }

    /// Rejects values no render could use.
    ///
    /// Camera degeneracy is reported later by [`Camera::basis`].
    pub fn validate(&self) -> RenderResult<()> {
        if self.height == 0 {
            return Err(RenderError::EmptyCanvas {
                width: 0,
                height: 0,
            });
        }
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            return Err(RenderError::InvalidScale(self.scale));
        }
        if !(self.specular >= 0.0 && self.specular.is_finite()) {
            return Err(RenderError::InvalidSpecular(self.specular));
        }
        if self.light_direction.try_normalize().is_none() {
            return Err(RenderError::DegenerateLight);
        }
        Ok(())
    }
}
