//! Lighting terms for the renderer.

use crate::error::{RenderError, RenderResult};
use crate::math::vec3::Vec3;

/// Exponent of the specular highlight.
pub const SPECULAR_EXPONENT: i32 = 10;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Intensity is `dot(normal, direction)` with no negation, so with the
/// face-normal convention of this renderer a light of `(0, 0, -1)` fully
/// lights a triangle facing the default camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit direction.
    direction: Vec3,
}

impl DirectionalLight {
    /// Create a new directional light. The direction is normalized; a zero
    /// direction is rejected.
    pub fn new(direction: Vec3) -> RenderResult<Self> {
        let direction = direction
            .try_normalize()
            .ok_or(RenderError::DegenerateLight)?;
        Ok(Self { direction })
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Raw Lambert term, negative when the surface faces away.
    #[inline]
    pub fn intensity(&self, normal: Vec3) -> f32 {
        normal.dot(self.direction)
    }

    /// Lambert term clamped to zero.
    #[inline]
    pub fn diffuse(&self, normal: Vec3) -> f32 {
        self.intensity(normal).max(0.0)
    }

    /// Mirror of the light direction about `normal`:
    /// `2 * dot(n, l) * n - l`.
    #[inline]
    pub fn reflect(&self, normal: Vec3) -> Vec3 {
        normal * (2.0 * normal.dot(self.direction)) - self.direction
    }

    /// Specular term `max(0, -reflect.z)^10`, viewed along camera z.
    #[inline]
    pub fn specular(&self, normal: Vec3) -> f32 {
        (-self.reflect(normal).z).max(0.0).powi(SPECULAR_EXPONENT)
    }
}
