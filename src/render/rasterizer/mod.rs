//! Triangle rasterization.
//!
//! [`BarycentricRasterizer`] scans the triangle's bounding box, keeps the
//! pixels whose barycentric weights are all non-negative, depth-tests them
//! and hands the survivors to a [`PixelShader`].

mod barycentric;
pub mod shader;

pub use barycentric::{barycentric, BarycentricRasterizer, DEGENERATE_TOLERANCE};
pub use shader::{FlatShader, GouraudShader, PhongShader, PixelShader, Surface};

use crate::math::vec3::Vec3;

/// A triangle ready for rasterization in screen space.
///
/// x and y are integer pixel coordinates stored as floats; z is the
/// camera-space depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec3; 3],
}

impl Triangle {
    pub fn new(points: [Vec3; 3]) -> Self {
        Self { points }
    }

    /// Twice the signed screen-space area.
    #[inline]
    pub fn signed_area2(&self) -> f32 {
        let [p0, p1, p2] = self.points;
        (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y)
    }

    /// True when the triangle covers no pixels: its screen-space area is
    /// within [`DEGENERATE_TOLERANCE`] of zero.
    pub fn is_degenerate(&self) -> bool {
        self.signed_area2().abs() <= DEGENERATE_TOLERANCE
    }
}
