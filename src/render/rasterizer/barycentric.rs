//! Bounding-box rasterization with a barycentric inside test.
//!
//! # Algorithm Overview
//!
//! 1. Compute the bounding box of the three vertices, clamped to the buffer
//! 2. For each pixel in the box, compute barycentric weights
//! 3. Skip the pixel if any weight is negative (outside the triangle)
//! 4. Interpolate depth and run the depth test
//! 5. Shade and write the pixels that pass
//!
//! # Barycentric Weights
//!
//! For triangle (A, B, C) and point P, solve `P = A + u(B - A) + v(C - A)`
//! by crossing the x-row and y-row vectors:
//!
//! ```text
//! (B.x - A.x, C.x - A.x, A.x - P.x) x (B.y - A.y, C.y - A.y, A.y - P.y) = (s, t, d)
//! weights = (1 - (s + t) / d, s / d, t / d)
//! ```
//!
//! `d` is twice the signed area, so `|d|` near zero means the triangle has
//! collapsed to a line or point on screen and covers nothing. Both windings
//! produce the same weights, so there is no back-face culling here.

use super::shader::PixelShader;
use super::Triangle;
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;

/// Cross-product z at or below which a triangle counts as degenerate.
pub const DEGENERATE_TOLERANCE: f32 = 1e-2;

/// Barycentric weights of `p` with respect to `points`, using only x and y.
///
/// Returns `None` for a degenerate triangle. Weights may be negative when
/// `p` lies outside the triangle.
#[inline]
pub fn barycentric(points: &[Vec3; 3], p: Vec3) -> Option<[f32; 3]> {
    let [a, b, c] = *points;
    let xs = Vec3::new(b.x - a.x, c.x - a.x, a.x - p.x);
    let ys = Vec3::new(b.y - a.y, c.y - a.y, a.y - p.y);
    let u = xs.cross(ys);
    if u.z.abs() <= DEGENERATE_TOLERANCE {
        return None;
    }
    Some([1.0 - (u.x + u.y) / u.z, u.x / u.z, u.y / u.z])
}

/// Triangle rasterizer over the integer pixel grid.
#[derive(Debug, Default, Clone, Copy)]
pub struct BarycentricRasterizer;

impl BarycentricRasterizer {
    pub fn new() -> Self {
        BarycentricRasterizer
    }

    /// Fills `triangle` into `buffer`, shading each visible pixel.
    ///
    /// Returns the number of pixels that passed the depth test and were
    /// written.
    pub fn fill_triangle<S: PixelShader>(
        &self,
        triangle: &Triangle,
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> usize {
        if buffer.width() == 0 || buffer.height() == 0 {
            return 0;
        }
        let [v0, v1, v2] = triangle.points;

        // Bounding box, clamped to the buffer
        let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0) as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0) as i32;
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(buffer.width() as i32 - 1);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(buffer.height() as i32 - 1);

        let mut written = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec3::new(x as f32, y as f32, 0.0);
                let Some(lambda) = barycentric(&triangle.points, p) else {
                    // Degenerate: no point of the scan can be inside.
                    return written;
                };
                if lambda.iter().any(|&w| w < 0.0) {
                    continue;
                }

                let depth = lambda[0] * v0.z + lambda[1] * v1.z + lambda[2] * v2.z;
                if buffer.test_and_set_depth(x, y, depth) {
                    buffer.set_pixel(x, y, shader.shade(lambda));
                    written += 1;
                }
            }
        }
        written
    }
}
