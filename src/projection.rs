//! Orthographic projection from camera space to pixel space.
//!
//! Projection happens in two steps:
//!
//! 1. [`normalize_centered_cube`] maps x/y from the mesh extents to `[0, 1]`.
//! 2. [`Projection::world_to_screen`] maps `[0, 1]` to pixels:
//!    `screen = dimension * ((normalized - 0.5) / scale + 0.5)`, truncated.
//!
//! z is carried through untouched and only feeds the depth test.

use crate::error::{RenderError, RenderResult};
use crate::math::vec3::Vec3;
use crate::mesh::Extents;

/// Maps x/y of `v` from `extents` to the unit square. z is unchanged.
///
/// `extents` is the bounding box of the untransformed mesh, not of the
/// rotated vertices, so rotated geometry may fall outside `[0, 1]`.
#[inline]
pub fn normalize_centered_cube(v: Vec3, extents: &Extents) -> Vec3 {
    Vec3::new(
        (v.x - extents.min_x) / extents.width(),
        (v.y - extents.min_y) / extents.height(),
        v.z,
    )
}

/// Largest canvas, in pixels, a render pass will allocate.
///
/// A very wide or very flat mesh turns into an extreme aspect ratio; this
/// bounds the buffers such a mesh can request.
pub const MAX_CANVAS_PIXELS: usize = 1 << 26;

/// Canvas size and zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    width: u32,
    height: u32,
    /// Values above 1 shrink the model inside the canvas.
    scale: f32,
}

impl Projection {
    /// Creates a projection for a `width` x `height` canvas of at most
    /// [`MAX_CANVAS_PIXELS`] pixels.
    pub fn new(width: u32, height: u32, scale: f32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyCanvas { width, height });
        }
        match (width as usize).checked_mul(height as usize) {
            Some(pixels) if pixels <= MAX_CANVAS_PIXELS => {}
            _ => return Err(RenderError::CanvasTooLarge { width, height }),
        }
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(RenderError::InvalidScale(scale));
        }
        Ok(Self {
            width,
            height,
            scale,
        })
    }

    /// Creates a projection whose width follows the mesh aspect ratio:
    /// `width = trunc(aspect * height)`. The float-to-int cast saturates, so
    /// an extreme aspect ratio ends in `CanvasTooLarge` or `EmptyCanvas`.
    pub fn for_extents(extents: &Extents, height: u32, scale: f32) -> RenderResult<Self> {
        let aspect = extents.aspect_ratio()?;
        let width = (aspect * height as f32) as u32;
        Self::new(width, height, scale)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Maps a unit-square point to integer pixel coordinates.
    ///
    /// x and y are truncated toward zero; z passes through.
    #[inline]
    pub fn world_to_screen(&self, normalized: Vec3) -> Vec3 {
        let x = self.width as f32 * ((normalized.x - 0.5) / self.scale + 0.5);
        let y = self.height as f32 * ((normalized.y - 0.5) / self.scale + 0.5);
        Vec3::new(x.trunc(), y.trunc(), normalized.z)
    }

    /// Normalizes against `extents` and maps to pixels in one step.
    #[inline]
    pub fn project(&self, v: Vec3, extents: &Extents) -> Vec3 {
        self.world_to_screen(normalize_centered_cube(v, extents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn symmetric_extents() -> Extents {
        let mut extents = Extents::EMPTY;
        extents.include(-1.0, -2.0);
        extents.include(1.0, 2.0);
        extents
    }

    #[test]
    fn normalize_maps_extents_to_unit_square() {
        let extents = symmetric_extents();
        let low = normalize_centered_cube(Vec3::new(-1.0, -2.0, 7.0), &extents);
        let high = normalize_centered_cube(Vec3::new(1.0, 2.0, -7.0), &extents);
        assert_eq!(low, Vec3::new(0.0, 0.0, 7.0));
        assert_eq!(high, Vec3::new(1.0, 1.0, -7.0));
    }

    #[test]
    fn canvas_width_follows_aspect_ratio() {
        let projection = Projection::for_extents(&symmetric_extents(), 1000, 1.0).unwrap();
        assert_eq!(projection.width(), 500);
        assert_eq!(projection.height(), 1000);
    }

    fn extents(width: f32, height: f32) -> Extents {
        let mut extents = Extents::EMPTY;
        extents.include(0.0, 0.0);
        extents.include(width, height);
        extents
    }

    #[test]
    fn very_wide_extents_are_rejected() {
        // Aspect 5000 at height 1000 asks for five billion pixels.
        let result = Projection::for_extents(&extents(10.0, 0.002), 1000, 1.5);
        assert!(matches!(
            result,
            Err(RenderError::CanvasTooLarge { height: 1000, .. })
        ));
        assert!(matches!(
            Projection::for_extents(&extents(1.0e30, 1.0), 1000, 1.5),
            Err(RenderError::CanvasTooLarge { width: u32::MAX, .. })
        ));
    }

    #[test]
    fn very_tall_extents_truncate_to_empty() {
        let result = Projection::for_extents(&extents(0.0001, 1.0), 1000, 1.5);
        assert!(matches!(
            result,
            Err(RenderError::EmptyCanvas { width: 0, height: 1000 })
        ));
    }

    #[test]
    fn pixel_limit_is_inclusive() {
        assert!(Projection::new(1 << 13, 1 << 13, 1.0).is_ok());
        assert!(matches!(
            Projection::new((1 << 13) + 1, 1 << 13, 1.0),
            Err(RenderError::CanvasTooLarge { .. })
        ));
    }

    #[test]
    fn unit_scale_fills_canvas() {
        let projection = Projection::new(200, 100, 1.0).unwrap();
        assert_eq!(
            projection.world_to_screen(Vec3::new(0.0, 0.0, 0.25)),
            Vec3::new(0.0, 0.0, 0.25)
        );
        assert_eq!(
            projection.world_to_screen(Vec3::new(1.0, 1.0, 0.0)),
            Vec3::new(200.0, 100.0, 0.0)
        );
    }

    #[test]
    fn larger_scale_shrinks_toward_center() {
        let projection = Projection::new(100, 100, 2.0).unwrap();
        let low = projection.world_to_screen(Vec3::new(0.0, 0.0, 0.0));
        let high = projection.world_to_screen(Vec3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(low.x, 25.0);
        assert_relative_eq!(high.x, 75.0);
        let center = projection.world_to_screen(Vec3::new(0.5, 0.5, 0.0));
        assert_relative_eq!(center.y, 50.0);
    }

    #[test]
    fn coordinates_are_truncated() {
        let projection = Projection::new(10, 10, 1.0).unwrap();
        let p = projection.world_to_screen(Vec3::new(0.37, 0.99, 1.5));
        assert_eq!(p, Vec3::new(3.0, 9.0, 1.5));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(matches!(
            Projection::new(0, 10, 1.0),
            Err(RenderError::EmptyCanvas { width: 0, .. })
        ));
        assert!(matches!(
            Projection::new(10, 10, 0.0),
            Err(RenderError::InvalidScale(_))
        ));
        assert!(matches!(
            Projection::new(10, 10, f32::NAN),
            Err(RenderError::InvalidScale(_))
        ));
    }
}
