//! Owned color and depth buffers for one render pass.
//!
//! Provides the [`Renderer`] struct which owns the buffers, draws lines for
//! wireframes and exports the result as an image.
//!
//! # Orientation
//!
//! Row 0 of the buffers is the bottom of the picture: rasterization treats
//! increasing y as up. [`Renderer::to_image`] flips rows so the exported
//! image has the usual top-left origin.

use std::path::Path;

use image::RgbaImage;

use super::framebuffer::FrameBuffer;
use crate::colors::unpack_rgba;
use crate::error::{RenderError, RenderResult};

/// Depth bias so wireframes render slightly in front of filled triangles.
const WIREFRAME_DEPTH_BIAS: f32 = 1e-4;

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl Renderer {
    /// Allocates `width * height` pixels. Callers size the canvas through
    /// [`Projection`](crate::projection::Projection), which bounds it.
    pub fn new(width: u32, height: u32, background: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![background; size],
            depth_buffer: vec![f32::NEG_INFINITY; size],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at (x, y) in buffer coordinates (y up), or None if out of
    /// bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height)
            .then(|| self.color_buffer[self.offset(x, y)])
    }

    /// Stored depth at (x, y), or None if out of bounds.
    pub fn depth(&self, x: u32, y: u32) -> Option<f32> {
        (x < self.width && y < self.height)
            .then(|| self.depth_buffer[self.offset(x, y)])
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Draws a line between two points using Bresenham's line algorithm with
    /// depth testing.
    ///
    /// For each step along the major axis, an error term decides whether to
    /// also step along the minor axis. Depth is interpolated linearly along
    /// the line and biased toward the viewer.
    pub fn draw_line_bresenham(
        &mut self,
        x0: i32,
        y0: i32,
        z0: f32,
        x1: i32,
        y1: i32,
        z1: f32,
        color: u32,
    ) {
        let mut fb = self.as_framebuffer();

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let steps = dx.max(dy);
        if steps == 0 {
            fb.set_pixel_with_depth(x0, y0, z0 + WIREFRAME_DEPTH_BIAS, color);
            return;
        }

        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        // Positive error favors x movement, negative favors y.
        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;
        let mut step = 0;

        loop {
            let t = step as f32 / steps as f32;
            let depth = z0 + t * (z1 - z0) + WIREFRAME_DEPTH_BIAS;
            fb.set_pixel_with_depth(x, y, depth, color);

            if x == x1 && y == y1 {
                break;
            }
            step += 1;

            // Both conditions can hold, giving a diagonal step.
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }
            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }

    /// Converts the color buffer to an RGBA image, flipped vertically.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let row = self.height - 1 - y;
            image::Rgba(unpack_rgba(self.color_buffer[self.offset(x, row)]))
        })
    }

    /// Encodes the flipped image as PNG at `path`.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| RenderError::Image {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffers_are_cleared() {
        let renderer = Renderer::new(3, 2, 0xFF12_3456);
        assert_eq!(renderer.pixel(2, 1), Some(0xFF12_3456));
        assert_eq!(renderer.depth(0, 0), Some(f32::NEG_INFINITY));
        assert_eq!(renderer.pixel(3, 0), None);
    }

    #[test]
    fn export_flips_rows() {
        let mut renderer = Renderer::new(2, 2, 0);
        renderer.as_framebuffer().set_pixel(0, 0, 0xFFFF_0000);
        let img = renderer.to_image();
        // Buffer row 0 is the bottom of the image.
        assert_eq!(img.get_pixel(0, 1).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn bresenham_covers_both_endpoints() {
        let mut renderer = Renderer::new(10, 10, 0);
        renderer.draw_line_bresenham(1, 1, 0.0, 8, 4, 0.0, 0xFFFF_FFFF);
        assert_eq!(renderer.pixel(1, 1), Some(0xFFFF_FFFF));
        assert_eq!(renderer.pixel(8, 4), Some(0xFFFF_FFFF));
        let drawn = renderer.color_buffer().iter().filter(|&&c| c != 0).count();
        assert_eq!(drawn, 8);
    }

    #[test]
    fn bresenham_respects_depth() {
        let mut renderer = Renderer::new(10, 1, 0);
        renderer
            .as_framebuffer()
            .set_pixel_with_depth(5, 0, 10.0, 0xFF00_FF00);
        renderer.draw_line_bresenham(0, 0, 0.0, 9, 0, 0.0, 0xFFFF_FFFF);
        assert_eq!(renderer.pixel(5, 0), Some(0xFF00_FF00));
        assert_eq!(renderer.pixel(4, 0), Some(0xFFFF_FFFF));
    }
}
