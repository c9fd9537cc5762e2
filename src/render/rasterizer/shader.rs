//! Pixel shaders for triangle rasterization.
//!
//! This module provides a trait-based abstraction for per-pixel shading,
//! similar to how GPUs separate the fixed-function rasterizer from
//! programmable fragment shaders.
//!
//! # Architecture
//!
//! The rasterizer handles:
//! - Bounding box computation
//! - Barycentric coordinate calculation and the inside test
//! - Depth testing
//!
//! The shader handles:
//! - Attribute interpolation (intensities, normals, UVs)
//! - Texture sampling
//! - Final color computation via [`colors::shade`]
//!
//! # Lighting models
//!
//! | Shader | Evaluated | Interpolated |
//! |--------|-----------|--------------|
//! | [`FlatShader`] | once per face | nothing |
//! | [`GouraudShader`] | once per vertex | scalar intensities |
//! | [`PhongShader`] | once per pixel | normal vectors |

use crate::colors;
use crate::light::DirectionalLight;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// Trait for per-pixel shading computations.
///
/// The rasterizer calls `shade()` for each covered pixel that passes the
/// depth test, providing the barycentric coordinates for attribute
/// interpolation.
///
/// # Barycentric Coordinates
///
/// The `lambda` parameter contains three weights [λ₀, λ₁, λ₂] that:
/// - Sum to 1.0 for any point inside the triangle
/// - Represent the "influence" of each vertex on the current pixel
/// - Can be used to interpolate any per-vertex attribute:
///   `attr_at_pixel = λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`
pub trait PixelShader {
    /// Compute the ARGB color for a pixel given its barycentric coordinates.
    fn shade(&self, lambda: [f32; 3]) -> u32;
}

/// Where the unlit color of a pixel comes from.
#[derive(Clone, Copy)]
pub enum Surface<'a> {
    /// A single fill color for the whole triangle.
    Fill(u32),
    /// A texture sampled at affinely interpolated UVs.
    Textured {
        texture: &'a Texture,
        uvs: [Vec2; 3],
    },
}

impl Surface<'_> {
    #[inline]
    fn base_color(&self, lambda: [f32; 3]) -> u32 {
        match self {
            Surface::Fill(color) => *color,
            Surface::Textured { texture, uvs } => {
                let uv = uvs[0] * lambda[0] + uvs[1] * lambda[1] + uvs[2] * lambda[2];
                texture.sample(uv.x, uv.y)
            }
        }
    }
}

/// Combined light level `diffuse + k * specular` for one normal.
#[inline]
fn light_level(light: &DirectionalLight, normal: Vec3, specular_coefficient: f32) -> f32 {
    light.diffuse(normal) + specular_coefficient * light.specular(normal)
}

/// Flat shader - one light level for the whole triangle, from the face
/// normal.
pub struct FlatShader<'a> {
    surface: Surface<'a>,
    light_level: f32,
}

impl<'a> FlatShader<'a> {
    pub fn new(
        surface: Surface<'a>,
        face_normal: Vec3,
        light: &DirectionalLight,
        specular_coefficient: f32,
    ) -> Self {
        Self {
            surface,
            light_level: light_level(light, face_normal, specular_coefficient),
        }
    }
}

impl PixelShader for FlatShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        colors::shade(self.surface.base_color(lambda), self.light_level)
    }
}

/// Gouraud shader - lighting evaluated at the vertices, scalar intensities
/// interpolated across the triangle.
///
/// The raw Lambert terms are interpolated and the result clamped, so a
/// vertex facing away darkens its neighbourhood smoothly.
pub struct GouraudShader<'a> {
    surface: Surface<'a>,
    intensities: [f32; 3],
    speculars: [f32; 3],
    specular_coefficient: f32,
}

impl<'a> GouraudShader<'a> {
    pub fn new(
        surface: Surface<'a>,
        vertex_normals: [Vec3; 3],
        light: &DirectionalLight,
        specular_coefficient: f32,
    ) -> Self {
        Self {
            surface,
            intensities: vertex_normals.map(|n| light.intensity(n)),
            speculars: vertex_normals.map(|n| light.specular(n)),
            specular_coefficient,
        }
    }

    #[inline]
    fn interpolate(values: [f32; 3], lambda: [f32; 3]) -> f32 {
        lambda[0] * values[0] + lambda[1] * values[1] + lambda[2] * values[2]
    }
}

impl PixelShader for GouraudShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        let diffuse = Self::interpolate(self.intensities, lambda).max(0.0);
        let specular = Self::interpolate(self.speculars, lambda).max(0.0);
        let level = diffuse + self.specular_coefficient * specular;
        colors::shade(self.surface.base_color(lambda), level)
    }
}

/// Phong shader - vertex normals interpolated and re-normalized per pixel,
/// then diffuse and specular evaluated there.
pub struct PhongShader<'a> {
    surface: Surface<'a>,
    normals: [Vec3; 3],
    light: DirectionalLight,
    specular_coefficient: f32,
}

impl<'a> PhongShader<'a> {
    pub fn new(
        surface: Surface<'a>,
        vertex_normals: [Vec3; 3],
        light: &DirectionalLight,
        specular_coefficient: f32,
    ) -> Self {
        Self {
            surface,
            normals: vertex_normals,
            light: *light,
            specular_coefficient,
        }
    }
}

impl PixelShader for PhongShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        // Opposing normals can cancel out; such a pixel is unlit.
        let level = Vec3::blend(self.normals, lambda)
            .try_normalize()
            .map_or(0.0, |n| light_level(&self.light, n, self.specular_coefficient));
        colors::shade(self.surface.base_color(lambda), level)
    }
}
