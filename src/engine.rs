//! Core rendering pipeline.
//!
//! The [`Engine`] drives one render pass per call:
//!
//! 1. Rotate the mesh into camera space ([`Camera::view`])
//! 2. Size the canvas from the mesh aspect ratio ([`Projection::for_extents`])
//! 3. For each face: project its corners, pick a shader, rasterize
//! 4. Optionally draw face edges on top
//!
//! The returned [`Frame`] owns the pixels; nothing persists between calls.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;
use crate::mesh::{CenteredMesh, ViewMesh};
use crate::projection::Projection;
use crate::render::rasterizer::{
    BarycentricRasterizer, FlatShader, GouraudShader, PhongShader, Surface, Triangle,
};
use crate::render::Renderer;
use crate::texture::Texture;

/// Lighting model used for filled triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// One intensity per face from the face normal.
    Flat,
    /// Per-vertex intensities interpolated across the face.
    Gouraud,
    /// Per-pixel lighting from interpolated vertex normals.
    #[default]
    Phong,
}

/// What to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Shaded triangles only.
    #[default]
    Filled,
    /// Face edges only.
    Wireframe,
    /// Shaded triangles with edges drawn over them.
    FilledWireframe,
}

impl RenderMode {
    fn draws_filled(self) -> bool {
        matches!(self, RenderMode::Filled | RenderMode::FilledWireframe)
    }

    fn draws_wireframe(self) -> bool {
        matches!(self, RenderMode::Wireframe | RenderMode::FilledWireframe)
    }
}

/// Counters collected during one render pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Faces handed to the rasterizer.
    pub triangles: usize,
    /// Faces skipped because they have no screen-space area.
    pub degenerate: usize,
    /// Pixels that passed the depth test and were written.
    pub pixels: usize,
    /// Faces shaded from the texture rather than the fill color.
    pub textured: usize,
}

/// Result of a render pass.
pub struct Frame {
    pub renderer: Renderer,
    pub stats: RenderStats,
}

/// Loads an optional texture, falling back to `None` with a warning when
/// the file cannot be read or decoded.
pub fn load_texture(path: Option<&Path>) -> Option<Texture> {
    let path = path?;
    match Texture::from_file(path) {
        Ok(texture) => {
            info!(
                path = %path.display(),
                width = texture.width(),
                height = texture.height(),
                "Loaded texture"
            );
            Some(texture)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Texture unavailable, using fill color");
            None
        }
    }
}

pub struct Engine {
    config: RenderConfig,
    light: DirectionalLight,
    camera: Camera,
    rasterizer: BarycentricRasterizer,
}

impl Engine {
    /// Validates `config` and prepares the light and camera.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        let light = DirectionalLight::new(config.light_direction)?;
        let camera = config.camera();
        // Fail early on a degenerate camera.
        camera.basis()?;
        Ok(Self {
            config,
            light,
            camera,
            rasterizer: BarycentricRasterizer::new(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders `mesh` with the configured camera, light and shading.
    ///
    /// A texture is used only for faces that carry UV indices; every other
    /// face gets the fill color.
    pub fn render(&self, mesh: &CenteredMesh, texture: Option<&Texture>) -> RenderResult<Frame> {
        let view = self.camera.view(mesh)?;
        let projection =
            Projection::for_extents(&mesh.extents(), self.config.height, self.config.scale)?;

        info!(
            width = projection.width(),
            height = projection.height(),
            faces = mesh.face_count(),
            shading = ?self.config.shading,
            mode = ?self.config.mode,
            "Rendering"
        );
        if texture.is_some() && !mesh.has_texture_coords() {
            warn!("Mesh has no texture coordinates, using fill color");
        }

        let mut renderer = Renderer::new(
            projection.width(),
            projection.height(),
            self.config.background_argb(),
        );
        let screen = self.project_vertices(&view, &projection);

        let mut stats = RenderStats::default();
        if self.config.mode.draws_filled() {
            self.fill_faces(&view, &screen, texture, &mut renderer, &mut stats);
        }
        if self.config.mode.draws_wireframe() {
            self.draw_edges(mesh, &screen, &mut renderer);
        }

        info!(
            triangles = stats.triangles,
            degenerate = stats.degenerate,
            pixels = stats.pixels,
            textured = stats.textured,
            "Render complete"
        );
        Ok(Frame { renderer, stats })
    }

    /// Screen-space position of every vertex.
    fn project_vertices(&self, view: &ViewMesh, projection: &Projection) -> Vec<Vec3> {
        let extents = view.mesh().extents();
        view.vertices()
            .iter()
            .map(|&v| projection.project(v, &extents))
            .collect()
    }

    fn fill_faces(
        &self,
        view: &ViewMesh,
        screen: &[Vec3],
        texture: Option<&Texture>,
        renderer: &mut Renderer,
        stats: &mut RenderStats,
    ) {
        let fill = self.config.fill_argb();
        let k = self.config.specular;
        let mut fb = renderer.as_framebuffer();

        for (i, face) in view.mesh().faces().iter().enumerate() {
            let [a, b, c] = face.indices();
            let triangle = Triangle::new([screen[a], screen[b], screen[c]]);
            if triangle.is_degenerate() {
                stats.degenerate += 1;
                continue;
            }
            stats.triangles += 1;

            let surface = match (texture, view.face_uvs(i)) {
                (Some(texture), Some(uvs)) => {
                    stats.textured += 1;
                    Surface::Textured { texture, uvs }
                }
                _ => Surface::Fill(fill),
            };

            stats.pixels += match self.config.shading {
                ShadingMode::Flat => {
                    let shader = FlatShader::new(surface, view.face_normals()[i], &self.light, k);
                    self.rasterizer.fill_triangle(&triangle, &mut fb, &shader)
                }
                ShadingMode::Gouraud => {
                    let shader =
                        GouraudShader::new(surface, view.face_vertex_normals(i), &self.light, k);
                    self.rasterizer.fill_triangle(&triangle, &mut fb, &shader)
                }
                ShadingMode::Phong => {
                    let shader =
                        PhongShader::new(surface, view.face_vertex_normals(i), &self.light, k);
                    self.rasterizer.fill_triangle(&triangle, &mut fb, &shader)
                }
            };
        }
        debug!(degenerate = stats.degenerate, "Filled faces");
    }

    fn draw_edges(&self, mesh: &CenteredMesh, screen: &[Vec3], renderer: &mut Renderer) {
        let color = self.config.wireframe_argb();
        for face in mesh.faces() {
            let indices = face.indices();
            for j in 0..3 {
                let p0 = screen[indices[j]];
                let p1 = screen[indices[(j + 1) % 3]];
                renderer.draw_line_bresenham(
                    p0.x as i32,
                    p0.y as i32,
                    p0.z,
                    p1.x as i32,
                    p1.y as i32,
                    p1.z,
                    color,
                );
            }
        }
    }
}
