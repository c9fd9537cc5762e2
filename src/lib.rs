//! A CPU software rasterizer for triangle meshes.
//!
//! A mesh is loaded from OBJ, centered, viewed from an orbiting camera,
//! projected orthographically onto a canvas sized by its aspect ratio, and
//! shaded with flat, Gouraud or Phong lighting from one directional light.
//! The result is written as a PNG.
//!
//! # Quick Start
//!
//! ```no_run
//! use shadery::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (mesh, _report) = load_obj("model.obj")?;
//! let engine = Engine::new(RenderConfig::default())?;
//! let frame = engine.render(&mesh.center_align(), None)?;
//! frame.renderer.save_png("render.png")?;
//! # Ok(())
//! # }
//! ```

pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod light;
pub mod loader;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod texture;

pub use camera::Camera;
pub use config::RenderConfig;
pub use engine::{Engine, Frame, RenderMode, RenderStats, ShadingMode};
pub use error::{CameraError, ConfigError, LoadError, MeshError, RenderError};
pub use loader::{load_obj, load_obj_from_reader, LoadReport};
pub use mesh::{CenteredMesh, MeshBuilder, RawMesh};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::config::RenderConfig;
    pub use crate::engine::{load_texture, Engine, Frame, RenderMode, ShadingMode};
    pub use crate::light::DirectionalLight;
    pub use crate::loader::{load_obj, load_obj_from_reader};
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::mesh::{CenteredMesh, Face, MeshBuilder, RawMesh};
    pub use crate::texture::Texture;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::rasterizer::{
        BarycentricRasterizer, FlatShader, GouraudShader, PhongShader, Surface, Triangle,
    };
    pub use crate::render::FrameBuffer;
}
