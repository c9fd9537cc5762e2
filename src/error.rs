//! Error types for loading, transforming and rendering a mesh.

use std::path::PathBuf;

use thiserror::Error;

/// Structural problems with mesh data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// The mesh contains no vertices, so no extents exist.
    #[error("Mesh has no vertices")]
    NoVertices,

    /// A face refers to a vertex that does not exist.
    #[error("Face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A face refers to a texture coordinate that does not exist.
    #[error(
        "Face {face} references texture coordinate {index} but the mesh has {texcoord_count}"
    )]
    TextureIndexOutOfRange {
        face: usize,
        index: u32,
        texcoord_count: usize,
    },

    /// Texture indices were attached to a face that was never added.
    #[error("Texture indices given for face {face} but the mesh has {face_count} faces")]
    TextureForMissingFace { face: usize, face_count: usize },

    /// The vertical extent is zero, so the aspect ratio is undefined.
    #[error("Mesh has zero height extent; aspect ratio is undefined")]
    ZeroHeightExtent,
}

/// Result type for mesh construction.
pub type MeshResult<T> = std::result::Result<T, MeshError>;

/// Errors raised while reading a mesh file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read mesh {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OBJ parser rejected the file.
    #[error("Failed to parse mesh {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// The file parsed but the resulting mesh is not usable.
    #[error("Invalid mesh {path}: {source}")]
    Mesh {
        path: PathBuf,
        #[source]
        source: MeshError,
    },
}

/// Camera configurations that cannot produce an orthonormal basis.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CameraError {
    /// `eye - center` has zero length.
    #[error("Camera eye and center coincide; view direction is undefined")]
    CoincidentEyeCenter,

    /// `up` is parallel to the view direction.
    #[error("Camera up vector is parallel to the view direction")]
    UpParallelToView,
}

/// Errors raised by a render pass.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// The derived canvas has no pixels.
    #[error("Canvas of {width}x{height} pixels is empty")]
    EmptyCanvas { width: u32, height: u32 },

    /// The derived canvas exceeds [`MAX_CANVAS_PIXELS`](crate::projection::MAX_CANVAS_PIXELS).
    #[error("Canvas of {width}x{height} pixels exceeds the pixel limit")]
    CanvasTooLarge { width: u32, height: u32 },

    /// The projection scale must be positive and finite.
    #[error("Invalid projection scale: {0} (must be > 0)")]
    InvalidScale(f32),

    /// The specular coefficient must be non-negative and finite.
    #[error("Invalid specular coefficient: {0} (must be >= 0)")]
    InvalidSpecular(f32),

    /// The light direction has zero length.
    #[error("Light direction has zero length")]
    DegenerateLight,

    /// Encoding or writing the output image failed.
    #[error("Failed to write image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Result type for render operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}
