//! Small vector types used throughout the pipeline.

pub mod vec2;
pub mod vec3;
