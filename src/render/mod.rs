//! Rendering surfaces and triangle rasterization.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{BarycentricRasterizer, PixelShader, Triangle};
pub use renderer::Renderer;
