// src/lib.rs
//! Alcove
//!
//! A fixed-scene 3D renderer built on wgpu and winit: a textured room,
//! two loaded meshes, primitive solids and a three-light Phong shading
//! model, with a free-fly camera driven by the keyboard.

pub mod app;
pub mod error;
pub mod gfx;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::AlcoveApp;
pub use error::RenderError;

/// Creates the application with the fixed scene assembled.
pub fn default() -> error::Result<AlcoveApp> {
    AlcoveApp::new()
}
