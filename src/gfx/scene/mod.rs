//! # Scene Management Module
//!
//! The fixed scene and its building blocks: scene objects with placements
//! and materials, the vertex formats, and the per-frame draw plan.

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{ObjectHandle, SceneObject};
pub use scene::{DrawCommand, Scene};
pub use vertex::{VertexLayout, VertexN, VertexNT};
