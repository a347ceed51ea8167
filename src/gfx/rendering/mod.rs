//! Rendering: pipeline construction and the per-frame draw sequencing.

pub mod pipelines;
pub mod render_engine;

pub use pipelines::Pipelines;
pub use render_engine::RenderEngine;
