//! Resource management: materials, lights, textures, loaded models, and
//! the frame-global uniform bindings.

pub mod frame_bindings;
pub mod lights;
pub mod material;
pub mod model;
pub mod texture_resource;

pub use frame_bindings::{FrameBindings, FrameUBO};
pub use lights::{Light, LightRig};
pub use material::Material;
pub use model::LoadedMesh;
pub use texture_resource::TextureResource;
