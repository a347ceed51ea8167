//! Frame-global uniform bindings
//!
//! One uniform block, bound at group 0 in both pipelines, carries everything
//! that is shared by every draw in a frame: the view and projection
//! matrices, the eye position, and the three view-space lights. The block is
//! rewritten before each frame from the current camera and light rig, so no
//! draw ever sees stale camera state.

use crate::{
    gfx::camera::view_camera::ViewCamera,
    gfx::resources::lights::{LightRig, LightUniform, LIGHT_COUNT},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Frame-global uniform buffer content.
///
/// MUST match the `FrameUniform` struct in the shader exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct FrameUBOContent {
    /// World-to-view transform
    view: [[f32; 4]; 4],
    /// Perspective projection
    projection: [[f32; 4]; 4],
    /// Origin transformed through the view matrix — a position vector,
    /// deliberately never the matrix itself
    eye_position: [f32; 4],
    /// View-space lights
    lights: [LightUniform; LIGHT_COUNT],
}
// Total: 64 + 64 + 16 + 3*64 = 336 bytes, no implicit padding

unsafe impl bytemuck::Pod for FrameUBOContent {}
unsafe impl bytemuck::Zeroable for FrameUBOContent {}

/// Type alias for the frame-global uniform buffer
pub type FrameUBO = UniformBuffer<FrameUBOContent>;

/// Writes the current camera and light state into the frame uniform buffer.
pub fn update_frame_ubo(
    ubo: &mut FrameUBO,
    queue: &wgpu::Queue,
    camera: &ViewCamera,
    lights: &LightRig,
) {
    let content = FrameUBOContent {
        view: (*camera.view_matrix()).into(),
        projection: (*camera.projection_matrix()).into(),
        eye_position: camera.eye_position().into(),
        lights: lights.to_uniforms(),
    };
    ubo.update_content(queue, content);
}

/// Manages the bind group layout and bind group for the frame globals.
///
/// Bound to slot 0 in every render pipeline.
pub struct FrameBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl FrameBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Frame Bind Group Layout");

        FrameBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer.
    ///
    /// Must be called once after the buffer exists and before rendering.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &FrameUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Frame Bind Group"),
        );
    }

    /// Returns the bind group layout for pipeline creation.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// Returns the bind group for rendering.
    ///
    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_block_has_the_documented_size() {
        assert_eq!(std::mem::size_of::<FrameUBOContent>(), 336);
    }
}
