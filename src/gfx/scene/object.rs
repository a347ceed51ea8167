//! Scene objects
//!
//! A [`SceneObject`] ties one registered mesh to its placement, material and
//! optional texture slot, and owns the per-object uniform buffer its draws
//! read from. Every object has its own buffer, so the full material +
//! transform push that precedes a draw can never bleed into another
//! object's draw call.

use cgmath::{Matrix4, Rad, Vector3};

use crate::{
    gfx::registry::MeshHandle,
    gfx::resources::material::{Material, MaterialUniform},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutWithDesc},
        uniform_buffer::UniformBuffer,
    },
};

/// Identifies an object within the scene's fixed draw order.
pub type ObjectHandle = usize;

/// Per-object uniform block: composed model matrix plus material.
///
/// MUST match the `ObjectUniform` struct in the shader exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct ObjectUBOContent {
    model: [[f32; 4]; 4],
    material: MaterialUniform,
}
// Total: 64 + 48 = 112 bytes, no implicit padding

unsafe impl bytemuck::Pod for ObjectUBOContent {}
unsafe impl bytemuck::Zeroable for ObjectUBOContent {}

type ObjectUBO = UniformBuffer<ObjectUBOContent>;

/// GPU resources owned by one object.
pub struct ObjectGpuResources {
    ubo: ObjectUBO,
    bind_group: wgpu::BindGroup,
}

pub struct SceneObject {
    pub name: String,
    pub mesh: MeshHandle,
    /// Placement; for anchored objects this is relative to the anchor.
    pub transform: Matrix4<f32>,
    /// Object whose placement composes under this one's transform.
    pub anchor: Option<ObjectHandle>,
    pub material: Material,
    /// Index into the scene's texture table; `None` draws untextured.
    pub texture: Option<usize>,
    gpu: Option<ObjectGpuResources>,
}

impl SceneObject {
    pub fn new(
        name: &str,
        mesh: MeshHandle,
        transform: Matrix4<f32>,
        material: Material,
    ) -> Self {
        Self {
            name: name.to_string(),
            mesh,
            transform,
            anchor: None,
            material,
            texture: None,
            gpu: None,
        }
    }

    pub fn with_anchor(mut self, anchor: ObjectHandle) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_texture(mut self, slot: usize) -> Self {
        self.texture = Some(slot);
        self
    }

    /// Current translation component of the placement.
    pub fn translation(&self) -> Vector3<f32> {
        self.transform.w.truncate()
    }

    /// Spins the object about its own origin, leaving its position fixed.
    ///
    /// The translation is read from the CURRENT transform on every call:
    /// translate to the origin, rotate, translate back. Repeated calls keep
    /// rotating about the same stationary center.
    pub fn rotate_yaw_in_place(&mut self, angle: Rad<f32>) {
        let t = self.translation();
        self.transform = Matrix4::from_translation(t)
            * Matrix4::from_angle_y(angle)
            * Matrix4::from_translation(-t)
            * self.transform;
    }

    /// Creates the object's uniform buffer and bind group.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &BindGroupLayoutWithDesc) {
        let ubo = ObjectUBO::new(device);
        let bind_group = BindGroupBuilder::new(layout)
            .resource(ubo.binding_resource())
            .create(device, &format!("{} Bind Group", self.name));
        self.gpu = Some(ObjectGpuResources { ubo, bind_group });
    }

    /// Pushes the composed model matrix and material for this frame's draw.
    pub fn push_uniforms(
        &mut self,
        queue: &wgpu::Queue,
        model: Matrix4<f32>,
        material: MaterialUniform,
    ) {
        let content = ObjectUBOContent {
            model: model.into(),
            material,
        };
        if let Some(gpu) = &mut self.gpu {
            gpu.ubo.update_content(queue, content);
        }
    }

    /// Bind group for rendering; `None` until GPU resources exist.
    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    fn test_object(transform: Matrix4<f32>) -> SceneObject {
        SceneObject::new("statue", 0, transform, Material::bronze())
    }

    #[test]
    fn rotation_in_place_keeps_the_translation_fixed() {
        let start = Vector3::new(0.0, 2.5, -5.0);
        let mut object = test_object(Matrix4::from_translation(start));
        for _ in 0..100 {
            object.rotate_yaw_in_place(Rad(-0.025));
        }
        let t = object.translation();
        assert!((t.x - start.x).abs() < 1e-4);
        assert!((t.y - start.y).abs() < 1e-4);
        assert!((t.z - start.z).abs() < 1e-4);
    }

    #[test]
    fn n_small_rotations_equal_one_large_rotation() {
        let placement = Matrix4::from_translation(Vector3::new(0.0, 2.5, -5.0));
        let mut stepped = test_object(placement);
        for _ in 0..10 {
            stepped.rotate_yaw_in_place(Rad(0.025));
        }
        let mut single = test_object(placement);
        single.rotate_yaw_in_place(Rad(0.25));

        let a: &[f32; 16] = stepped.transform.as_ref();
        let b: &[f32; 16] = single.transform.as_ref();
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-4, "{x} vs {y}");
        }
    }

    #[test]
    fn rotation_about_the_origin_is_a_plain_rotation() {
        let mut object = test_object(Matrix4::identity());
        object.rotate_yaw_in_place(Rad(0.5));
        let expected = Matrix4::from_angle_y(Rad(0.5));
        let a: &[f32; 16] = object.transform.as_ref();
        let b: &[f32; 16] = expected.as_ref();
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn object_block_has_the_documented_size() {
        assert_eq!(std::mem::size_of::<ObjectUBOContent>(), 112);
    }
}
