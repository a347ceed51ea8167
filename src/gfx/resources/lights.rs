//! The scene's three-light rig
//!
//! Three point lights with fixed world positions and ambient/diffuse/
//! specular intensities. The shader consumes view-space light positions, so
//! the rig recomputes them from the current view transform on every camera
//! change — positions are never derived from a stale view.

use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix4, Vector4};

/// Number of lights in the rig, fixed for the session.
pub const LIGHT_COUNT: usize = 3;

/// A point light: world position plus the three Phong intensity triples.
#[derive(Clone, Debug)]
pub struct Light {
    /// World-space position, homogeneous w = 1
    pub position: Vector4<f32>,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

/// GPU block of one light, padded to vec4 rows; position is in view space.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

/// The fixed rig of three lights and their current view-space positions.
pub struct LightRig {
    lights: [Light; LIGHT_COUNT],
    view_positions: [Vector4<f32>; LIGHT_COUNT],
}

impl LightRig {
    /// The scene's rig: blue, red and green key lights above the room,
    /// each with a faint red ambient term and white speculars.
    pub fn new() -> Self {
        let lights = [
            Light {
                position: Vector4::new(-4.0, 6.0, -8.5, 1.0),
                ambient: [0.1, 0.0, 0.0],
                diffuse: [0.0, 0.0, 1.0],
                specular: [1.0, 1.0, 1.0],
            },
            Light {
                position: Vector4::new(0.0, 6.0, -8.0, 1.0),
                ambient: [0.1, 0.0, 0.0],
                diffuse: [1.0, 0.0, 0.0],
                specular: [1.0, 1.0, 1.0],
            },
            Light {
                position: Vector4::new(4.0, 6.0, -8.5, 1.0),
                ambient: [0.1, 0.0, 0.0],
                diffuse: [0.0, 1.0, 0.0],
                specular: [1.0, 1.0, 1.0],
            },
        ];
        let view_positions = [lights[0].position, lights[1].position, lights[2].position];
        Self {
            lights,
            view_positions,
        }
    }

    pub fn lights(&self) -> &[Light; LIGHT_COUNT] {
        &self.lights
    }

    /// Recomputes every light's view-space position from the given view
    /// transform. Must be called after each camera mutation and once at
    /// load.
    pub fn recompute_view_space(&mut self, view: &Matrix4<f32>) {
        for (staged, light) in self.view_positions.iter_mut().zip(&self.lights) {
            *staged = view * light.position;
        }
    }

    /// Current view-space position of light `index`.
    pub fn view_position(&self, index: usize) -> Vector4<f32> {
        self.view_positions[index]
    }

    /// The rig as the shader expects it.
    pub fn to_uniforms(&self) -> [LightUniform; LIGHT_COUNT] {
        std::array::from_fn(|i| {
            let light = &self.lights[i];
            LightUniform {
                position: self.view_positions[i].into(),
                ambient: [light.ambient[0], light.ambient[1], light.ambient[2], 0.0],
                diffuse: [light.diffuse[0], light.diffuse[1], light.diffuse[2], 0.0],
                specular: [
                    light.specular[0],
                    light.specular[1],
                    light.specular[2],
                    0.0,
                ],
            }
        })
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector3};

    #[test]
    fn view_positions_follow_the_current_view_transform() {
        let mut rig = LightRig::new();
        let view = Matrix4::from_translation(Vector3::new(0.0, -3.5, 0.0));
        rig.recompute_view_space(&view);
        for i in 0..LIGHT_COUNT {
            let expected = view * rig.lights()[i].position;
            assert_eq!(rig.view_position(i), expected);
        }
    }

    #[test]
    fn recompute_discards_stale_positions() {
        let mut rig = LightRig::new();
        let first = Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0));
        let second = Matrix4::from_angle_y(cgmath::Rad(0.5)) * first;
        rig.recompute_view_space(&first);
        rig.recompute_view_space(&second);
        for i in 0..LIGHT_COUNT {
            let expected: [f32; 4] = (second * rig.lights()[i].position).into();
            let got: [f32; 4] = rig.view_position(i).into();
            for (g, e) in got.iter().zip(&expected) {
                assert!((g - e).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn identity_view_keeps_world_positions() {
        let mut rig = LightRig::new();
        rig.recompute_view_space(&Matrix4::identity());
        assert_eq!(rig.view_position(0), Vector4::new(-4.0, 6.0, -8.5, 1.0));
    }

    #[test]
    fn uniforms_carry_view_space_positions() {
        let mut rig = LightRig::new();
        let view = Matrix4::from_translation(Vector3::new(0.0, -3.5, 0.0));
        rig.recompute_view_space(&view);
        let uniforms = rig.to_uniforms();
        assert_eq!(uniforms[1].position, [0.0, 2.5, -8.0, 1.0]);
        assert_eq!(uniforms[2].diffuse, [0.0, 1.0, 0.0, 0.0]);
    }
}
