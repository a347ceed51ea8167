//! Phong material definitions
//!
//! A material carries the ambient/diffuse/specular reflectivity triples and
//! the shininess exponent consumed by the lighting shader. The fixed scene
//! uses a small set of named materials; the classic reflectivity tables are
//! kept under their usual names.

use bytemuck::{Pod, Zeroable};

/// Surface reflectivity description for the Phong lighting model.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    /// Shininess on the conventional 0..1 scale; scaled by 128 when pushed
    /// to the shader.
    pub shininess: f32,
}

/// GPU block of one material, padded to vec4 rows.
///
/// `specular[3]` carries the scaled shininess exponent.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MaterialUniform {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

impl Material {
    pub fn new(
        name: &str,
        ambient: [f32; 3],
        diffuse: [f32; 3],
        specular: [f32; 3],
        shininess: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Matte grey stone used for the room shell and the pyramid.
    pub fn stone() -> Self {
        Self::new(
            "stone",
            [0.0, 0.0, 0.0],
            [0.55, 0.55, 0.55],
            [0.7, 0.7, 0.7],
            0.25,
        )
    }

    /// Classic bronze, used for the statue.
    pub fn bronze() -> Self {
        Self::new(
            "bronze",
            [0.2125, 0.1275, 0.054],
            [0.714, 0.4284, 0.18144],
            [0.393548, 0.271906, 0.166721],
            0.2,
        )
    }

    /// Classic obsidian, used for the column.
    pub fn obsidian() -> Self {
        Self::new(
            "obsidian",
            [0.05375, 0.05, 0.06625],
            [0.18275, 0.17, 0.22525],
            [0.332741, 0.328634, 0.346435],
            0.1,
        )
    }

    /// Classic ruby, used for the cube.
    pub fn ruby() -> Self {
        Self::new(
            "ruby",
            [0.1745, 0.01175, 0.01175],
            [0.61424, 0.04136, 0.04136],
            [0.727811, 0.626959, 0.626959],
            0.6,
        )
    }

    /// The material as the shader expects it, shininess scaled to the
    /// 0..128 exponent range.
    pub fn to_uniform(&self) -> MaterialUniform {
        MaterialUniform {
            ambient: [self.ambient[0], self.ambient[1], self.ambient[2], 0.0],
            diffuse: [self.diffuse[0], self.diffuse[1], self.diffuse[2], 0.0],
            specular: [
                self.specular[0],
                self.specular[1],
                self.specular[2],
                self.shininess * 128.0,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shininess_is_scaled_into_the_exponent_slot() {
        let uniform = Material::stone().to_uniform();
        assert_eq!(uniform.specular[3], 0.25 * 128.0);
    }

    #[test]
    fn uniform_rows_carry_the_reflectivities() {
        let ruby = Material::ruby();
        let uniform = ruby.to_uniform();
        assert_eq!(&uniform.ambient[..3], &ruby.ambient[..]);
        assert_eq!(&uniform.diffuse[..3], &ruby.diffuse[..]);
        assert_eq!(&uniform.specular[..3], &ruby.specular[..]);
    }

    #[test]
    fn uniform_block_is_three_vec4_rows() {
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
    }
}
