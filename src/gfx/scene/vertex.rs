//! # Vertex Data Structures
//!
//! GPU-compatible vertex formats and the attribute-layout descriptor used
//! when registering geometry. Two interleave conventions exist in the scene:
//! an 8-float stride (position + normal + texture coordinate) for the room
//! shell, and a 6-float stride (position + normal) for loaded meshes and
//! untextured primitives.

/// One named attribute inside an interleaved vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AttributeSlot {
    /// Number of f32 components
    pub components: u32,
    /// Offset from the start of the vertex, in floats
    pub offset: u32,
    /// Whether the attribute is normalized when read by the shader
    pub normalize: bool,
}

/// Describes how a flat float array maps onto shader inputs.
///
/// The layout is the registry's unit of byte accounting: a host array of
/// `n` floats describes `n / stride` vertices and `n * 4` uploaded bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexLayout {
    /// Total floats per vertex
    pub stride: u32,
    pub position: AttributeSlot,
    pub normal: AttributeSlot,
    pub tex_coord: Option<AttributeSlot>,
}

/// Position + normal + texture coordinate, 8 floats per vertex.
pub const LAYOUT_POS_NORMAL_UV: VertexLayout = VertexLayout {
    stride: 8,
    position: AttributeSlot {
        components: 3,
        offset: 0,
        normalize: false,
    },
    normal: AttributeSlot {
        components: 3,
        offset: 3,
        normalize: true,
    },
    tex_coord: Some(AttributeSlot {
        components: 2,
        offset: 6,
        normalize: false,
    }),
};

/// Position + normal, 6 floats per vertex.
pub const LAYOUT_POS_NORMAL: VertexLayout = VertexLayout {
    stride: 6,
    position: AttributeSlot {
        components: 3,
        offset: 0,
        normalize: false,
    },
    normal: AttributeSlot {
        components: 3,
        offset: 3,
        normalize: true,
    },
    tex_coord: None,
};

impl VertexLayout {
    /// Number of vertices described by a flat float array in this layout.
    ///
    /// # Panics
    /// Panics if the array length is not a whole number of vertices; scene
    /// geometry is authored, so a remainder is a construction bug.
    pub fn vertex_count(&self, floats: &[f32]) -> u32 {
        assert!(
            floats.len() % self.stride as usize == 0,
            "vertex array length {} is not a multiple of stride {}",
            floats.len(),
            self.stride
        );
        (floats.len() / self.stride as usize) as u32
    }

    /// Byte length the device buffer must report after uploading `floats`.
    pub fn expected_bytes(&self, floats: &[f32]) -> u64 {
        (floats.len() * std::mem::size_of::<f32>()) as u64
    }
}

/// A vertex with position, normal and texture coordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VertexNT {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl VertexNT {
    /// Vertex buffer layout for the textured pipeline.
    ///
    /// - Attribute 0: position (Float32x3)
    /// - Attribute 1: normal (Float32x3)
    /// - Attribute 2: texture coordinate (Float32x2)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<VertexNT>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// A vertex with position and normal only.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VertexN {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl VertexN {
    /// Vertex buffer layout for the untextured pipeline.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<VertexN>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_their_strides() {
        assert_eq!(LAYOUT_POS_NORMAL_UV.stride, 8);
        assert_eq!(LAYOUT_POS_NORMAL.stride, 6);
        assert_eq!(LAYOUT_POS_NORMAL_UV.tex_coord.unwrap().offset, 6);
        assert!(LAYOUT_POS_NORMAL.tex_coord.is_none());
    }

    #[test]
    fn vertex_count_and_bytes() {
        let floats = vec![0.0f32; 32]; // four 8-float vertices
        assert_eq!(LAYOUT_POS_NORMAL_UV.vertex_count(&floats), 4);
        assert_eq!(LAYOUT_POS_NORMAL_UV.expected_bytes(&floats), 128);
    }

    #[test]
    #[should_panic]
    fn ragged_vertex_array_is_rejected() {
        let floats = vec![0.0f32; 7];
        LAYOUT_POS_NORMAL_UV.vertex_count(&floats);
    }

    #[test]
    fn gpu_vertex_sizes_match_layout_strides() {
        assert_eq!(std::mem::size_of::<VertexNT>(), 8 * 4);
        assert_eq!(std::mem::size_of::<VertexN>(), 6 * 4);
    }
}
