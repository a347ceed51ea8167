//! # Geometry/Buffer Registry
//!
//! Owns every piece of host-side vertex and index data in the scene together
//! with the device buffers they are uploaded to. Registration is host-only
//! and happens while the scene is assembled; the single GPU upload happens
//! once on device init. After every buffer upload the device-reported size
//! is checked against the byte count implied by the host array — any
//! difference is a fatal [`RenderError::UploadSizeMismatch`].
//!
//! Geometry authored as fans or quads is expanded to triangle-list index
//! buffers at registration, so draw counts always come from the data itself.

use wgpu::util::DeviceExt;

use crate::error::{RenderError, Result};
use crate::gfx::geometry::Topology;
use crate::gfx::scene::vertex::VertexLayout;

/// Identifies a registered mesh; index into the registry's entry table.
pub type MeshHandle = usize;

/// Device-side buffers of one registered mesh.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
}

/// One registered mesh: host data, its layout, and (after upload) buffers.
pub struct MeshEntry {
    name: String,
    vertices: Vec<f32>,
    indices: Option<Vec<u32>>,
    layout: VertexLayout,
    topology: Topology,
    vertex_count: u32,
    gpu: Option<GpuMesh>,
}

impl MeshEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Number of elements one draw call of this mesh covers: the index
    /// count when indexed, the vertex count otherwise.
    pub fn draw_count(&self) -> u32 {
        match &self.indices {
            Some(indices) => indices.len() as u32,
            None => self.vertex_count,
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Uploaded buffers; `None` until [`GeometryRegistry::upload_all`] ran.
    pub fn gpu(&self) -> Option<&GpuMesh> {
        self.gpu.as_ref()
    }
}

/// Registry of all scene geometry and its device buffers.
pub struct GeometryRegistry {
    entries: Vec<MeshEntry>,
}

impl GeometryRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers hand-authored interleaved vertex data.
    ///
    /// Fan and quad topologies are expanded to triangle-list indices here;
    /// the returned handle is stable for the life of the registry.
    pub fn register_static_mesh(
        &mut self,
        name: &str,
        vertices: Vec<f32>,
        layout: VertexLayout,
        topology: Topology,
    ) -> MeshHandle {
        let vertex_count = layout.vertex_count(&vertices);
        let indices = topology.expand_to_triangles(vertex_count);
        self.push_entry(name, vertices, indices, layout, topology, vertex_count)
    }

    /// Registers an already-indexed triangle mesh (loaded model data).
    pub fn register_indexed_mesh(
        &mut self,
        name: &str,
        vertices: Vec<f32>,
        indices: Vec<u32>,
        layout: VertexLayout,
    ) -> MeshHandle {
        let vertex_count = layout.vertex_count(&vertices);
        self.push_entry(
            name,
            vertices,
            Some(indices),
            layout,
            Topology::TriangleList,
            vertex_count,
        )
    }

    fn push_entry(
        &mut self,
        name: &str,
        vertices: Vec<f32>,
        indices: Option<Vec<u32>>,
        layout: VertexLayout,
        topology: Topology,
        vertex_count: u32,
    ) -> MeshHandle {
        let handle = self.entries.len();
        log::debug!(
            "registered mesh '{}': {} vertices, {} draw elements",
            name,
            vertex_count,
            indices
                .as_ref()
                .map(|i| i.len() as u32)
                .unwrap_or(vertex_count)
        );
        self.entries.push(MeshEntry {
            name: name.to_string(),
            vertices,
            indices,
            layout,
            topology,
            vertex_count,
            gpu: None,
        });
        handle
    }

    pub fn entry(&self, handle: MeshHandle) -> &MeshEntry {
        &self.entries[handle]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uploads every registered mesh to the device, verifying each buffer.
    ///
    /// Both the vertex buffer and (when present) the index buffer of every
    /// entry are checked independently against their expected byte counts.
    pub fn upload_all(&mut self, device: &wgpu::Device) -> Result<()> {
        for entry in self.entries.iter_mut() {
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} vertices", entry.name)),
                contents: bytemuck::cast_slice(&entry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            verify_upload(
                &entry.name,
                entry.layout.expected_bytes(&entry.vertices),
                vertex_buffer.size(),
            )?;

            let index_buffer = match &entry.indices {
                Some(indices) => {
                    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("{} indices", entry.name)),
                        contents: bytemuck::cast_slice(indices),
                        usage: wgpu::BufferUsages::INDEX,
                    });
                    verify_upload(
                        &entry.name,
                        (indices.len() * std::mem::size_of::<u32>()) as u64,
                        buffer.size(),
                    )?;
                    Some(buffer)
                }
                None => None,
            };

            entry.gpu = Some(GpuMesh {
                vertex_buffer,
                index_buffer,
            });
        }
        log::info!("uploaded {} meshes to the device", self.entries.len());
        Ok(())
    }
}

impl Default for GeometryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks a device-reported buffer size against the expected byte count.
fn verify_upload(name: &str, expected: u64, actual: u64) -> Result<()> {
    if expected != actual {
        return Err(RenderError::UploadSizeMismatch {
            name: name.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{self, Topology};
    use crate::gfx::scene::vertex::{LAYOUT_POS_NORMAL, LAYOUT_POS_NORMAL_UV};

    #[test]
    fn fan_registration_expands_indices() {
        let mut registry = GeometryRegistry::new();
        let handle = registry.register_static_mesh(
            "ground",
            geometry::ground(),
            LAYOUT_POS_NORMAL_UV,
            Topology::TriangleFan,
        );
        let entry = registry.entry(handle);
        assert_eq!(entry.vertex_count(), 4);
        assert!(entry.is_indexed());
        assert_eq!(entry.draw_count(), 6); // two triangles
    }

    #[test]
    fn quad_registration_expands_indices() {
        let mut registry = GeometryRegistry::new();
        let handle = registry.register_static_mesh(
            "cube",
            geometry::cube(),
            LAYOUT_POS_NORMAL,
            Topology::QuadList,
        );
        assert_eq!(registry.entry(handle).draw_count(), 36);
    }

    #[test]
    fn triangle_list_draw_count_comes_from_the_data() {
        let mut registry = GeometryRegistry::new();
        let handle = registry.register_static_mesh(
            "pyramid",
            geometry::pyramid(),
            LAYOUT_POS_NORMAL,
            Topology::TriangleList,
        );
        let entry = registry.entry(handle);
        assert!(!entry.is_indexed());
        assert_eq!(entry.draw_count(), 12);
    }

    #[test]
    fn verify_upload_accepts_exact_sizes() {
        assert!(verify_upload("ok", 128, 128).is_ok());
    }

    #[test]
    fn verify_upload_rejects_any_difference() {
        let err = verify_upload("bad", 128, 132).unwrap_err();
        match err {
            RenderError::UploadSizeMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, 128);
                assert_eq!(actual, 132);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn expected_bytes_cover_the_whole_host_array() {
        let data = geometry::ground();
        assert_eq!(
            LAYOUT_POS_NORMAL_UV.expected_bytes(&data),
            (data.len() * 4) as u64
        );
    }
}
