//! # Scene Geometry
//!
//! Hand-authored interleaved vertex data for the fixed scene, plus the
//! topology descriptions used when the data was authored. The room shell is
//! authored as triangle fans and the cube as a list of quads; since the GPU
//! pipeline only draws triangle lists, both are expanded to index buffers at
//! registration time. Draw counts always derive from the expanded data.

pub mod primitives;

pub use primitives::*;

/// Primitive topology a vertex array was authored in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Already a triangle list; drawn as-is.
    TriangleList,
    /// Fan around vertex 0; expanded to `n - 2` triangles.
    TriangleFan,
    /// Consecutive groups of four vertices; each expanded to two triangles.
    QuadList,
}

impl Topology {
    /// Index buffer realizing this topology as a triangle list.
    ///
    /// Returns `None` for [`Topology::TriangleList`], which needs no
    /// indices.
    pub fn expand_to_triangles(&self, vertex_count: u32) -> Option<Vec<u32>> {
        match self {
            Topology::TriangleList => None,
            Topology::TriangleFan => {
                assert!(vertex_count >= 3, "fan needs at least 3 vertices");
                let mut indices = Vec::with_capacity(3 * (vertex_count as usize - 2));
                for i in 1..vertex_count - 1 {
                    indices.extend_from_slice(&[0, i, i + 1]);
                }
                Some(indices)
            }
            Topology::QuadList => {
                assert!(
                    vertex_count % 4 == 0,
                    "quad list needs a multiple of 4 vertices, got {}",
                    vertex_count
                );
                let mut indices = Vec::with_capacity(6 * (vertex_count as usize / 4));
                for q in (0..vertex_count).step_by(4) {
                    indices.extend_from_slice(&[q, q + 1, q + 2, q, q + 2, q + 3]);
                }
                Some(indices)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_expands_to_n_minus_two_triangles() {
        let indices = Topology::TriangleFan.expand_to_triangles(4).unwrap();
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);
        let indices = Topology::TriangleFan.expand_to_triangles(7).unwrap();
        assert_eq!(indices.len(), 3 * 5);
    }

    #[test]
    fn quads_expand_to_two_triangles_each() {
        let indices = Topology::QuadList.expand_to_triangles(24).unwrap();
        assert_eq!(indices.len(), 6 * 6); // six quads
        // second quad starts at vertex 4
        assert_eq!(&indices[6..12], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn triangle_list_needs_no_indices() {
        assert!(Topology::TriangleList.expand_to_triangles(12).is_none());
    }
}
