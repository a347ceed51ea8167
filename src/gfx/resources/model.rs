//! Model-file loading
//!
//! Loads OBJ files into the flat interleaved position+normal vertex array
//! (6 floats per vertex) and triangle index array the registry consumes.
//! A missing or unparsable file is fatal at load time.

use std::path::Path;

use cgmath::{InnerSpace, Vector3};

use crate::error::{RenderError, Result};

/// A mesh loaded from a file, ready for registration.
#[derive(Debug)]
pub struct LoadedMesh {
    /// Interleaved position + normal floats, 6 per vertex
    pub vertices: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl LoadedMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 6
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Loads an OBJ file and flattens it into one interleaved mesh.
///
/// All models in the file are merged; faces are triangulated by the loader.
/// Files without normals get smooth per-vertex normals accumulated from
/// their faces.
pub fn load_model(path: &str) -> Result<LoadedMesh> {
    if !Path::new(path).exists() {
        return Err(RenderError::FileNotFound(path.to_string()));
    }

    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| RenderError::ModelLoad {
        path: path.to_string(),
        source,
    })?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        let normals = if mesh.normals.len() == mesh.positions.len() {
            mesh.normals.clone()
        } else {
            smooth_normals(&mesh.positions, &mesh.indices)
        };

        let base = (vertices.len() / 6) as u32;
        vertices.extend(interleave(&mesh.positions, &normals));
        indices.extend(mesh.indices.iter().map(|i| base + i));
    }

    log::info!(
        "loaded model '{}': {} vertices, {} triangles",
        path,
        vertices.len() / 6,
        indices.len() / 3
    );

    Ok(LoadedMesh { vertices, indices })
}

/// Zips separate position and normal arrays into the 6-float interleave.
fn interleave(positions: &[f32], normals: &[f32]) -> Vec<f32> {
    debug_assert_eq!(positions.len(), normals.len());
    let mut out = Vec::with_capacity(positions.len() * 2);
    for (p, n) in positions.chunks(3).zip(normals.chunks(3)) {
        out.extend_from_slice(p);
        out.extend_from_slice(n);
    }
    out
}

/// Per-vertex normals accumulated from face normals and normalized.
fn smooth_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let mut accumulated = vec![Vector3::new(0.0f32, 0.0, 0.0); positions.len() / 3];

    for triangle in indices.chunks(3) {
        let [i0, i1, i2] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];
        let vertex = |i: usize| {
            Vector3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2])
        };
        let face_normal = (vertex(i1) - vertex(i0)).cross(vertex(i2) - vertex(i0));
        for &i in &[i0, i1, i2] {
            accumulated[i] += face_normal;
        }
    }

    accumulated
        .into_iter()
        .flat_map(|n| {
            let n = if n.magnitude2() > 0.0 { n.normalize() } else { n };
            [n.x, n.y, n.z]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleave_pairs_positions_with_normals() {
        let positions = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let normals = [0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let flat = interleave(&positions, &normals);
        assert_eq!(flat, vec![1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 4.0, 5.0, 6.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn smooth_normals_of_a_single_triangle_match_its_face() {
        // Triangle in the y = 0 plane, counter-clockwise seen from +y.
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, -1.0];
        let normals = smooth_normals(&positions, &[0, 1, 2]);
        for n in normals.chunks(3) {
            assert!((n[0]).abs() < 1e-6);
            assert!((n[1] - 1.0).abs() < 1e-6);
            assert!((n[2]).abs() < 1e-6);
        }
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_model("assets/models/no_such_model.obj").unwrap_err();
        assert!(matches!(err, RenderError::FileNotFound(_)));
    }

    #[test]
    fn shipped_column_mesh_loads() {
        let mesh = load_model("assets/models/column.obj").expect("column asset");
        assert!(mesh.vertex_count() > 0);
        assert_eq!(mesh.vertices.len() % 6, 0);
        assert_eq!(mesh.indices.len() % 3, 0);
    }
}
