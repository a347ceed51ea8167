//! # Fixed-Scene Vertex Data
//!
//! The room shell (ground and three walls), the cube and the pyramid are
//! authored here as flat interleaved float arrays. Room panels carry
//! position + normal + texture coordinate (8 floats per vertex); the solids
//! carry position + normal (6 floats per vertex).
//!
//! The room interior spans x,z in [-10, 10] with walls 10 units high; wall
//! normals face into the room.

/// Ground panel: a 4-vertex fan in the y = 0 plane.
pub fn ground() -> Vec<f32> {
    vec![
        -10.0, 0.0, -10.0, 0.0, 1.0, 0.0, 0.0, 0.0, //
        -10.0, 0.0, 10.0, 0.0, 1.0, 0.0, 0.0, 1.0, //
        10.0, 0.0, 10.0, 0.0, 1.0, 0.0, 1.0, 1.0, //
        10.0, 0.0, -10.0, 0.0, 1.0, 0.0, 1.0, 0.0,
    ]
}

/// Back wall at z = -10, facing into the room.
pub fn back_wall() -> Vec<f32> {
    vec![
        10.0, 0.0, -10.0, 0.0, 0.0, 1.0, 1.0, 0.0, //
        10.0, 10.0, -10.0, 0.0, 0.0, 1.0, 1.0, 1.0, //
        -10.0, 10.0, -10.0, 0.0, 0.0, 1.0, 0.0, 1.0, //
        -10.0, 0.0, -10.0, 0.0, 0.0, 1.0, 0.0, 0.0,
    ]
}

/// Left wall at x = -10, facing into the room.
pub fn left_wall() -> Vec<f32> {
    vec![
        -10.0, 10.0, 10.0, 1.0, 0.0, 0.0, 1.0, 0.0, //
        -10.0, 0.0, 10.0, 1.0, 0.0, 0.0, 1.0, 1.0, //
        -10.0, 0.0, -10.0, 1.0, 0.0, 0.0, 0.0, 1.0, //
        -10.0, 10.0, -10.0, 1.0, 0.0, 0.0, 0.0, 0.0,
    ]
}

/// Right wall at x = 10, facing into the room.
pub fn right_wall() -> Vec<f32> {
    vec![
        10.0, 0.0, 10.0, -1.0, 0.0, 0.0, 1.0, 1.0, //
        10.0, 10.0, 10.0, -1.0, 0.0, 0.0, 1.0, 0.0, //
        10.0, 10.0, -10.0, -1.0, 0.0, 0.0, 0.0, 0.0, //
        10.0, 0.0, -10.0, -1.0, 0.0, 0.0, 0.0, 1.0,
    ]
}

/// Cube spanning x,z in [-1, 1] and y in [0, 2], authored as six quads with
/// per-face normals.
pub fn cube() -> Vec<f32> {
    vec![
        // z = -1 face
        -1.0, 0.0, -1.0, 0.0, 0.0, -1.0, //
        -1.0, 2.0, -1.0, 0.0, 0.0, -1.0, //
        1.0, 2.0, -1.0, 0.0, 0.0, -1.0, //
        1.0, 0.0, -1.0, 0.0, 0.0, -1.0, //
        // x = 1 face
        1.0, 0.0, -1.0, 1.0, 0.0, 0.0, //
        1.0, 2.0, -1.0, 1.0, 0.0, 0.0, //
        1.0, 2.0, 1.0, 1.0, 0.0, 0.0, //
        1.0, 0.0, 1.0, 1.0, 0.0, 0.0, //
        // x = -1 face
        -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, //
        -1.0, 2.0, 1.0, -1.0, 0.0, 0.0, //
        -1.0, 2.0, -1.0, -1.0, 0.0, 0.0, //
        -1.0, 0.0, -1.0, -1.0, 0.0, 0.0, //
        // z = 1 face
        1.0, 0.0, 1.0, 0.0, 0.0, 1.0, //
        1.0, 2.0, 1.0, 0.0, 0.0, 1.0, //
        -1.0, 2.0, 1.0, 0.0, 0.0, 1.0, //
        -1.0, 0.0, 1.0, 0.0, 0.0, 1.0, //
        // y = 0 face
        -1.0, 0.0, 1.0, 0.0, -1.0, 0.0, //
        -1.0, 0.0, -1.0, 0.0, -1.0, 0.0, //
        1.0, 0.0, -1.0, 0.0, -1.0, 0.0, //
        1.0, 0.0, 1.0, 0.0, -1.0, 0.0, //
        // y = 2 face
        1.0, 2.0, 1.0, 0.0, 1.0, 0.0, //
        1.0, 2.0, -1.0, 0.0, 1.0, 0.0, //
        -1.0, 2.0, -1.0, 0.0, 1.0, 0.0, //
        -1.0, 2.0, 1.0, 0.0, 1.0, 0.0,
    ]
}

// Slanted face normals of the unit pyramid: (0, 1, 2) / sqrt(5) and its
// rotations about y.
const PYR_NY: f32 = 0.447_213_6;
const PYR_NS: f32 = 0.894_427_2;

/// Four-sided open pyramid, apex at (0, 1, 0), base corners at (±1, -1, ±1).
///
/// Authored as a plain triangle list; there is no base face.
pub fn pyramid() -> Vec<f32> {
    vec![
        // z = 1 face
        0.0, 1.0, 0.0, 0.0, PYR_NY, PYR_NS, //
        -1.0, -1.0, 1.0, 0.0, PYR_NY, PYR_NS, //
        1.0, -1.0, 1.0, 0.0, PYR_NY, PYR_NS, //
        // x = 1 face
        0.0, 1.0, 0.0, PYR_NS, PYR_NY, 0.0, //
        1.0, -1.0, 1.0, PYR_NS, PYR_NY, 0.0, //
        1.0, -1.0, -1.0, PYR_NS, PYR_NY, 0.0, //
        // z = -1 face
        0.0, 1.0, 0.0, 0.0, PYR_NY, -PYR_NS, //
        1.0, -1.0, -1.0, 0.0, PYR_NY, -PYR_NS, //
        -1.0, -1.0, -1.0, 0.0, PYR_NY, -PYR_NS, //
        // x = -1 face
        0.0, 1.0, 0.0, -PYR_NS, PYR_NY, 0.0, //
        -1.0, -1.0, -1.0, -PYR_NS, PYR_NY, 0.0, //
        -1.0, -1.0, 1.0, -PYR_NS, PYR_NY, 0.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::vertex::{LAYOUT_POS_NORMAL, LAYOUT_POS_NORMAL_UV};

    #[test]
    fn room_panels_are_four_vertex_fans() {
        for panel in [ground(), back_wall(), left_wall(), right_wall()] {
            assert_eq!(LAYOUT_POS_NORMAL_UV.vertex_count(&panel), 4);
        }
    }

    #[test]
    fn cube_has_six_quads() {
        assert_eq!(LAYOUT_POS_NORMAL.vertex_count(&cube()), 24);
    }

    #[test]
    fn pyramid_has_four_triangles() {
        assert_eq!(LAYOUT_POS_NORMAL.vertex_count(&pyramid()), 12);
    }

    #[test]
    fn pyramid_normals_are_unit_length() {
        let data = pyramid();
        for vertex in data.chunks(6) {
            let n = &vertex[3..6];
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5, "normal length {}", len);
        }
    }

    #[test]
    fn wall_normals_point_into_the_room() {
        // Left wall sits at x = -10; its normal must have positive x.
        let data = left_wall();
        assert!(data[3] > 0.0);
        // Right wall sits at x = 10; its normal must have negative x.
        let data = right_wall();
        assert!(data[3] < 0.0);
    }
}
