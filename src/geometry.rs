//! Axis-aligned box math shared by the placement engine.
//!
//! Everything here is a pure function over `Vector3<f64>` values. Comparisons
//! use a fixed tolerance so that coordinates produced by repeated addition do
//! not fail exact fits (an item whose dimensions equal the container's must
//! pack with zero slack, not be rejected by float noise).

use nalgebra::Vector3;

/// Comparison tolerance. Input coordinates are normalised to 2 decimal
/// places, so anything far below 0.01 separates real gaps from noise.
pub const EPSILON: f64 = 1e-9;

/// The 6 axis permutations of a box's dimensions, in search order.
/// Index 0 is the identity; it is the only permutation tried when rotation
/// is disabled.
pub const ORIENTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Rounds a coordinate to 2 decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Volume of a box with the given dimensions.
pub fn volume(dims: Vector3<f64>) -> f64 {
    dims.x * dims.y * dims.z
}

/// Dimensions of a box under the orientation with the given index.
pub fn oriented(dims: Vector3<f64>, orientation: usize) -> Vector3<f64> {
    let [x, y, z] = ORIENTATIONS[orientation % ORIENTATIONS.len()];
    Vector3::new(dims[x], dims[y], dims[z])
}

/// Number of orientations searched for an item.
pub fn orientation_count(rotation: bool) -> usize {
    if rotation {
        ORIENTATIONS.len()
    } else {
        1
    }
}

/// Whether a box at `origin` with `dims` lies entirely within a container of
/// the given bounds (container-local coordinates, origin at the corner).
pub fn fits_within(origin: Vector3<f64>, dims: Vector3<f64>, bounds: Vector3<f64>) -> bool {
    origin.x + dims.x <= bounds.x + EPSILON
        && origin.y + dims.y <= bounds.y + EPSILON
        && origin.z + dims.z <= bounds.z + EPSILON
}

/// Whether two placed boxes' occupied regions overlap. Touching faces do not
/// count as overlap.
pub fn boxes_overlap(
    a_min: Vector3<f64>,
    a_dims: Vector3<f64>,
    b_min: Vector3<f64>,
    b_dims: Vector3<f64>,
) -> bool {
    let a_max = a_min + a_dims;
    let b_max = b_min + b_dims;

    let apart_x = a_min.x >= b_max.x - EPSILON || b_min.x >= a_max.x - EPSILON;
    let apart_y = a_min.y >= b_max.y - EPSILON || b_min.y >= a_max.y - EPSILON;
    let apart_z = a_min.z >= b_max.z - EPSILON || b_min.z >= a_max.z - EPSILON;

    !(apart_x || apart_y || apart_z)
}

/// Whether a point lies strictly inside a box's interior on every axis.
/// A point on a face is not inside; faces are where the next item's anchor
/// may legitimately sit.
pub fn strictly_inside(point: Vector3<f64>, origin: Vector3<f64>, dims: Vector3<f64>) -> bool {
    let max = origin + dims;
    point.x > origin.x + EPSILON
        && point.x < max.x - EPSILON
        && point.y > origin.y + EPSILON
        && point.y < max.y - EPSILON
        && point.z > origin.z + EPSILON
        && point.z < max.z - EPSILON
}
