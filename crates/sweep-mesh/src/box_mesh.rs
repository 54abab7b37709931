//! Box tessellation.

use sweep_geometry::BoxShape;
use sweep_math::{Bounded, Vector3};

use crate::TriangleMesh;

/// Face normals with the two in-plane axes, ordered so `u × v = normal`.
const FACES: [(Vector3, Vector3, Vector3); 6] = [
    (Vector3::X, Vector3::Y, Vector3::Z),
    (Vector3::NEG_X, Vector3::Z, Vector3::Y),
    (Vector3::Y, Vector3::Z, Vector3::X),
    (Vector3::NEG_Y, Vector3::X, Vector3::Z),
    (Vector3::Z, Vector3::X, Vector3::Y),
    (Vector3::NEG_Z, Vector3::Y, Vector3::X),
];

/// Flat-shaded mesh of `shape` in its local coordinates.
///
/// Each face gets its own four vertices so normals stay sharp at the edges.
/// Place the mesh with the shape's frame to get world coordinates.
pub fn box_mesh(shape: &BoxShape) -> TriangleMesh {
    let half = shape.dimensions() * 0.5;
    let mut mesh = TriangleMesh::default();

    for (normal, u, v) in FACES {
        let base = mesh.positions.len() as u32;
        let center = normal * half;
        let du = u * half;
        let dv = v * half;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.positions.push(center + du * su + dv * sv);
            mesh.normals.push(normal);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}
