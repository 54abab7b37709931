use serde::{Deserialize, Serialize};
use sweep_math::{Aabb3, Bounded, Point3, Vector3};

/// Indexed triangle mesh with per-vertex normals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flat positions as `f32` triples, the layout a `BufferGeometry` attribute expects.
    pub fn position_buffer(&self) -> Vec<f32> {
        flatten(&self.positions)
    }

    pub fn normal_buffer(&self) -> Vec<f32> {
        flatten(&self.normals)
    }
}

impl Bounded for TriangleMesh {
    fn bounds(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.positions)
    }
}

fn flatten(vectors: &[Vector3]) -> Vec<f32> {
    vectors
        .iter()
        .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
        .collect()
}
