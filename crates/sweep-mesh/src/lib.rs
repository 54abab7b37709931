pub mod box_mesh;
pub mod triangle_mesh;

pub use box_mesh::box_mesh;
pub use triangle_mesh::TriangleMesh;
