pub mod aabb;
pub mod frame;
pub mod transform;

pub use glam::{dvec3, DMat3, DMat4, DVec3, DVec4};
pub use aabb::{Aabb3, Bounded};
pub use frame::Frame;
pub use transform::Transformation;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
