//! Sweep geometry: NURBS curves, moving frames, and the box primitive.

pub mod curve;
pub mod nurbs;
pub mod sampling;
pub mod shape;
pub mod tessellate;

pub use curve::{Curve, Line, NurbsCurve, Polyline};
pub use sampling::{linspace, sample_frames};
pub use shape::BoxShape;
