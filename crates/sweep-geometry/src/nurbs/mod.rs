//! NURBS core algorithms: knot vector utilities and De Boor evaluation.

pub mod deboor;
pub mod knot;

pub use deboor::*;
pub use knot::{basis_functions, ders_basis_functions, find_span, uniform_clamped_knots};
