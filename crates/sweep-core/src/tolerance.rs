use serde::{Deserialize, Serialize};

/// Tolerances shared by curve evaluation, frame comparison and sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Distance below which two points are considered coincident (model units)
    pub linear: f64,
    /// Length below which a direction vector is considered degenerate
    pub vector: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-9;
    pub const DEFAULT_VECTOR: f64 = 1e-12;

    pub fn new(linear: f64, vector: f64) -> Self {
        Self { linear, vector }
    }

    /// Looser comparison used for display tessellation and approximate lengths.
    pub fn display() -> Self {
        Self {
            linear: 1e-3,
            vector: 1e-9,
        }
    }

    /// Check if two values are equal within linear tolerance
    pub fn linear_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.linear
    }

    /// Check if a value is zero within linear tolerance
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() <= self.linear
    }

    /// Whether a vector of the given length is too short to define a direction.
    pub fn is_degenerate(self, length: f64) -> bool {
        !length.is_finite() || length <= self.vector
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            vector: Self::DEFAULT_VECTOR,
        }
    }
}
