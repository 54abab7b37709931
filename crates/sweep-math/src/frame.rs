//! Local coordinate frames (rigid-body poses).

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};
use sweep_core::{Result, SweepError, Tolerance};

use crate::{DMat4, Point3, Transformation, Vector3};

/// An origin with an orthonormal, right-handed basis.
///
/// Only the x and y axes are stored; `zaxis` is always `xaxis × yaxis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub point: Point3,
    pub xaxis: Vector3,
    pub yaxis: Vector3,
}

impl Frame {
    /// Build a frame from an origin and two (not necessarily orthonormal) axes.
    ///
    /// The x axis is normalized and the y axis is made orthogonal to it
    /// (Gram-Schmidt). Fails if either axis is degenerate or they are parallel.
    pub fn new(point: Point3, xaxis: Vector3, yaxis: Vector3) -> Result<Self> {
        let tol = Tolerance::default();
        let x_len = xaxis.length();
        if tol.is_degenerate(x_len) {
            return Err(SweepError::Geometry(format!(
                "frame x axis is degenerate: {xaxis:?}"
            )));
        }
        let x = xaxis / x_len;
        let y = yaxis - x * yaxis.dot(x);
        let y_len = y.length();
        if tol.is_degenerate(y_len) {
            return Err(SweepError::Geometry(format!(
                "frame y axis {yaxis:?} is parallel to x axis {xaxis:?}"
            )));
        }
        Ok(Self {
            point,
            xaxis: x,
            yaxis: y / y_len,
        })
    }

    /// The world XY frame at the origin.
    pub fn world_xy() -> Self {
        Self {
            point: Point3::ZERO,
            xaxis: Vector3::X,
            yaxis: Vector3::Y,
        }
    }

    pub fn zaxis(&self) -> Vector3 {
        self.xaxis.cross(self.yaxis)
    }

    /// Matrix mapping local coordinates of this frame to world coordinates.
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_cols(
            self.xaxis.extend(0.0),
            self.yaxis.extend(0.0),
            self.zaxis().extend(0.0),
            self.point.extend(1.0),
        )
    }

    /// Map a point given in this frame's local coordinates to world coordinates.
    pub fn to_world(&self, local: Point3) -> Point3 {
        self.point + self.xaxis * local.x + self.yaxis * local.y + self.zaxis() * local.z
    }

    /// Map a world point into this frame's local coordinates.
    pub fn to_local(&self, world: Point3) -> Point3 {
        let d = world - self.point;
        Point3::new(d.dot(self.xaxis), d.dot(self.yaxis), d.dot(self.zaxis()))
    }

    /// A copy of this frame moved by `transformation`.
    pub fn transformed(&self, transformation: &Transformation) -> Self {
        let point = transformation.transform_point(self.point);
        let x = transformation.transform_vector(self.xaxis).normalize();
        let y = transformation.transform_vector(self.yaxis);
        // Re-orthogonalize to keep accumulated rounding out of the basis.
        let y = (y - x * y.dot(x)).normalize();
        Self {
            point,
            xaxis: x,
            yaxis: y,
        }
    }

    /// Move this frame in place.
    pub fn transform(&mut self, transformation: &Transformation) {
        *self = self.transformed(transformation);
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::world_xy()
    }
}

impl AbsDiffEq for Frame {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        Tolerance::DEFAULT_LINEAR
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.point.abs_diff_eq(other.point, epsilon)
            && self.xaxis.abs_diff_eq(other.xaxis, epsilon)
            && self.yaxis.abs_diff_eq(other.yaxis, epsilon)
    }
}
