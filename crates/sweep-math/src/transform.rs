use crate::{DMat4, Frame, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Rigid body transformation (rotation + translation, no shear/scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub matrix: [f64; 16],
}

impl Transformation {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    /// Transformation taking the world XY frame onto `frame`.
    pub fn from_frame(frame: &Frame) -> Self {
        Self::from_mat4(frame.to_matrix())
    }

    /// Transformation taking frame `from` onto frame `to`.
    ///
    /// Applying the result to `from` yields `to`; every object expressed
    /// relative to `from` moves along with it.
    pub fn from_frame_to_frame(from: &Frame, to: &Frame) -> Self {
        Self::from_mat4(to.to_matrix() * rigid_inverse(&from.to_matrix()))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    /// Column-major single precision copy, the layout three.js `Matrix4.fromArray` expects.
    pub fn to_f32_array(&self) -> [f32; 16] {
        self.matrix.map(|v| v as f32)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        self.to_mat4().transform_vector3(v)
    }

    /// Apply `self` first, then `other`.
    pub fn then(&self, other: &Transformation) -> Transformation {
        Self::from_mat4(other.to_mat4() * self.to_mat4())
    }

    pub fn inverse(&self) -> Option<Transformation> {
        let m = self.to_mat4();
        if m.determinant().abs() < 1e-15 {
            None
        } else {
            Some(Self::from_mat4(m.inverse()))
        }
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Inverse of a rotation + translation matrix: transpose the rotation, rotate the negated translation.
fn rigid_inverse(m: &DMat4) -> DMat4 {
    let rotation = glam::DMat3::from_mat4(*m).transpose();
    let translation = -(rotation * m.w_axis.truncate());
    DMat4::from_cols(
        rotation.x_axis.extend(0.0),
        rotation.y_axis.extend(0.0),
        rotation.z_axis.extend(0.0),
        translation.extend(1.0),
    )
}
