use serde::{Deserialize, Serialize};
use sweep_math::{Aabb3, DMat4, Point3, Vector3};

/// A 3D perspective camera with look-at controls. World up is +Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Point3,
    pub target: Point3,
    pub up: Vector3,
    /// Vertical field of view in radians
    pub fov_y: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    /// Create a new camera with explicit parameters.
    pub fn new(position: Point3, target: Point3, up: Vector3, fov_y: f64, near: f64, far: f64) -> Self {
        Self {
            position,
            target,
            up,
            fov_y,
            near,
            far,
        }
    }

    /// Move the camera to `position`, looking at `target`.
    pub fn look_at(&mut self, position: Point3, target: Point3) {
        self.position = position;
        self.target = target;
    }

    /// Unit vector from the camera towards its target.
    pub fn direction(&self) -> Vector3 {
        (self.target - self.position).normalize()
    }

    pub fn distance(&self) -> f64 {
        self.position.distance(self.target)
    }

    /// View matrix (world to camera space), right-handed, camera looking down -Z.
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Perspective projection with OpenGL-style NDC depth (-1 to 1).
    pub fn projection_matrix(&self, aspect: f64) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_y, aspect, self.near, self.far)
    }

    /// Zoom by moving the camera closer or farther from the target.
    /// Positive delta moves closer, negative moves farther.
    pub fn zoom(&mut self, delta: f64) {
        let new_position = self.position + self.direction() * delta;

        // Never cross or touch the target
        if (self.target - new_position).length() > 0.1
            && (self.target - new_position).dot(self.direction()) > 0.0
        {
            self.position = new_position;
        }
    }

    /// Re-aim at the centre of `aabb` from far enough back to see all of it,
    /// keeping the current viewing direction.
    pub fn fit_to_aabb(&mut self, aabb: &Aabb3) {
        let center = aabb.center();
        let radius = (aabb.diagonal() * 0.5).max(1e-3);

        let distance = radius / (self.fov_y / 2.0).sin();

        let view_dir = self.direction();
        self.target = center;
        self.position = center - view_dir * distance * 1.1;
    }
}

impl Default for Camera {
    /// Eye at (-10, -10, 10) looking at the origin, 45° FOV.
    fn default() -> Self {
        Self {
            position: Point3::new(-10.0, -10.0, 10.0),
            target: Point3::ZERO,
            up: Vector3::Z,
            fov_y: std::f64::consts::FRAC_PI_4,
            near: 0.1,
            far: 1000.0,
        }
    }
}
