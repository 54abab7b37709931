//! Solid primitives.

use serde::{Deserialize, Serialize};
use sweep_core::{Result, SweepError};
use sweep_math::{Aabb3, Bounded, Frame, Point3, Transformation, Vector3};

/// A rectangular box centred on its local frame.
///
/// `xsize`, `ysize` and `zsize` are the full edge lengths along the frame's
/// x, y and z axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub xsize: f64,
    pub ysize: f64,
    pub zsize: f64,
    pub frame: Frame,
}

impl BoxShape {
    /// A box at the world XY frame.
    pub fn new(xsize: f64, ysize: f64, zsize: f64) -> Result<Self> {
        if [xsize, ysize, zsize].iter().any(|&s| !(s.is_finite() && s > 0.0)) {
            return Err(SweepError::Geometry(format!(
                "box sizes must be positive, got {xsize} x {ysize} x {zsize}"
            )));
        }
        Ok(Self {
            xsize,
            ysize,
            zsize,
            frame: Frame::world_xy(),
        })
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    pub fn dimensions(&self) -> Vector3 {
        Vector3::new(self.xsize, self.ysize, self.zsize)
    }

    pub fn volume(&self) -> f64 {
        self.xsize * self.ysize * self.zsize
    }

    /// Move the box in place; its size is unaffected.
    pub fn transform(&mut self, transformation: &Transformation) {
        self.frame.transform(transformation);
    }

    pub fn transformed(&self, transformation: &Transformation) -> Self {
        let mut moved = *self;
        moved.transform(transformation);
        moved
    }

    /// Corner points in the box's local coordinates.
    ///
    /// Bit 0 of the index selects +x, bit 1 +y, bit 2 +z.
    pub fn local_corners(&self) -> [Point3; 8] {
        let half = self.dimensions() * 0.5;
        std::array::from_fn(|i| {
            let sign = |bit: usize| if i & bit != 0 { 1.0 } else { -1.0 };
            Point3::new(sign(1) * half.x, sign(2) * half.y, sign(4) * half.z)
        })
    }

    /// Corner points in world coordinates, same ordering as `local_corners`.
    pub fn corners(&self) -> [Point3; 8] {
        self.local_corners().map(|p| self.frame.to_world(p))
    }
}

impl Bounded for BoxShape {
    fn bounds(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.corners())
    }
}
