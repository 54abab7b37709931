//! Scene object registry.

use serde::Serialize;
use slotmap::{new_key_type, SlotMap};
use sweep_core::{Result, SweepError};
use sweep_geometry::tessellate::curve_to_polyline;
use sweep_geometry::{BoxShape, Curve, Polyline};
use sweep_math::{Aabb3, Bounded, Frame, Point3, Transformation};

new_key_type! {
    /// Handle to an object registered in a [`Scene`].
    pub struct ObjectKey;
}

const PALETTE: [[f32; 3]; 8] = [
    [0.15, 0.15, 0.15], // Near black
    [0.30, 0.55, 0.85], // Blue
    [0.85, 0.45, 0.25], // Orange
    [0.40, 0.70, 0.40], // Green
    [0.75, 0.35, 0.65], // Purple
    [0.85, 0.75, 0.30], // Yellow
    [0.45, 0.75, 0.80], // Cyan
    [0.60, 0.60, 0.60], // Gray
];

/// What a scene object draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneGeometry {
    /// A curve, stored as its display tessellation.
    Curve { points: Vec<Point3> },
    /// Connected segments, optionally with the vertices drawn as dots.
    Polyline { points: Vec<Point3>, show_points: bool },
    /// Axis triad of the given length.
    Frame { frame: Frame, size: f64 },
    /// A solid box, drawn at its frame.
    Box { shape: BoxShape },
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneObject {
    pub name: String,
    pub geometry: SceneGeometry,
    pub color: [f32; 3],
    /// Incremented on every [`Scene::update`].
    pub revision: u64,
}

impl SceneObject {
    /// Placement of the object's local geometry in world space, for objects that have one.
    pub fn pose(&self) -> Option<Transformation> {
        match &self.geometry {
            SceneGeometry::Frame { frame, .. } => Some(Transformation::from_frame(frame)),
            SceneGeometry::Box { shape } => Some(Transformation::from_frame(&shape.frame)),
            SceneGeometry::Curve { .. } | SceneGeometry::Polyline { .. } => None,
        }
    }
}

impl Bounded for SceneObject {
    fn bounds(&self) -> Option<Aabb3> {
        match &self.geometry {
            SceneGeometry::Curve { points } | SceneGeometry::Polyline { points, .. } => {
                Aabb3::from_points(points)
            }
            SceneGeometry::Frame { frame, size } => {
                let tips = [
                    frame.point,
                    frame.point + frame.xaxis * *size,
                    frame.point + frame.yaxis * *size,
                    frame.point + frame.zaxis() * *size,
                ];
                Aabb3::from_points(&tips)
            }
            SceneGeometry::Box { shape } => shape.bounds(),
        }
    }
}

/// A 3D scene: the objects the viewer draws, addressed by [`ObjectKey`].
#[derive(Debug, Default)]
pub struct Scene {
    objects: SlotMap<ObjectKey, SceneObject>,
    dirty: Vec<ObjectKey>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object with an explicit name and colour.
    pub fn add(&mut self, name: &str, geometry: SceneGeometry, color: [f32; 3]) -> ObjectKey {
        let key = self.objects.insert(SceneObject {
            name: name.to_string(),
            geometry,
            color,
            revision: 0,
        });
        log::debug!("scene: added {name} as {key:?}");
        key
    }

    /// Register a curve, tessellated to within `tolerance` for display.
    pub fn add_curve(&mut self, curve: &dyn Curve, tolerance: f64) -> ObjectKey {
        let points = curve_to_polyline(curve, tolerance).points;
        let name = self.next_name("Curve");
        self.add(&name, SceneGeometry::Curve { points }, PALETTE[0])
    }

    pub fn add_polyline(&mut self, polyline: &Polyline, show_points: bool) -> ObjectKey {
        let name = self.next_name("Polyline");
        let color = self.auto_color();
        self.add(
            &name,
            SceneGeometry::Polyline {
                points: polyline.points.clone(),
                show_points,
            },
            color,
        )
    }

    /// Register a frame marker whose axes are `size` long.
    pub fn add_frame(&mut self, frame: &Frame, size: f64) -> ObjectKey {
        let name = self.next_name("Frame");
        self.add(
            &name,
            SceneGeometry::Frame {
                frame: *frame,
                size,
            },
            PALETTE[7],
        )
    }

    pub fn add_box(&mut self, shape: BoxShape) -> ObjectKey {
        let name = self.next_name("Box");
        let color = self.auto_color();
        self.add(&name, SceneGeometry::Box { shape }, color)
    }

    pub fn object(&self, key: ObjectKey) -> Result<&SceneObject> {
        self.objects
            .get(key)
            .ok_or_else(|| SweepError::NotFound(format!("scene object {key:?}")))
    }

    pub fn object_mut(&mut self, key: ObjectKey) -> Result<&mut SceneObject> {
        self.objects
            .get_mut(key)
            .ok_or_else(|| SweepError::NotFound(format!("scene object {key:?}")))
    }

    /// Mutable access to the box held by `key`.
    pub fn box_shape_mut(&mut self, key: ObjectKey) -> Result<&mut BoxShape> {
        let object = self.object_mut(key)?;
        match &mut object.geometry {
            SceneGeometry::Box { shape } => Ok(shape),
            _ => Err(SweepError::InvalidOperation(format!(
                "{} is not a box",
                object.name
            ))),
        }
    }

    /// Notify the scene that the object behind `key` changed and must be redrawn.
    pub fn update(&mut self, key: ObjectKey) -> Result<()> {
        let object = self.object_mut(key)?;
        object.revision += 1;
        if !self.dirty.contains(&key) {
            self.dirty.push(key);
        }
        Ok(())
    }

    /// Objects updated since the last call, in update order.
    pub fn take_dirty(&mut self) -> Vec<ObjectKey> {
        std::mem::take(&mut self.dirty)
    }

    pub fn remove(&mut self, key: ObjectKey) -> Option<SceneObject> {
        self.dirty.retain(|&k| k != key);
        self.objects.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Compute scene bounding box
    pub fn bounds(&self) -> Option<Aabb3> {
        self.objects
            .values()
            .filter_map(SceneObject::bounds)
            .reduce(|a, b| a.merge(&b))
    }

    fn next_name(&self, kind: &str) -> String {
        format!("{kind}.{:03}", self.objects.len())
    }

    fn auto_color(&self) -> [f32; 3] {
        PALETTE[1 + self.objects.len() % (PALETTE.len() - 2)]
    }
}
