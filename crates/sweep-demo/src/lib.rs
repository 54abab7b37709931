//! A box sliding along the moving frames of a NURBS curve.
//!
//! The curve is built through the configured points, sampled into frames,
//! and shown with its control polygon and a marker at every few frames.
//! A timer moves the box onto the next frame each step.

pub mod config;

pub use config::DemoConfig;
pub use sweep_geometry::sample_frames;

use sweep_core::traits::Validate;
use sweep_core::{Result, SweepError};
use sweep_geometry::{BoxShape, Curve, NurbsCurve};
use sweep_math::{Frame, Point3, Transformation};
use sweep_render::{ObjectKey, Scene, Viewer};

/// Display tessellation tolerance for the curve
const CURVE_TOLERANCE: f64 = 1e-3;

pub fn control_points(config: &DemoConfig) -> Vec<Point3> {
    config.points.iter().map(|&p| Point3::from_array(p)).collect()
}

pub fn build_curve(config: &DemoConfig) -> Result<NurbsCurve> {
    NurbsCurve::from_points(&control_points(config), config.degree)
}

/// Move `shape` so its frame coincides with `target`.
pub fn slide(shape: &mut BoxShape, target: &Frame) {
    let transformation = Transformation::from_frame_to_frame(&shape.frame, target);
    shape.transform(&transformation);
}

/// One timer step: put the box behind `key` on `frames[step]`.
pub fn move_box(scene: &mut Scene, key: ObjectKey, frames: &[Frame], step: usize) -> Result<()> {
    let target = frames
        .get(step)
        .ok_or_else(|| SweepError::NotFound(format!("frame {step} of {}", frames.len())))?;
    slide(scene.box_shape_mut(key)?, target);
    scene.update(key)
}

/// Set up the whole scene and the timer that drives the box.
pub fn build_viewer(config: &DemoConfig) -> Result<Viewer> {
    config.validate()?;
    let curve = build_curve(config)?;
    let frames = sample_frames(&curve, config.samples);

    let mut viewer = Viewer::new(config.viewer_config());
    viewer.camera.look_at(
        Point3::from_array(config.camera_position),
        Point3::from_array(config.camera_target),
    );

    viewer.scene.add_curve(&curve, CURVE_TOLERANCE);
    viewer.scene.add_polyline(&curve.control_polygon(), true);
    for frame in frames.iter().step_by(config.marker_stride) {
        viewer.scene.add_frame(frame, config.marker_size);
    }
    let [x, y, z] = config.box_size;
    let box_key = viewer.scene.add_box(BoxShape::new(x, y, z)?);

    log::info!(
        "curve of degree {} over {:?}, {} frames, {} scene objects",
        curve.degree,
        curve.domain(),
        frames.len(),
        viewer.scene.len()
    );

    let steps = frames.len();
    viewer.on(config.interval_ms, steps, move |step, scene| {
        move_box(scene, box_key, &frames, step)
    });
    Ok(viewer)
}
