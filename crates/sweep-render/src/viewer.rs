//! The viewer: a scene, a camera and the timers that animate them.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use sweep_core::Result;
use sweep_math::Transformation;

use crate::animation::{schedule, Recording, Timer};
use crate::camera::Camera;
use crate::export::{export_html, export_snapshot};
use crate::scene::{ObjectKey, Scene};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,
    /// Background colour, linear RGB
    pub background: [f32; 3],
    /// Where [`Viewer::show`] writes the HTML page.
    pub output: PathBuf,
    /// Optional JSON dump of the scene and recording.
    pub snapshot: Option<PathBuf>,
    /// Sleep between timer steps so callbacks run at wall-clock pace.
    pub realtime: bool,
    /// Restart playback in the page when the recording ends.
    pub looping: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Sweep Viewer".to_string(),
            background: [0.95, 0.95, 0.95],
            output: PathBuf::from("scene.html"),
            snapshot: None,
            realtime: false,
            looping: true,
        }
    }
}

/// Holds the scene being shown and drives its timers.
///
/// Callbacks registered with [`Viewer::on`] mutate the scene and call
/// [`Scene::update`] on what they changed; every updated object's pose is
/// recorded at the step's time and replayed by the exported page.
pub struct Viewer {
    pub scene: Scene,
    pub camera: Camera,
    config: ViewerConfig,
    timers: Vec<Timer>,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera::default(),
            config,
            timers: Vec::new(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Register `callback` to run `frames` times, `interval_ms` apart.
    pub fn on<F>(&mut self, interval_ms: u64, frames: usize, callback: F)
    where
        F: FnMut(usize, &mut Scene) -> Result<()> + 'static,
    {
        log::debug!("viewer: timer every {interval_ms} ms for {frames} frames");
        self.timers.push(Timer::new(
            Duration::from_millis(interval_ms),
            frames,
            Box::new(callback),
        ));
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Run every registered timer to completion and return the recorded poses.
    ///
    /// Timers are consumed; a second call records nothing. The first error
    /// returned by a callback stops the run.
    pub fn run(&mut self) -> Result<Recording> {
        let mut timers = std::mem::take(&mut self.timers);
        let events = schedule(&timers);
        let initial: HashMap<ObjectKey, Transformation> = self
            .scene
            .iter()
            .filter_map(|(key, object)| object.pose().map(|pose| (key, pose)))
            .collect();

        let mut recording = Recording::default();
        let start = Instant::now();
        for event in &events {
            if self.config.realtime {
                let elapsed = start.elapsed();
                if event.time > elapsed {
                    std::thread::sleep(event.time - elapsed);
                }
            }

            timers[event.timer].fire(event.step, &mut self.scene)?;

            for key in self.scene.take_dirty() {
                let Some(pose) = self.scene.object(key)?.pose() else {
                    continue;
                };
                if recording.track(key).is_none() && !event.time.is_zero() {
                    if let Some(first) = initial.get(&key) {
                        recording.record(key, Duration::ZERO, first);
                    }
                }
                recording.record(key, event.time, &pose);
            }
        }

        recording.duration_ms = timers
            .iter()
            .map(Timer::duration)
            .max()
            .unwrap_or_default()
            .as_millis() as u64;

        log::info!(
            "viewer: ran {} steps, recorded {} keyframes over {} ms",
            events.len(),
            recording.keyframe_count(),
            recording.duration_ms
        );
        Ok(recording)
    }

    /// Run the timers, then write the page (and the snapshot, if configured).
    ///
    /// Returns the path of the HTML page.
    pub fn show(mut self) -> Result<PathBuf> {
        let recording = self.run()?;
        export_html(
            &self.scene,
            &self.camera,
            &recording,
            &self.config,
            &self.config.output,
        )?;
        if let Some(path) = &self.config.snapshot {
            export_snapshot(&self.scene, &self.camera, &recording, path)?;
        }
        log::info!("open {} in a browser to view the scene", self.config.output.display());
        Ok(self.config.output)
    }
}

impl std::fmt::Debug for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewer")
            .field("objects", &self.scene.len())
            .field("camera", &self.camera)
            .field("config", &self.config)
            .field("timers", &self.timers)
            .finish()
    }
}
