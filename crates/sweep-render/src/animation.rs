//! Periodic timers and the keyframe recording they produce.

use std::time::Duration;

use serde::Serialize;
use sweep_core::Result;
use sweep_math::Transformation;

use crate::scene::{ObjectKey, Scene};

/// Callback run on every timer step with the step index and the scene.
pub type StepFn = Box<dyn FnMut(usize, &mut Scene) -> Result<()>>;

/// A callback fired `frames` times, `interval` apart, starting at time zero.
pub struct Timer {
    pub interval: Duration,
    pub frames: usize,
    callback: StepFn,
}

impl Timer {
    pub fn new(interval: Duration, frames: usize, callback: StepFn) -> Self {
        Self {
            interval,
            frames,
            callback,
        }
    }

    /// Run the callback for step `step`.
    pub fn fire(&mut self, step: usize, scene: &mut Scene) -> Result<()> {
        (self.callback)(step, scene)
    }

    /// Time of the last step plus one interval.
    pub fn duration(&self) -> Duration {
        self.interval * self.frames as u32
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer")
            .field("interval", &self.interval)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

/// One scheduled callback invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub time: Duration,
    /// Index of the timer in registration order
    pub timer: usize,
    pub step: usize,
}

/// Every event of every timer, ordered by time and then by registration order.
pub fn schedule(timers: &[Timer]) -> Vec<TimerEvent> {
    let mut events: Vec<TimerEvent> = timers
        .iter()
        .enumerate()
        .flat_map(|(timer, t)| {
            (0..t.frames).map(move |step| TimerEvent {
                time: t.interval * step as u32,
                timer,
                step,
            })
        })
        .collect();
    events.sort_by_key(|e| (e.time, e.timer, e.step));
    events
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyframe {
    pub time_ms: u64,
    /// Column-major world matrix of the object at `time_ms`
    pub matrix: [f32; 16],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub object: ObjectKey,
    pub keyframes: Vec<Keyframe>,
}

/// Poses recorded while the viewer's timers run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recording {
    pub tracks: Vec<Track>,
    pub duration_ms: u64,
}

impl Recording {
    /// Record `pose` for `object` at `time`. A second pose at the same time replaces the first.
    pub fn record(&mut self, object: ObjectKey, time: Duration, pose: &Transformation) {
        let keyframe = Keyframe {
            time_ms: time.as_millis() as u64,
            matrix: pose.to_f32_array(),
        };
        let index = match self.tracks.iter().position(|t| t.object == object) {
            Some(i) => i,
            None => {
                self.tracks.push(Track {
                    object,
                    keyframes: Vec::new(),
                });
                self.tracks.len() - 1
            }
        };
        let track = &mut self.tracks[index];
        match track.keyframes.last_mut() {
            Some(last) if last.time_ms == keyframe.time_ms => *last = keyframe,
            _ => track.keyframes.push(keyframe),
        }
    }

    pub fn track(&self, object: ObjectKey) -> Option<&Track> {
        self.tracks.iter().find(|t| t.object == object)
    }

    pub fn keyframe_count(&self) -> usize {
        self.tracks.iter().map(|t| t.keyframes.len()).sum()
    }
}
