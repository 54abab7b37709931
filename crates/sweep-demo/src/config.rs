use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sweep_core::traits::Validate;
use sweep_core::{Result, SweepError};
use sweep_render::ViewerConfig;

/// Demo settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Points the curve passes near, in order.
    pub points: Vec<[f64; 3]>,
    pub degree: usize,
    /// Number of frames sampled over the curve domain
    pub samples: usize,
    /// Draw every n-th sampled frame as a marker.
    pub marker_stride: usize,
    /// Axis length of the frame markers
    pub marker_size: f64,
    /// Box size along its local x, y and z.
    pub box_size: [f64; 3],
    pub camera_target: [f64; 3],
    pub camera_position: [f64; 3],
    /// Time between two box moves
    pub interval_ms: u64,
    pub output: PathBuf,
    pub snapshot: Option<PathBuf>,
    pub realtime: bool,
    pub looping: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            points: vec![
                [0.0, 0.0, 0.0],
                [3.0, 3.0, 0.0],
                [6.0, -6.0, 3.0],
                [9.0, 0.0, 0.0],
            ],
            degree: 3,
            samples: 100,
            marker_stride: 2,
            marker_size: 0.3,
            box_size: [0.8, 0.5, 0.3],
            camera_target: [0.0, 0.0, 3.0],
            camera_position: [-5.0, 0.0, 7.0],
            interval_ms: 100,
            output: PathBuf::from("curve_frames.html"),
            snapshot: None,
            realtime: false,
            looping: true,
        }
    }
}

impl DemoConfig {
    /// Read a config file; fields it leaves out keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: DemoConfig = serde_json::from_str(&text)
            .map_err(|e| SweepError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            title: "NURBS curve frames".to_string(),
            output: self.output.clone(),
            snapshot: self.snapshot.clone(),
            realtime: self.realtime,
            looping: self.looping,
            ..ViewerConfig::default()
        }
    }
}

impl Validate for DemoConfig {
    fn validate(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(SweepError::Config(format!(
                "need at least 2 points, got {}",
                self.points.len()
            )));
        }
        if self.degree == 0 {
            return Err(SweepError::Config("degree must be at least 1".into()));
        }
        if self.samples == 0 {
            return Err(SweepError::Config("samples must be positive".into()));
        }
        if self.marker_stride == 0 {
            return Err(SweepError::Config("marker_stride must be positive".into()));
        }
        if self.interval_ms == 0 {
            return Err(SweepError::Config("interval_ms must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DemoConfig::default();
        assert_eq!(config.points.len(), 4);
        assert_eq!(config.points[2], [6.0, -6.0, 3.0]);
        assert_eq!(config.samples, 100);
        assert_eq!(config.box_size, [0.8, 0.5, 0.3]);
        assert_eq!(config.interval_ms, 100);
        assert!(config.is_valid());
        assert!(!DemoConfig { marker_stride: 0, ..config }.is_valid());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "samples": 20, "realtime": true }}"#).unwrap();

        let config = DemoConfig::load(file.path()).unwrap();
        assert_eq!(config.samples, 20);
        assert!(config.realtime);
        assert_eq!(config.degree, 3);
        assert_eq!(config.camera_position, [-5.0, 0.0, 7.0]);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ samples: }}").unwrap();
        assert!(matches!(
            DemoConfig::load(file.path()),
            Err(SweepError::Config(_))
        ));
    }

    #[test]
    fn test_load_rejects_zero_samples() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "samples": 0 }}"#).unwrap();
        assert!(matches!(
            DemoConfig::load(file.path()),
            Err(SweepError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            DemoConfig::load(&dir.path().join("absent.json")),
            Err(SweepError::Io(_))
        ));
    }

    #[test]
    fn test_viewer_config_carries_output() {
        let config = DemoConfig {
            output: PathBuf::from("out/frames.html"),
            realtime: true,
            ..DemoConfig::default()
        };
        let viewer = config.viewer_config();
        assert_eq!(viewer.output, PathBuf::from("out/frames.html"));
        assert!(viewer.realtime);
    }
}
