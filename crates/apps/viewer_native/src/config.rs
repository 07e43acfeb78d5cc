use std::fs;
use std::path::{Path, PathBuf};

use formats::LoadError;
use layers::FillConfig;
use scene::GlobeConfig;
use scene::camera::Viewport;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    ConfigJson(#[from] serde_json::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Everything the headless viewer can be told through `GLOBE_CONFIG`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub globe: GlobeConfig,
    pub fill: FillConfig,
    /// Window size in pixels.
    pub viewport: [f64; 2],
    pub sweep: SweepConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            globe: GlobeConfig::default(),
            fill: FillConfig::default(),
            viewport: [1280.0, 720.0],
            sweep: SweepConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ViewerError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ViewerError> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path).map_err(|source| ViewerError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&payload)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport[0], self.viewport[1])
    }
}

/// Scripted pointer path: a grid of moves over the viewport.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub rows: u32,
    pub columns: u32,
    /// Seconds between two pointer moves.
    pub frame_dt: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            rows: 9,
            columns: 16,
            frame_dt: 1.0 / 60.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_the_default_config() {
        let cfg = ViewerConfig::from_json_str("{}").expect("config");
        assert_eq!(cfg, ViewerConfig::default());
    }

    #[test]
    fn nested_sections_override_independently() {
        let cfg = ViewerConfig::from_json_str(
            r#"{
                "globe": { "sphere_radius": 3.0 },
                "fill": { "subdivision_depth": 1 },
                "viewport": [640, 480]
            }"#,
        )
        .expect("config");
        assert_eq!(cfg.globe.sphere_radius, 3.0);
        assert_eq!(cfg.fill.subdivision_depth, 1);
        assert_eq!(cfg.fill.scale, 1.005);
        assert_eq!(cfg.viewport().aspect(), 640.0 / 480.0);
    }

    #[test]
    fn bad_colors_are_rejected() {
        let payload = r#"{ "globe": { "outline": { "color": "lavender", "opacity": 1 } } }"#;
        assert!(ViewerConfig::from_json_str(payload).is_err());
    }
}
