use foundation::color::Rgb;
use serde::{Deserialize, Serialize};

use crate::country::LineMaterial;

/// Border color used at load time and after a hover ends.
pub const LAVENDER: Rgb = Rgb::from_hex(0xE6E6FA);
/// Border color of the hovered country.
pub const GOLD: Rgb = Rgb::from_hex(0xFFD700);

/// Geometry and interaction settings of the globe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Radius of the base sphere; the only surface pointer rays are tested against.
    pub sphere_radius: f64,
    /// Borders float this factor above the sphere to avoid z-fighting.
    pub outline_scale: f64,
    /// Material of freshly loaded borders.
    pub outline: LineMaterial,
    pub hover: HoverStyle,
    pub camera: CameraConfig,
}

impl GlobeConfig {
    pub fn outline_radius(&self) -> f64 {
        self.sphere_radius * self.outline_scale
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 2.0,
            outline_scale: 1.01,
            outline: LineMaterial::new(LAVENDER, 0.8),
            hover: HoverStyle::default(),
            camera: CameraConfig::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverStyle {
    /// Outward displacement of hovered borders, in world units.
    pub elevation: f64,
    pub normal: LineMaterial,
    pub highlight: LineMaterial,
}

impl Default for HoverStyle {
    fn default() -> Self {
        Self {
            elevation: 0.01,
            normal: LineMaterial::new(LAVENDER, 0.7),
            highlight: LineMaterial::new(GOLD, 0.9),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f64; 3],
    pub target: [f64; 3],
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GOLD, GlobeConfig, LAVENDER};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_classic_look() {
        let cfg = GlobeConfig::default();
        assert!((cfg.outline_radius() - 2.02).abs() < 1e-12);
        assert_eq!(cfg.hover.normal.color, LAVENDER);
        assert_eq!(cfg.hover.normal.opacity, 0.7);
        assert_eq!(cfg.hover.highlight.color, GOLD);
        assert_eq!(cfg.hover.highlight.opacity, 0.9);
        assert_eq!(cfg.hover.elevation, 0.01);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: GlobeConfig = serde_json::from_str(
            r##"{ "sphere_radius": 1.0, "hover": { "highlight": { "color": "#FF0000", "opacity": 1.0 } } }"##,
        )
        .expect("parse config");
        assert_eq!(cfg.sphere_radius, 1.0);
        assert_eq!(cfg.outline_scale, 1.01);
        assert_eq!(cfg.hover.highlight.color.to_string(), "#FF0000");
        assert_eq!(cfg.hover.normal, GlobeConfig::default().hover.normal);
        assert_eq!(cfg.camera, GlobeConfig::default().camera);
    }
}
