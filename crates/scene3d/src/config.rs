//! Render pipeline configuration
//!
//! A small TOML-deserializable settings struct the host loads at startup
//! and applies when constructing layers and renderables. Defaults match the
//! pipeline's built-in camera setup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::frustum::{CullPlanes, FrustumPlane};
use crate::render::MAX_LIGHTS;

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for [`RenderSettings`].
    #[error("failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),

    /// The settings parsed but describe an unusable configuration.
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Frustum culling policy applied to new renderables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    /// No culling; everything draws.
    Off,
    /// Cheap rough culling against the bottom plane only.
    SinglePlane,
    /// Thorough culling against all six planes.
    #[default]
    AllPlanes,
}

impl CullMode {
    /// The per-renderable culling configuration for this mode.
    pub fn cull_planes(self) -> Option<CullPlanes> {
        match self {
            Self::Off => None,
            Self::SinglePlane => Some(CullPlanes::One(FrustumPlane::Bottom)),
            Self::AllPlanes => Some(CullPlanes::All),
        }
    }
}

/// Startup settings for the render pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Culling policy for new renderables
    pub culling: CullMode,
    /// Number of concurrently active lights (at most [`MAX_LIGHTS`])
    pub max_lights: usize,
    /// Default camera vertical field of view in degrees
    pub fov: f32,
    /// Default camera near clip distance
    pub near: f32,
    /// Default camera far clip distance
    pub far: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            culling: CullMode::default(),
            max_lights: MAX_LIGHTS,
            fov: 60.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl RenderSettings {
    /// Parse settings from a TOML string and validate them.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check the settings describe a usable pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_lights > MAX_LIGHTS {
            return Err(ConfigError::Invalid(format!(
                "max_lights {} exceeds the supported maximum {MAX_LIGHTS}",
                self.max_lights
            )));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov {} must be within (0, 180) degrees",
                self.fov
            )));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(ConfigError::Invalid(format!(
                "clip planes near {} / far {} must satisfy 0 < near < far",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RenderSettings::default().validate().is_ok());
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let settings = RenderSettings::from_toml_str(
            r#"
culling = "single_plane"
fov = 75.0
"#,
        )
        .unwrap();

        assert_eq!(settings.culling, CullMode::SinglePlane);
        assert_eq!(settings.fov, 75.0);
        assert_eq!(settings.max_lights, MAX_LIGHTS);
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        let result = RenderSettings::from_toml_str("near = 100.0\nfar = 1.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_too_many_lights() {
        let result = RenderSettings::from_toml_str("max_lights = 9\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn cull_modes_map_to_plane_configs() {
        assert_eq!(CullMode::Off.cull_planes(), None);
        assert_eq!(
            CullMode::SinglePlane.cull_planes(),
            Some(CullPlanes::One(FrustumPlane::Bottom))
        );
        assert_eq!(CullMode::AllPlanes.cull_planes(), Some(CullPlanes::All));
    }
}
