use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use treeline_scene::Perspective;

/// Errors from loading or validating settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Window and projection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    pub fullscreen: bool,
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            fullscreen: false,
            width: 640,
            height: 480,
            fov: 1.0_f32.to_degrees(),
            near: 0.01,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsSettings {
    /// Fog end distance; also sizes the terrain grid.
    pub view_distance: f32,
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            view_distance: 100.0,
        }
    }
}

/// Movement speeds (units per second) and pointer sensitivity (radians per
/// pixel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub speed: f32,
    pub boost_speed: f32,
    pub x_sensitivity: f32,
    pub y_sensitivity: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            speed: 10.0,
            boost_speed: 20.0,
            x_sensitivity: 0.01,
            y_sensitivity: 0.01,
        }
    }
}

/// Complete viewer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub video: VideoSettings,
    pub graphics: GraphicsSettings,
    pub controls: ControlSettings,
}

impl Settings {
    /// Parse settings from YAML. Missing sections and keys take defaults.
    ///
    /// A key whose value has the wrong type is skipped with a warning and
    /// keeps its default; the rest of the file still applies. Malformed YAML
    /// and a document that is not a mapping are errors.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Value = serde_yaml::from_str(text)?;
        let settings = match document {
            Value::Null => Self::default(),
            Value::Mapping(sections) => Self::merge_sections(sections)?,
            other => serde_yaml::from_value(other)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Lay each user key over the defaults, keeping only those that parse.
    fn merge_sections(sections: Mapping) -> Result<Self, ConfigError> {
        let mut merged = serde_yaml::to_value(Self::default())?;
        for (section, keys) in sections {
            let Value::Mapping(keys) = keys else {
                tracing::warn!(section = ?section, "settings section is not a mapping, using defaults");
                continue;
            };
            for (key, value) in keys {
                let mut candidate = merged.clone();
                let Some(Value::Mapping(target)) = candidate.get_mut(&section) else {
                    tracing::debug!(section = ?section, "unknown settings section ignored");
                    break;
                };
                target.insert(key.clone(), value);
                match serde_yaml::from_value::<Self>(candidate.clone()) {
                    Ok(_) => merged = candidate,
                    Err(e) => tracing::warn!(
                        section = ?section,
                        key = ?key,
                        error = %e,
                        "invalid setting, keeping default"
                    ),
                }
            }
        }
        Ok(serde_yaml::from_value(merged)?)
    }

    /// Read and parse a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Like [`Settings::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "settings file not found, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values that would yield a degenerate projection or motion.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.video;
        if v.width == 0 || v.height == 0 {
            return Err(invalid(
                "video.width/height",
                format!("must be positive, got {}x{}", v.width, v.height),
            ));
        }
        if !(v.fov > 0.0 && v.fov < 180.0) {
            return Err(invalid(
                "video.fov",
                format!("must be in (0, 180) degrees, got {}", v.fov),
            ));
        }
        if !(v.near > 0.0 && v.near < v.far) {
            return Err(invalid(
                "video.near/far",
                format!("need 0 < near < far, got near={} far={}", v.near, v.far),
            ));
        }
        if !(self.graphics.view_distance > 0.0) {
            return Err(invalid(
                "graphics.view_distance",
                format!("must be positive, got {}", self.graphics.view_distance),
            ));
        }
        let c = &self.controls;
        if !(c.speed.is_finite() && c.boost_speed.is_finite()) {
            return Err(invalid("controls.speed", "must be finite".to_string()));
        }
        if !(c.x_sensitivity.is_finite() && c.y_sensitivity.is_finite()) {
            return Err(invalid("controls.sensitivity", "must be finite".to_string()));
        }
        Ok(())
    }

    #[inline]
    pub fn fov_radians(&self) -> f32 {
        self.video.fov.to_radians()
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.video.width as f32 / self.video.height as f32
    }

    /// Projection for the configured window size.
    pub fn perspective(&self) -> Perspective {
        Perspective::new(
            self.fov_radians(),
            self.aspect(),
            self.video.near,
            self.video.far,
        )
    }
}

fn invalid(key: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { key, reason }
}
