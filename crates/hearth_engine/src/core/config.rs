//! # Engine Configuration
//!
//! All configuration structures for the engine loop, the output window and
//! scene behavior. Every struct derives serde and fills missing fields from
//! its `Default`, so a config file only needs the values it changes:
//!
//! ```toml
//! log_level = "debug"
//! max_frames = 120
//!
//! [window]
//! title = "Cube"
//!
//! [scene]
//! init_policy = "degraded"
//! ```

use serde::{Deserialize, Serialize};

use crate::render::Color;

pub use crate::config::{Config, ConfigError};

/// # Window Configuration
///
/// Size and title of the output surface. The aspect ratio feeds the default
/// camera projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl WindowConfig {
    /// Create a window configuration
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
        }
    }

    /// Width / height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::Invalid("window title must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("Hearth", 800, 600)
    }
}

/// What a scene does when a component fails to initialize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitPolicy {
    /// Stop at the first failure and report it; the scene is not loaded
    #[default]
    ShortCircuit,
    /// Mark failing components as failed, skip them from then on and keep going
    Degraded,
}

/// # Scene Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Init failure handling
    pub init_policy: InitPolicy,
    /// Color the frame is cleared to
    pub clear_color: Color,
}

impl SceneConfig {
    /// Set the init failure policy
    pub fn with_init_policy(mut self, policy: InitPolicy) -> Self {
        self.init_policy = policy;
        self
    }

    /// Set the clear color
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            init_policy: InitPolicy::default(),
            clear_color: Color::CORNFLOWER_BLUE,
        }
    }
}

/// # Engine Configuration
///
/// Top-level configuration applications load and hand to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Stop after this many frames; run until the application quits when `None`
    pub max_frames: Option<u64>,
    /// Output window
    pub window: WindowConfig,
    /// Scene behavior
    pub scene: SceneConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            max_frames: None,
            window: WindowConfig::default(),
            scene: SceneConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Limit the run to a number of frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Set window configuration
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    /// Set scene configuration
    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            max_frames = 3

            [scene]
            init_policy = "degraded"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_frames, Some(3));
        assert_eq!(config.scene.init_policy, InitPolicy::Degraded);
        assert_eq!(config.scene.clear_color, Color::CORNFLOWER_BLUE);
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_window() {
        let zero = EngineConfig::new().with_window(WindowConfig::new("Cube", 0, 600));
        assert!(matches!(zero.validate(), Err(ConfigError::Invalid(_))));

        let untitled = EngineConfig::new().with_window(WindowConfig::new("  ", 800, 600));
        assert!(matches!(untitled.validate(), Err(ConfigError::Invalid(_))));

        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let config = EngineConfig::new().with_log_level("chatty");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ron_round_trip_through_file() {
        let path = std::env::temp_dir().join("hearth_engine_config_test.ron");
        let path = path.to_string_lossy().to_string();
        let config = EngineConfig::new()
            .with_max_frames(10)
            .with_scene(SceneConfig::default().with_init_policy(InitPolicy::Degraded));

        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            EngineConfig::default().save_to_file("config.json"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(WindowConfig::new("w", 1920, 1080).aspect_ratio(), 1920.0 / 1080.0);
    }
}
