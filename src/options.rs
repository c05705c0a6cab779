//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (window, rendering, demo scene) are consolidated
//! here. Options serialize to/from TOML; every sub-struct uses
//! `#[serde(default)]` so partial files (e.g. only overriding `[window]`)
//! work correctly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MicaError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Window title and initial size.
    pub window: WindowOptions,
    /// Surface and clear behavior.
    pub rendering: RenderingOptions,
    /// Demo scene content parameters.
    pub scene: SceneOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MicaError> {
        let content = std::fs::read_to_string(path).map_err(MicaError::Io)?;
        toml::from_str(&content)
            .map_err(|e| MicaError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MicaError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MicaError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MicaError::Io)?;
        }
        std::fs::write(path, content).map_err(MicaError::Io)
    }
}

/// Window title and initial logical size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowOptions {
    /// Window title.
    pub title: String,
    /// Initial logical width in pixels.
    pub width: u32,
    /// Initial logical height in pixels.
    pub height: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "Mica".into(),
            width: 960,
            height: 540,
        }
    }
}

/// Surface and clear behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderingOptions {
    /// RGBA clear color applied at the start of each frame.
    pub clear_color: [f32; 4],
    /// Whether presentation waits for vertical sync.
    pub vsync: bool,
    /// Frame-rate cap (0 = unlimited).
    pub target_fps: u32,
}

impl Default for RenderingOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.08, 0.08, 0.1, 1.0],
            vsync: true,
            target_fps: 0,
        }
    }
}

/// Demo scene content parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneOptions {
    /// Path to a PNG/JPEG texture for the demo quad. A checkerboard is
    /// generated when unset or unreadable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_path: Option<PathBuf>,
    /// Quad angular velocity in radians per second.
    pub rotation_speed: f32,
    /// Half-extent of the demo quad in clip space.
    pub quad_scale: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            texture_path: None,
            rotation_speed: 0.6,
            quad_scale: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let options = Options::default();
        let text = toml::to_string_pretty(&options).unwrap();
        let parsed: Options = toml::from_str(&text).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn partial_file_keeps_defaults_elsewhere() {
        let parsed: Options = toml::from_str(
            "[window]\ntitle = \"Custom\"\n\n[scene]\nrotation_speed = 2.5\n",
        )
        .unwrap();
        assert_eq!(parsed.window.title, "Custom");
        assert_eq!(parsed.window.width, WindowOptions::default().width);
        assert_eq!(parsed.scene.rotation_speed, 2.5);
        assert_eq!(parsed.rendering, RenderingOptions::default());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let parsed: Options = toml::from_str("").unwrap();
        assert_eq!(parsed, Options::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let mut options = Options::default();
        options.rendering.vsync = false;
        options.scene.quad_scale = 0.25;

        let path = std::env::temp_dir().join("mica_options_test.toml");
        options.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, options);
    }

    #[test]
    fn garbage_input_reports_parse_error() {
        let err = toml::from_str::<Options>("window = 3").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
