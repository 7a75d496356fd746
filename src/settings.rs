//! Settings
//!
//! User-tunable options stored as RON (`assets/settings.ron`). Every field
//! has a default, so a partial file only overrides what it names.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SETTINGS_PATH: &str = "assets/settings.ron";

/// Error type for settings operations
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Serialize(ron::Error),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<ron::Error> for SettingsError {
    fn from(e: ron::Error) -> Self {
        SettingsError::Serialize(e)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
            SettingsError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_width: i32,
    pub window_height: i32,
    pub target_fps: u32,
    /// Radians of turn per pixel of mouse movement
    pub mouse_sensitivity: f32,
    /// Sound effect volume, 0.0-1.0
    pub volume: f32,
    /// Directory holding textures and sounds
    pub asset_dir: String,
    pub map_path: String,
    /// env_logger filter used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            target_fps: 60,
            mouse_sensitivity: 0.003,
            volume: 1.0,
            asset_dir: "assets".to_string(),
            map_path: "assets/maps/kitchen.txt".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let settings: Settings = ron::from_str(&contents)?;
        Ok(settings.sanitized())
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// broken. Never fails.
    ///
    /// Runs before the logger exists, so problems are returned as a message
    /// for the caller to log once logging is up.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Self, Option<String>) {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => (settings, None),
            Err(SettingsError::Io(e)) if e.kind() == ErrorKind::NotFound => (
                Self::default(),
                Some(format!("no settings at {}, using defaults", path.display())),
            ),
            Err(e) => (
                Self::default(),
                Some(format!("ignoring settings at {}: {}", path.display(), e)),
            ),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        let text = ron::ser::to_string_pretty(self, config)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Write these settings to `path` unless a file is already there, so a
    /// first run leaves an editable copy. Returns true if it wrote one.
    pub fn save_if_missing<P: AsRef<Path>>(&self, path: P) -> Result<bool, SettingsError> {
        let path = path.as_ref();
        if path.exists() {
            return Ok(false);
        }
        self.save(path)?;
        Ok(true)
    }

    /// Clamp values into usable ranges
    fn sanitized(mut self) -> Self {
        self.window_width = self.window_width.max(320);
        self.window_height = self.window_height.max(240);
        self.target_fps = self.target_fps.clamp(15, 240);
        self.volume = self.volume.clamp(0.0, 1.0);
        if !(self.mouse_sensitivity.is_finite() && self.mouse_sensitivity > 0.0) {
            self.mouse_sensitivity = Settings::default().mouse_sensitivity;
        }
        self
    }

    /// Seconds per frame for the frame limiter
    pub fn frame_time(&self) -> f64 {
        1.0 / self.target_fps.max(1) as f64
    }
}
