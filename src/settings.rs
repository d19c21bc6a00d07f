//! Display settings and preferences
//!
//! Persisted in LocalStorage on web, read from a JSON file on native.
//! Physics constants live in [`crate::consts`] and are not configurable.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::PIXELS_PER_UNIT;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Polygon segments used to draw a full circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 16,
            QualityPreset::Medium => 32,
            QualityPreset::High => 64,
        }
    }
}

/// Failure to read or parse a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Display settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Circle tessellation quality
    pub quality: QualityPreset,

    // === Display ===
    /// Pixels per world unit
    pub scale: f32,
    /// Canvas clear colour (CSS)
    pub background: String,
    /// Ball fill colour (CSS)
    pub ball_color: String,
    /// Bounding circle stroke colour (CSS)
    pub boundary_color: String,
    /// Bounding circle stroke width in pixels
    pub boundary_line_width: f32,

    // === Simulation control ===
    /// Start with the simulation paused
    pub start_paused: bool,
    /// Fixed seed for ball placement (clock-derived when absent)
    pub seed: Option<u64>,

    // === Diagnostics ===
    /// Log level filter ("error" .. "trace")
    pub log_level: String,
    /// Frames to run in native headless mode
    pub native_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            scale: PIXELS_PER_UNIT,
            background: "#000000".to_string(),
            ball_color: "#ffffff".to_string(),
            boundary_color: "#ffffff".to_string(),
            boundary_line_width: 2.0,

            start_paused: false,
            seed: None,

            log_level: "info".to_string(),
            native_frames: 600,
        }
    }
}

impl Settings {
    /// Smallest and largest accepted display scale
    pub const SCALE_RANGE: (f32, f32) = (1.0, 1000.0);

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.validated())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp out-of-range values into something drawable
    pub fn validated(mut self) -> Self {
        let (min, max) = Self::SCALE_RANGE;
        if !self.scale.is_finite() {
            self.scale = PIXELS_PER_UNIT;
        }
        self.scale = self.scale.clamp(min, max);
        if !self.boundary_line_width.is_finite() || self.boundary_line_width < 0.0 {
            self.boundary_line_width = 0.0;
        }
        self
    }

    /// `log` filter for the configured level, `Info` when unrecognised
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bouncing_balls_settings";

    /// Environment variable naming a settings file (native only)
    pub const PATH_ENV: &'static str = "BOUNCING_BALLS_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("Settings not saved: LocalStorage unavailable");
            return;
        };

        match serde_json::to_string(self) {
            Ok(json) => log_save_outcome(storage.set_item(Self::STORAGE_KEY, &json)),
            Err(e) => log_save_outcome(Err(e)),
        };
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by `$BOUNCING_BALLS_SETTINGS`, falling back
    /// to defaults when unset or unreadable
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {path}: {e}");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_path(&self, path: impl AsRef<std::path::Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Log whether a settings write went through; true on success
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn log_save_outcome<E: fmt::Debug>(result: Result<(), E>) -> bool {
    match result {
        Ok(()) => {
            log::info!("Settings saved");
            true
        }
        Err(e) => {
            log::warn!("Settings not saved: {e:?}");
            false
        }
    }
}
