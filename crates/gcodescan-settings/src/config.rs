//! Configuration for G-code analysis
//!
//! Provides the printer profile the analyzer reads (axis speeds, extruder
//! nozzle offsets) and the tuning knobs of the analysis itself. Supports
//! JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Printer profile (axes, extruders)
//! - Analysis settings (tool limit, arc resolution, progress cadence)

use crate::error::{ConfigError, ConfigResult, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Feedrate used when the profile's X/Y speeds are unusable (mm/min)
pub const FALLBACK_FEEDRATE: f64 = 2000.0;

/// Configuration file name inside the application config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Speed limit of a single axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSettings {
    /// Maximum speed in mm/min
    pub speed: f64,
}

impl AxisSettings {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }
}

/// Per-axis speed limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesSettings {
    pub x: AxisSettings,
    pub y: AxisSettings,
    pub z: AxisSettings,
    pub e: AxisSettings,
}

impl Default for AxesSettings {
    fn default() -> Self {
        Self {
            x: AxisSettings::new(6000.0),
            y: AxisSettings::new(6000.0),
            z: AxisSettings::new(200.0),
            e: AxisSettings::new(300.0),
        }
    }
}

/// Extruder layout of the printer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtruderSettings {
    /// Number of physical extruders
    pub count: u32,
    /// XY nozzle offset of each tool relative to tool 0, in mm
    pub offsets: Vec<[f64; 2]>,
    /// Nozzle diameter in mm
    pub nozzle_diameter: f64,
}

impl Default for ExtruderSettings {
    fn default() -> Self {
        Self {
            count: 1,
            offsets: vec![[0.0, 0.0]],
            nozzle_diameter: 0.4,
        }
    }
}

impl ExtruderSettings {
    /// XY offset of `tool`; tools without a table entry have no offset
    pub fn offset(&self, tool: usize) -> (f64, f64) {
        self.offsets
            .get(tool)
            .map(|[x, y]| (*x, *y))
            .unwrap_or((0.0, 0.0))
    }
}

/// Printer profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterProfile {
    /// Display name
    pub name: String,
    /// Axis speed limits
    pub axes: AxesSettings,
    /// Extruder layout
    pub extruder: ExtruderSettings,
}

impl Default for PrinterProfile {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            axes: AxesSettings::default(),
            extruder: ExtruderSettings::default(),
        }
    }
}

impl PrinterProfile {
    /// Feedrate a program starts with before its first F word
    ///
    /// The slower of the X and Y axis speeds, or [`FALLBACK_FEEDRATE`] when
    /// that comes out as zero.
    pub fn default_feedrate(&self) -> f64 {
        let feedrate = self.axes.x.speed.min(self.axes.y.speed);
        if feedrate == 0.0 {
            FALLBACK_FEEDRATE
        } else {
            feedrate
        }
    }
}

/// Analysis tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Highest tool index a program may select before it is ignored
    pub max_extruders: u32,
    /// Maximum chord length of one interpolated arc segment, in mm
    pub mm_per_arc_segment: f64,
    /// Incremental arc steps between exact trigonometric corrections
    pub arc_correction_interval: u32,
    /// Lines between two progress reports
    pub progress_interval: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_extruders: 10,
            mm_per_arc_segment: 1.0,
            arc_correction_interval: 25,
            progress_interval: 1000,
        }
    }
}

/// Complete configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Printer profile
    #[serde(default)]
    pub profile: PrinterProfile,
    /// Analysis tuning
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), profile = %config.profile.name, "Loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the config at `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Platform-specific location of the user's config file
    pub fn default_path() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("gcodescan").join(CONFIG_FILE_NAME))
            .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let axes = &self.profile.axes;
        for (key, axis) in [
            ("profile.axes.x.speed", axes.x),
            ("profile.axes.y.speed", axes.y),
            ("profile.axes.z.speed", axes.z),
            ("profile.axes.e.speed", axes.e),
        ] {
            if !axis.speed.is_finite() || axis.speed < 0.0 {
                return Err(ConfigError::out_of_range(key, axis.speed));
            }
        }

        for (tool, [x, y]) in self.profile.extruder.offsets.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(ConfigError::out_of_range(
                    "profile.extruder.offsets",
                    format!("tool {}: [{}, {}]", tool, x, y),
                ));
            }
        }

        let analysis = &self.analysis;
        if !analysis.mm_per_arc_segment.is_finite() || analysis.mm_per_arc_segment <= 0.0 {
            return Err(ConfigError::out_of_range(
                "analysis.mm_per_arc_segment",
                analysis.mm_per_arc_segment,
            ));
        }

        if analysis.arc_correction_interval == 0 {
            return Err(ConfigError::out_of_range(
                "analysis.arc_correction_interval",
                0,
            ));
        }

        if analysis.progress_interval == 0 {
            return Err(ConfigError::out_of_range("analysis.progress_interval", 0));
        }

        Ok(())
    }
}
