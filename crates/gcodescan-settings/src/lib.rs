//! GCodeScan Settings Crate
//!
//! Handles the printer profile and analysis configuration, including
//! JSON/TOML persistence and validation.

pub mod config;
pub mod error;

pub use config::{
    AnalysisSettings, AxesSettings, AxisSettings, Config, ExtruderSettings, PrinterProfile,
    FALLBACK_FEEDRATE,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
