//! # GCodeScan
//!
//! Offline analyzer for 3D-printer G-code. Replays a program against a
//! simulated printer, without touching hardware, and reports:
//! - Dimensions and printing area of the extruded part
//! - Filament length and volume per tool
//! - Estimated print time
//!
//! ## Architecture
//!
//! GCodeScan is organized as a workspace with multiple crates:
//!
//! 1. **gcodescan-core** - Geometry primitives, errors, units, hook aliases
//! 2. **gcodescan-settings** - Printer profile and analysis settings
//! 3. **gcodescan-analyzer** - Tokenizer, metadata, simulator, scan driver
//! 4. **gcodescan** - Command-line binary that integrates all crates

pub mod cli;

pub use gcodescan_core::{
    format_minutes, AbortHandle, AnalysisError, Axis, Error, LengthUnit, MinMax3D,
    ProgressCallback, Result, ThrottleHook, Vector3D,
};

pub use gcodescan_settings::{
    AnalysisSettings, AxesSettings, AxisSettings, Config, ConfigError, ExtruderSettings,
    PrinterProfile, SettingsError,
};

pub use gcodescan_analyzer::{
    AnalysisResult, Dimensions, GcodeAnalyzer, GcodeFileReader, Interpreter, MachineState,
    PrintingArea,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting, on stderr so stdout stays
///   free for results
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
