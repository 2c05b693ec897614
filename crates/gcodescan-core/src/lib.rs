//! # GCodeScan Core
//!
//! Core types, traits, and utilities for GCodeScan.
//! Provides the geometry primitives, error types, units, and callback
//! aliases shared by the settings and analyzer crates.

pub mod data;
pub mod error;
pub mod types;
pub mod units;

pub use data::{Axis, MinMax3D, Vector3D};

pub use error::{AnalysisError, Error, Result};

pub use types::{AbortHandle, ProgressCallback, ThrottleHook};

pub use units::{format_minutes, LengthUnit};
