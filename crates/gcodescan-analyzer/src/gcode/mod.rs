//! G-Code line handling
//!
//! This module provides:
//! - Parameter extraction from raw lines
//! - Command classification
//! - Slicer metadata decoding from comments

pub mod command;
pub mod metadata;
pub mod parser;

pub use command::*;
pub use metadata::{extract_profile, parse_profile_string, ProfilePrefix};
pub use parser::*;
