//! Geometry data models
//!
//! This module provides:
//! - `Vector3D`, the immutable coordinate/arithmetic value type
//! - `Axis`, the per-axis selector used instead of field-name lookups
//! - `MinMax3D`, the running bounding-box tracker

pub mod bounds;
pub mod vector;

pub use bounds::MinMax3D;
pub use vector::{Axis, Vector3D};
