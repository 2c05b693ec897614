//! Type aliases for the caller-supplied hooks of a scan.
//!
//! Hooks run synchronously on the scanning thread. They are boxed as
//! `Send` so an analyzer carrying them can be moved onto a worker thread.

use crate::error::Result;

// =============================================================================
// CALLBACK TYPES
// =============================================================================

/// A progress callback receiving a percentage in `0.0..=100.0`.
///
/// Returning an error does not stop the scan; the failure is logged and the
/// scan carries on.
pub type ProgressCallback = Box<dyn FnMut(f64) -> Result<()> + Send>;

/// A hook invoked once after every processed line.
///
/// Intended for caller-side rate limiting (sleeping, yielding).
pub type ThrottleHook = Box<dyn FnMut() + Send>;
