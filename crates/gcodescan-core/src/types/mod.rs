//! Type system utilities and aliases.
//!
//! This module provides the callback aliases and the cancellation handle
//! shared between the analyzer and its callers.
//!
//! ## Modules
//!
//! - [`aliases`]: Boxed callback types for progress reporting and throttling
//! - [`abort`]: `AbortHandle`, the cross-thread cancellation flag

pub mod abort;
pub mod aliases;

pub use abort::AbortHandle;
pub use aliases::*;
