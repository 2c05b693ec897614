//! Machine simulation
//!
//! - [`state`]: position, offsets, modes and per-tool extrusion
//! - [`arc`]: subdivision of G2/G3 moves into points
//! - [`interpreter`]: per-line command dispatch

pub mod arc;
pub mod interpreter;
pub mod state;

pub use arc::{ArcPath, ArcSettings};
pub use interpreter::Interpreter;
pub use state::{FirmwareRetract, MachineState, ToolExtrusion, ToolTable};
