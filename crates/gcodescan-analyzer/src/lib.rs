//! # GCodeScan Analyzer
//!
//! Offline analysis of 3D-printer G-code: replays a program against a
//! simulated machine and reports the extruded part's extent, the filament
//! used per tool and the estimated print time.
//! Includes the parameter tokenizer, slicer metadata decoding, the machine
//! simulator, the scan driver and a lenient file reader.

pub mod analyzer;
pub mod error;
pub mod gcode;
pub mod result;
pub mod simulator;
pub mod utils;

pub use analyzer::{GcodeAnalyzer, ProgressBasis};

pub use error::{MetadataError, MetadataResult};

pub use gcode::{
    code_float, code_int, extract_profile, parse_profile_string, split_comment, AxisWords,
    Command, CommandFamily, ProfilePrefix,
};

pub use result::{AnalysisResult, Dimensions, PrintingArea};

pub use simulator::{
    ArcPath, ArcSettings, FirmwareRetract, Interpreter, MachineState, ToolExtrusion, ToolTable,
};

pub use utils::{GcodeFileReader, LossyLines};
