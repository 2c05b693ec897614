//! Command classification
//!
//! A line is interpreted as at most one command. The G word is looked at
//! first, then M, then T; the first one that carries an integer decides the
//! family and everything else on the line is only read as parameters.

use super::parser::code_int;
use gcodescan_core::LengthUnit;
use std::fmt;

/// Command family of a line, with its raw code number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFamily {
    /// `G` motion and machine-state codes
    Motion(i64),
    /// `M` miscellaneous codes
    Misc(i64),
    /// `T` tool selection
    ToolSelect(i64),
}

impl CommandFamily {
    /// Family of `line`, honouring the G > M > T priority
    pub fn classify(line: &str) -> Option<Self> {
        code_int(line, 'G')
            .map(Self::Motion)
            .or_else(|| code_int(line, 'M').map(Self::Misc))
            .or_else(|| code_int(line, 'T').map(Self::ToolSelect))
    }
}

impl fmt::Display for CommandFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Motion(code) => write!(f, "G{}", code),
            Self::Misc(code) => write!(f, "M{}", code),
            Self::ToolSelect(code) => write!(f, "T{}", code),
        }
    }
}

/// Commands the analyzer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// G0 / G1
    LinearMove,
    /// G2 (clockwise) / G3 (counter-clockwise)
    ArcMove { clockwise: bool },
    /// G4
    Dwell,
    /// G10
    FirmwareRetract,
    /// G11
    FirmwareRecover,
    /// G20 / G21
    SetUnits(LengthUnit),
    /// G28
    Home,
    /// G90
    AbsolutePositioning,
    /// G91
    RelativePositioning,
    /// G92
    SetPosition,
    /// M82
    AbsoluteExtrusion,
    /// M83
    RelativeExtrusion,
    /// M207
    RetractSettings,
    /// M208
    RecoverSettings,
    /// M220
    FeedrateOverride,
    /// M221
    FlowrateOverride,
    /// T<n>
    SelectTool(i64),
    /// Recognized family, code without effect on the analysis
    Ignored(CommandFamily),
}

impl Command {
    /// Classify a comment-free line; `None` when no command letter is present
    pub fn parse(line: &str) -> Option<Self> {
        CommandFamily::classify(line).map(Self::from)
    }
}

impl From<CommandFamily> for Command {
    fn from(family: CommandFamily) -> Self {
        match family {
            CommandFamily::Motion(code) => match code {
                0 | 1 => Self::LinearMove,
                2 => Self::ArcMove { clockwise: true },
                3 => Self::ArcMove { clockwise: false },
                4 => Self::Dwell,
                10 => Self::FirmwareRetract,
                11 => Self::FirmwareRecover,
                20 | 21 => LengthUnit::from_gcode(code)
                    .map(Self::SetUnits)
                    .unwrap_or(Self::Ignored(family)),
                28 => Self::Home,
                90 => Self::AbsolutePositioning,
                91 => Self::RelativePositioning,
                92 => Self::SetPosition,
                _ => Self::Ignored(family),
            },
            CommandFamily::Misc(code) => match code {
                82 => Self::AbsoluteExtrusion,
                83 => Self::RelativeExtrusion,
                207 => Self::RetractSettings,
                208 => Self::RecoverSettings,
                220 => Self::FeedrateOverride,
                221 => Self::FlowrateOverride,
                _ => Self::Ignored(family),
            },
            CommandFamily::ToolSelect(tool) => Self::SelectTool(tool),
        }
    }
}
