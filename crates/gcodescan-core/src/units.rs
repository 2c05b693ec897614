//! Unit handling
//!
//! Length units selected by a program (G20/G21) and the conversions the
//! analyzer reports in: millimeters for lengths, cubic centimeters for
//! volumes, minutes for time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Cubic millimeters per cubic centimeter
pub const MM3_PER_CM3: f64 = 1000.0;

/// Program length unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Millimeters (G21)
    #[default]
    Millimeters,
    /// Inches (G20)
    Inches,
}

impl LengthUnit {
    /// Factor converting a program value in this unit to millimeters
    pub fn scale(self) -> f64 {
        match self {
            Self::Millimeters => 1.0,
            Self::Inches => MM_PER_INCH,
        }
    }

    /// Unit selected by a G-code number, if it is a unit command
    pub fn from_gcode(code: i64) -> Option<Self> {
        match code {
            20 => Some(Self::Inches),
            21 => Some(Self::Millimeters),
            _ => None,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeters => write!(f, "mm"),
            Self::Inches => write!(f, "in"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mm" | "millimeters" | "metric" => Ok(Self::Millimeters),
            "in" | "inch" | "inches" | "imperial" => Ok(Self::Inches),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// Cross-section area of round filament in mm²
pub fn filament_cross_section(diameter_mm: f64) -> f64 {
    let radius = diameter_mm / 2.0;
    std::f64::consts::PI * radius * radius
}

/// Format a duration given in minutes as `HH:MM:SS`
///
/// Negative and non-finite inputs format as zero.
pub fn format_minutes(minutes: f64) -> String {
    let total_seconds = if minutes.is_finite() && minutes > 0.0 {
        (minutes * 60.0).round() as u64
    } else {
        0
    };
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factors() {
        assert_eq!(LengthUnit::Millimeters.scale(), 1.0);
        assert_eq!(LengthUnit::Inches.scale(), 25.4);
    }

    #[test]
    fn test_from_gcode() {
        assert_eq!(LengthUnit::from_gcode(20), Some(LengthUnit::Inches));
        assert_eq!(LengthUnit::from_gcode(21), Some(LengthUnit::Millimeters));
        assert_eq!(LengthUnit::from_gcode(1), None);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("MM".parse::<LengthUnit>(), Ok(LengthUnit::Millimeters));
        assert_eq!("inch".parse::<LengthUnit>(), Ok(LengthUnit::Inches));
        assert!("furlong".parse::<LengthUnit>().is_err());
        assert_eq!(LengthUnit::Inches.to_string(), "in");
    }

    #[test]
    fn test_filament_cross_section() {
        let area = filament_cross_section(2.0);
        assert!((area - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(filament_cross_section(0.0), 0.0);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0.0), "00:00:00");
        assert_eq!(format_minutes(1.5), "00:01:30");
        assert_eq!(format_minutes(125.25), "02:05:15");
        assert_eq!(format_minutes(-3.0), "00:00:00");
        assert_eq!(format_minutes(f64::NAN), "00:00:00");
    }
}
