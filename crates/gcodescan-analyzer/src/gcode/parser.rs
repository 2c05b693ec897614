//! Parameter extraction from raw G-code lines
//!
//! Parameters are located with a raw substring scan: the *first* occurrence
//! of the letter anywhere in the line wins, and the value runs up to the next
//! whitespace. No word splitting happens, so a letter that also appears
//! earlier in the line (inside another word or a message) is picked up
//! instead of the intended parameter. Callers strip comments first, which
//! removes most such collisions.

use gcodescan_core::{Axis, Vector3D};

/// Comment marker; everything after it is not part of the command
pub const COMMENT_MARKER: char = ';';

/// Text following the first `code` letter, up to whitespace or end of line
fn code_value(line: &str, code: char) -> Option<&str> {
    let start = line.find(code)? + code.len_utf8();
    let rest = &line[start..];
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Integer value of parameter `code`
///
/// Returns `None` when the letter is missing or its value is not an integer.
pub fn code_int(line: &str, code: char) -> Option<i64> {
    code_value(line, code)?.parse().ok()
}

/// Floating point value of parameter `code`
///
/// Returns `None` when the letter is missing, the value does not parse, or
/// it parses to NaN or an infinity.
pub fn code_float(line: &str, code: char) -> Option<f64> {
    code_value(line, code)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Split a line into its command part and trimmed comment text
pub fn split_comment(line: &str) -> (&str, Option<&str>) {
    match line.find(COMMENT_MARKER) {
        Some(idx) => (&line[..idx], Some(line[idx + 1..].trim())),
        None => (line, None),
    }
}

/// X/Y/Z words of a line, each optional
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisWords {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl AxisWords {
    /// Read the X, Y and Z parameters of `line`
    pub fn parse(line: &str) -> Self {
        Self {
            x: code_float(line, 'X'),
            y: code_float(line, 'Y'),
            z: code_float(line, 'Z'),
        }
    }

    /// Value given for `axis`, if any
    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Whether no axis word was present
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    /// Words as a vector, missing axes replaced by the matching `fallback` component
    pub fn or(&self, fallback: Vector3D) -> Vector3D {
        Vector3D::new(
            self.x.unwrap_or(fallback.x),
            self.y.unwrap_or(fallback.y),
            self.z.unwrap_or(fallback.z),
        )
    }
}
