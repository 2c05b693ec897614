//! Slicer metadata embedded in comments
//!
//! Two kinds of comment carry the filament diameter:
//! - a plain `filament_diameter = 1.75` declaration, possibly listing one
//!   value per extruder (`1.75,1.75`)
//! - a compressed profile block: prefix, then base64 of a zlib stream whose
//!   content is `key=value` records separated by a backspace byte

use crate::error::{MetadataError, MetadataResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use std::collections::HashMap;
use std::io::Read;

/// Key of the filament diameter, both as a plain comment and inside profiles
pub const FILAMENT_DIAMETER_KEY: &str = "filament_diameter";

/// Separator between records of a decoded profile block
pub const RECORD_SEPARATOR: u8 = 0x08;

/// Comment prefixes introducing a compressed profile block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilePrefix {
    /// `CURA_PROFILE_STRING:`
    Cura,
    /// `CURA_OCTO_PROFILE_STRING:`
    CuraOcto,
}

impl ProfilePrefix {
    pub const ALL: [ProfilePrefix; 2] = [ProfilePrefix::Cura, ProfilePrefix::CuraOcto];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cura => "CURA_PROFILE_STRING:",
            Self::CuraOcto => "CURA_OCTO_PROFILE_STRING:",
        }
    }

    /// Prefix `comment` starts with, if any
    pub fn detect(comment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|prefix| comment.starts_with(prefix.as_str()))
    }
}

/// Decode the profile block in `comment`
///
/// Empty records (for example after a trailing separator) are skipped; any
/// other record without `=` fails the whole block.
pub fn parse_profile_string(
    comment: &str,
    prefix: ProfilePrefix,
) -> MetadataResult<HashMap<String, String>> {
    let payload = comment
        .strip_prefix(prefix.as_str())
        .ok_or_else(|| MetadataError::MissingPrefix(prefix.as_str().to_string()))?
        .trim();

    let compressed = STANDARD.decode(payload)?;
    let mut decoded = Vec::new();
    ZlibDecoder::new(compressed.as_slice()).read_to_end(&mut decoded)?;

    decoded
        .split(|byte| *byte == RECORD_SEPARATOR)
        .filter(|record| !record.is_empty())
        .map(|record| {
            let record = String::from_utf8_lossy(record);
            record
                .split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| MetadataError::MalformedRecord(record.to_string()))
        })
        .collect()
}

/// Decode the profile block in `comment` if it carries one
///
/// Every decoding failure yields `None`.
pub fn extract_profile(comment: &str) -> Option<HashMap<String, String>> {
    let prefix = ProfilePrefix::detect(comment)?;
    match parse_profile_string(comment, prefix) {
        Ok(profile) => Some(profile),
        Err(err) => {
            tracing::debug!(prefix = prefix.as_str(), error = %err, "Ignoring unreadable profile block");
            None
        }
    }
}

/// Filament diameter declared by a (trimmed) comment, if any
pub fn filament_diameter(comment: &str) -> Option<f64> {
    if let Some(rest) = comment.strip_prefix(FILAMENT_DIAMETER_KEY) {
        let (_, value) = rest.split_once('=')?;
        return parse_diameter(value);
    }

    let profile = extract_profile(comment)?;
    parse_diameter(profile.get(FILAMENT_DIAMETER_KEY)?)
}

// A plain number, or the first entry of a per-extruder list.
fn parse_diameter(value: &str) -> Option<f64> {
    let value = value.trim();
    value
        .parse::<f64>()
        .ok()
        .or_else(|| value.split(',').next()?.trim().parse::<f64>().ok())
        .filter(|diameter| diameter.is_finite() && *diameter >= 0.0)
}
