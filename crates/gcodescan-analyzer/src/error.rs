//! Error types for the analyzer crate.
//!
//! Only metadata decoding has its own error type; it is consumed inside the
//! interpreter and never ends a scan.

use thiserror::Error;

/// Errors raised while decoding an embedded profile block.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The comment does not start with the expected prefix.
    #[error("Comment does not start with '{0}'")]
    MissingPrefix(String),

    /// The payload is not valid base64.
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded payload is not a valid zlib stream.
    #[error("Corrupt compressed payload: {0}")]
    Inflate(#[from] std::io::Error),

    /// A record is not of the form `key=value`.
    #[error("Malformed record: {0:?}")]
    MalformedRecord(String),
}

/// Result type alias for metadata decoding.
pub type MetadataResult<T> = Result<T, MetadataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_error_display() {
        let err = MetadataError::MissingPrefix("CURA_PROFILE_STRING:".to_string());
        assert_eq!(
            err.to_string(),
            "Comment does not start with 'CURA_PROFILE_STRING:'"
        );

        let err = MetadataError::MalformedRecord("layer_height".to_string());
        assert_eq!(err.to_string(), "Malformed record: \"layer_height\"");
    }
}
