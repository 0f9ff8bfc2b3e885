//! # Errors
//!
//! Failures the engine reports to its host. Drawing itself never fails:
//! out-of-bounds writes are silent no-ops. Only decoding artwork, loading it
//! into a differently-sized editor and building an editor from a bad
//! configuration surface here.

use thiserror::Error;

/// Result alias for fallible engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the pixel canvas engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The blob was written by a codec revision this build does not understand.
    #[error("unsupported artwork codec version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The blob cannot even hold its header and trailer words.
    #[error("artwork blob too short: {len} words")]
    TruncatedBlob { len: usize },

    /// The declared encoded length does not fit between header and trailer.
    #[error("encoded length {declared} does not match the {available} words available")]
    EncodedLengthOutOfRange { declared: usize, available: usize },

    /// A run-length stream must consist of whole (value, count) pairs.
    #[error("run-length stream has odd length {len}")]
    OddRunStream { len: usize },

    /// The expanded runs do not cover the declared grid.
    #[error("decoded {actual} pixels, expected {expected}")]
    PixelCountMismatch { expected: usize, actual: usize },

    /// Byte transport whose length is not a whole number of 32-bit words.
    #[error("byte length {len} is not a multiple of 4")]
    MisalignedBytes { len: usize },

    /// Text transport could not be decoded.
    #[error("invalid base64 artwork: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The artwork is valid but sized for a different editing surface.
    #[error("artwork is {}x{}, editor is {}x{}", found.0, found.1, expected.0, expected.1)]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    /// Editor configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

impl Error {
    /// True for every failure that means "this blob is not valid artwork".
    pub fn is_corrupt_stream(&self) -> bool {
        matches!(
            self,
            Error::TruncatedBlob { .. }
                | Error::EncodedLengthOutOfRange { .. }
                | Error::OddRunStream { .. }
                | Error::PixelCountMismatch { .. }
                | Error::MisalignedBytes { .. }
                | Error::Base64(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_mismatch_is_not_reported_as_corruption() {
        let err = Error::UnsupportedVersion {
            found: 2,
            expected: 1,
        };
        assert!(!err.is_corrupt_stream());
        assert!(Error::OddRunStream { len: 3 }.is_corrupt_stream());
    }

    #[test]
    fn dimension_mismatch_message_names_both_sizes() {
        let err = Error::DimensionMismatch {
            expected: (16, 16),
            found: (8, 8),
        };
        assert_eq!(err.to_string(), "artwork is 8x8, editor is 16x16");
    }
}
