//! Error types for identifier decoding and persistence.

use thiserror::Error;

/// Errors that can occur while decoding or loading identifiers.
///
/// Every variant that concerns a concrete identifier type carries the
/// literal type name (`"Hash"`, `"Address"`, `"UnprefixedHash"`, ...) so
/// messages stay precise without any runtime type inspection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("hex string without 0x prefix")]
    MissingPrefix,

    #[error("hex string of odd length")]
    OddLength,

    #[error("invalid hex string")]
    InvalidHex,

    #[error("hex string has length {got}, want {want} for {type_name}")]
    WrongLength {
        type_name: &'static str,
        got: usize,
        want: usize,
    },

    #[error("can't scan []byte of len {got} into {type_name}, want {want}")]
    LengthMismatch {
        type_name: &'static str,
        got: usize,
        want: usize,
    },

    #[error("can't scan {found} into {type_name}")]
    TypeMismatch {
        type_name: &'static str,
        found: String,
    },

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl CodecError {
    /// True for errors caused by malformed text input (bad hex syntax or a
    /// decoded length that does not match the target type).
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            CodecError::MissingPrefix
                | CodecError::OddLength
                | CodecError::InvalidHex
                | CodecError::WrongLength { .. }
                | CodecError::InvalidAddress(_)
        )
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
