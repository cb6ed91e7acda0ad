//! Error types for native operations.

use ledgerops_core::{CodecError, U256};
use thiserror::Error;

use crate::operation::OperationKind;

/// A business rule rejected an operation.
///
/// Validation is deterministic: the same parameters and context always give
/// the same answer, so none of these are worth retrying without a new
/// context (for example a later block timestamp).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("asset name, symbol and total must be set")]
    AssetFieldsMissing,

    #[error("asset decimals must be between 0 and 18, got {0}")]
    DecimalsOutOfRange(u8),

    #[error("{field} length {len} is greater than {max} chars")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("value must be set and greater than 0")]
    ValueNotPositive,

    #[error("receiver address must be set and not the zero address")]
    ZeroReceiver,

    #[error("{window}: start time {start} is after end time {end}")]
    InvertedWindow {
        window: &'static str,
        start: u64,
        end: u64,
    },

    #[error("time lock end {end} is before latest block time {timestamp}")]
    TimeLockEnded { end: u64, timestamp: u64 },

    #[error("ticket lifetime too short: start {start}, end {end}")]
    TicketLifetimeTooShort { start: u64, end: u64 },

    #[error("ticket start {start} is more than 3 hours after latest block time {timestamp}")]
    TicketStartTooLate { start: u64, timestamp: u64 },

    #[error("ticket end {end} is less than 1 week (adjusted by {adjust}s) after latest block time {timestamp}")]
    TicketExpiresTooSoon {
        end: u64,
        timestamp: u64,
        adjust: i64,
    },

    #[error("min_from_amount, min_to_amount and swap_size must be at least 1")]
    SwapAmountsNotPositive,

    #[error("{0} too large")]
    SwapTotalOverflow(&'static str),

    #[error("{window} end time {end} is not after latest block time {timestamp}")]
    SwapWindowClosed {
        window: &'static str,
        end: u64,
        timestamp: u64,
    },

    #[error("swap illegal: {0} must be set and greater than 0")]
    SwapIllegal(&'static str),

    #[error("take size {size} must be at least 1 and at most swap size {swap_size}")]
    TakeSizeOutOfRange { size: U256, swap_size: U256 },

    #[error("referenced swap is missing from the validation context")]
    SwapMissing,
}

/// Errors from decoding, encoding and validating operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpsError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("unknown operation kind: {0}")]
    UnknownKind(u64),

    #[error("operation kind {0:?} has no payload type")]
    UnsupportedKind(OperationKind),
}

/// Result type for operation handling.
pub type Result<T> = std::result::Result<T, OpsError>;
