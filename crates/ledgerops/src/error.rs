//! Error types for the gate.

use ledgerops_ops::{OpsError, ValidationError};
use thiserror::Error;

/// Errors that can occur while admitting operations or signalling auto-buy.
#[derive(Debug, Error)]
pub enum GateError {
    /// Decoding, encoding or validation failed.
    #[error("{0}")]
    Ops(#[from] OpsError),

    /// The auto-buy queue has no free slot.
    #[error("auto-buy queue is full")]
    AutoBuyQueueFull,

    /// The receiving side of the auto-buy queue was dropped.
    #[error("auto-buy queue is closed")]
    AutoBuyClosed,
}

impl From<ValidationError> for GateError {
    fn from(e: ValidationError) -> Self {
        GateError::Ops(OpsError::Validation(e))
    }
}

impl GateError {
    /// The business rule that rejected the operation, if that was the cause.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            GateError::Ops(OpsError::Validation(e)) => Some(e),
            _ => None,
        }
    }
}

/// Result type for gate operations.
pub type Result<T> = std::result::Result<T, GateError>;
