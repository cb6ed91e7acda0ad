//! Chain context supplied to validation.

use crate::error::ValidationError;
use crate::swap::Swap;

/// A read-only snapshot of chain state that validation runs against.
///
/// A `timestamp` of zero means "no chain context" (a dry run); the ticket
/// rules that depend on the latest block time are skipped in that case.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext<'a> {
    /// Current block number.
    pub block_number: u64,
    /// Latest block timestamp (Unix seconds).
    pub timestamp: u64,
    /// Slack, in seconds, added to the minimum remaining ticket lifetime.
    pub ticket_adjust: i64,
    /// The stored swap referenced by a recall or take.
    pub swap: Option<&'a Swap>,
}

impl<'a> ValidationContext<'a> {
    /// Create a context for the given block.
    pub fn new(block_number: u64, timestamp: u64) -> Self {
        Self {
            block_number,
            timestamp,
            ticket_adjust: 0,
            swap: None,
        }
    }

    /// Set the ticket lifetime slack.
    pub fn ticket_adjust(mut self, adjust: i64) -> Self {
        self.ticket_adjust = adjust;
        self
    }

    /// Attach the swap referenced by the operation.
    pub fn swap(mut self, swap: &'a Swap) -> Self {
        self.swap = Some(swap);
        self
    }

    /// The referenced swap, or [`ValidationError::SwapMissing`].
    pub fn require_swap(&self) -> Result<&'a Swap, ValidationError> {
        self.swap.ok_or(ValidationError::SwapMissing)
    }
}

/// The validation gate every native operation passes before it is applied.
pub trait Validate {
    /// Check the operation against business rules and chain context.
    fn validate(&self, ctx: &ValidationContext<'_>) -> Result<(), ValidationError>;
}
