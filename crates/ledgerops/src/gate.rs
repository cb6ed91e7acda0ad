//! The gate: decodes native calls and checks them before the ledger runs them.

use serde::{Deserialize, Serialize};

use ledgerops_ops::{
    Canonical, Operation, OperationCall, Swap, Validate, ValidationContext,
};

use crate::autobuy::{AutoBuy, AutoBuySignal, DEFAULT_QUEUE_CAPACITY};
use crate::error::Result;

/// Configuration for the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Seconds added to the minimum remaining ticket lifetime.
    pub ticket_adjust_seconds: i64,
    /// Capacity of the auto-buy notification queue.
    pub auto_buy_queue_capacity: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            ticket_adjust_seconds: 0,
            auto_buy_queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Latest-block snapshot an operation is checked against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockInfo {
    pub number: u64,
    /// Unix seconds. Zero means no chain context.
    pub timestamp: u64,
}

impl BlockInfo {
    pub fn new(number: u64, timestamp: u64) -> Self {
        Self { number, timestamp }
    }
}

/// The validation gate.
///
/// Stateless apart from its configuration: every call is a pure check
/// against the snapshot it is given, so one gate can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    config: GateConfig,
}

impl Gate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Build the validation context for `block`.
    pub fn context<'a>(&self, block: BlockInfo, swap: Option<&'a Swap>) -> ValidationContext<'a> {
        let ctx = ValidationContext::new(block.number, block.timestamp)
            .ticket_adjust(self.config.ticket_adjust_seconds);
        match swap {
            Some(swap) => ctx.swap(swap),
            None => ctx,
        }
    }

    /// Check a decoded operation.
    ///
    /// `swap` is the stored offer a recall or take refers to; other
    /// operations ignore it.
    pub fn validate(&self, op: &Operation, block: BlockInfo, swap: Option<&Swap>) -> Result<()> {
        let ctx = self.context(block, swap);
        match op.validate(&ctx) {
            Ok(()) => {
                tracing::debug!(
                    kind = %op.kind(),
                    block = block.number,
                    timestamp = block.timestamp,
                    "operation admitted"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    kind = %op.kind(),
                    block = block.number,
                    timestamp = block.timestamp,
                    error = %e,
                    "operation rejected"
                );
                Err(e.into())
            }
        }
    }

    /// Decode the payload of `call` and check it.
    pub fn admit_call(
        &self,
        call: &OperationCall,
        block: BlockInfo,
        swap: Option<&Swap>,
    ) -> Result<Operation> {
        let op = Operation::from_call(call).map_err(|e| {
            tracing::warn!(kind = %call.kind, block = block.number, error = %e, "undecodable call");
            e
        })?;
        self.validate(&op, block, swap)?;
        Ok(op)
    }

    /// Decode a canonical envelope and check it.
    pub fn admit_bytes(
        &self,
        bytes: &[u8],
        block: BlockInfo,
        swap: Option<&Swap>,
    ) -> Result<Operation> {
        let call = OperationCall::from_bytes(bytes).map_err(|e| {
            tracing::warn!(block = block.number, error = %e, "malformed envelope");
            e
        })?;
        self.admit_call(&call, block, swap)
    }

    /// Create an auto-buy service sized by this gate's configuration.
    pub fn auto_buy(&self) -> (AutoBuy, tokio::sync::mpsc::Receiver<AutoBuySignal>) {
        AutoBuy::channel(self.config.auto_buy_queue_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GateError;
    use ledgerops_ops::{BuyTicketParam, OpsError, ValidationError};

    const T: u64 = 1_700_000_000;
    const DAY: u64 = 86_400;

    fn ticket(end_after: u64) -> Operation {
        Operation::BuyTicket(BuyTicketParam {
            start: T,
            end: T + end_after,
        })
    }

    #[test]
    fn test_config_defaults() {
        let config = GateConfig::default();
        assert_eq!(config.ticket_adjust_seconds, 0);
        assert_eq!(config.auto_buy_queue_capacity, 10);

        let parsed: GateConfig = serde_json::from_str(r#"{"ticket_adjust_seconds": 60}"#).unwrap();
        assert_eq!(parsed.ticket_adjust_seconds, 60);
        assert_eq!(parsed.auto_buy_queue_capacity, 10);
    }

    #[test]
    fn test_adjust_comes_from_config() {
        let op = ticket(30 * DAY);
        let block = BlockInfo::new(1, T + 23 * DAY);
        assert!(Gate::default().validate(&op, block, None).is_ok());

        let strict = Gate::new(GateConfig {
            ticket_adjust_seconds: 2 * DAY as i64,
            ..GateConfig::default()
        });
        let err = strict.validate(&op, block, None).unwrap_err();
        assert!(matches!(
            err.validation(),
            Some(ValidationError::TicketExpiresTooSoon { .. })
        ));
    }

    #[test]
    fn test_admit_bytes_rejects_garbage() {
        let err = Gate::default()
            .admit_bytes(&[0xff], BlockInfo::default(), None)
            .unwrap_err();
        assert!(matches!(err, GateError::Ops(OpsError::Decoding(_))));
        assert!(err.validation().is_none());
    }

    #[test]
    fn test_auto_buy_uses_configured_capacity() {
        let gate = Gate::new(GateConfig {
            auto_buy_queue_capacity: 3,
            ..GateConfig::default()
        });
        let (auto, _rx) = gate.auto_buy();
        assert_eq!(auto.remaining_capacity(), 3);
    }
}
