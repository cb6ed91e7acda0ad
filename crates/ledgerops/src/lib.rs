//! # ledgerops
//!
//! The admission gate for native ledger operations.
//!
//! ## Overview
//!
//! A native call arrives as an [`OperationCall`]: a kind tag plus canonical
//! parameter bytes. The [`Gate`] decodes it into an [`Operation`] and checks
//! it against a snapshot of the latest block. Only admitted operations reach
//! the ledger, which then applies their effects. A rejected operation never
//! touches state.
//!
//! ## Usage
//!
//! ```rust
//! use ledgerops::{BlockInfo, Gate, GateConfig, Operation};
//! use ledgerops::ops::BuyTicketParam;
//!
//! let gate = Gate::new(GateConfig::default());
//! let op = Operation::BuyTicket(BuyTicketParam {
//!     start: 1_700_000_000,
//!     end: 1_700_000_000 + 30 * 86_400,
//! });
//!
//! let call = op.to_call().unwrap();
//! let admitted = gate
//!     .admit_call(&call, BlockInfo::new(100, 1_700_000_000), None)
//!     .unwrap();
//! assert_eq!(admitted, op);
//! ```
//!
//! ## Re-exports
//!
//! - `ledgerops::core` - identifiers, addresses, amounts, reserved ids
//! - `ledgerops::ops` - operation parameters, canonical encoding, rules

pub mod autobuy;
pub mod error;
pub mod gate;

// Re-export component crates
pub use ledgerops_core as core;
pub use ledgerops_ops as ops;

pub use autobuy::{AutoBuy, AutoBuySignal};
pub use error::{GateError, Result};
pub use gate::{BlockInfo, Gate, GateConfig};

// Re-export commonly used types
pub use ledgerops_core::{Address, Hash, MixedcaseAddress, U256};
pub use ledgerops_ops::{
    Canonical, Operation, OperationCall, OperationKind, OpsError, Swap, Ticket, Tickets,
    ValidationContext, ValidationError,
};
