//! # ledgerops ops
//!
//! Native ledger operations: asset issuance, transfers, time locks, ticket
//! purchases and atomic swaps.
//!
//! Every operation is a plain parameter struct with:
//! - a `check` method holding its business rules,
//! - a [`Validate`] impl that feeds it from a [`ValidationContext`],
//! - a [`Canonical`] impl giving it one deterministic byte encoding.
//!
//! [`Operation`] is the closed set of those structs and [`OperationCall`]
//! the envelope they travel in. Nothing here touches state: the ledger
//! applies effects only after validation passes.

pub mod asset;
pub mod canonical;
pub mod context;
pub mod error;
pub mod operation;
pub mod swap;
pub mod ticket;
pub mod transfer;

pub use asset::{system_asset, Asset, GenAssetParam};
pub use canonical::Canonical;
pub use context::{Validate, ValidationContext};
pub use error::{OpsError, Result, ValidationError};
pub use operation::{Operation, OperationCall, OperationKind};
pub use swap::{MakeSwapParam, RecallSwapParam, Swap, TakeSwapParam};
pub use ticket::{BuyTicketParam, Ticket, Tickets};
pub use transfer::{
    AssetValueChangeExParam, AssetValueChangeParam, SendAssetParam, TimeLockParam, TimeLockType,
    TransferNotationParam,
};
