//! Tickets: time-windowed records used by the consensus selection process.
//!
//! This module validates purchases and keeps ordered ticket collections.
//! Expiry, consumption and selection weighting are decided elsewhere.

use ciborium::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use ledgerops_core::amount::serde_decimal;
use ledgerops_core::{Address, Hash, U256};

use crate::canonical::{
    address_value, as_address, as_hash, as_u256, as_u64, fields, hash_value, u256_value,
    u64_value, Canonical,
};
use crate::context::{Validate, ValidationContext};
use crate::error::{Result, ValidationError};

const HOUR: u64 = 3600;
const DAY: u64 = 24 * HOUR;

/// Shortest allowed ticket lifetime.
pub const TICKET_MIN_LIFETIME: u64 = 30 * DAY;

/// How far past the latest block time a ticket may start.
pub const TICKET_MAX_START_AHEAD: u64 = 3 * HOUR;

/// Shortest remaining lifetime, measured from the latest block time.
pub const TICKET_MIN_REMAINING: u64 = 7 * DAY;

/// A purchased ticket.
///
/// `weight` is set by the selection process and is never persisted: it is
/// skipped by JSON and by the canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ticket {
    #[serde(rename = "ID")]
    pub id: Hash,
    pub owner: Address,
    pub height: u64,
    pub start_time: u64,
    pub expire_time: u64,
    #[serde(with = "serde_decimal")]
    pub value: U256,
    #[serde(skip)]
    weight: Option<U256>,
}

impl Ticket {
    /// Create a ticket with no weight.
    pub fn new(
        id: Hash,
        owner: Address,
        height: u64,
        start_time: u64,
        expire_time: u64,
        value: U256,
    ) -> Self {
        Self {
            id,
            owner,
            height,
            start_time,
            expire_time,
            value,
            weight: None,
        }
    }

    /// The selection weight, if one was assigned.
    pub fn weight(&self) -> Option<U256> {
        self.weight
    }

    /// Assign the selection weight.
    pub fn set_weight(&mut self, weight: U256) {
        self.weight = Some(weight);
    }
}

impl Canonical for Ticket {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![
            hash_value(&self.id),
            address_value(&self.owner),
            u64_value(self.height),
            u64_value(self.start_time),
            u64_value(self.expire_time),
            u256_value(&self.value),
        ])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 6, "Ticket")?;
        Ok(Self::new(
            as_hash(&f[0], "id")?,
            as_address(&f[1], "owner")?,
            as_u64(&f[2], "height")?,
            as_u64(&f[3], "start_time")?,
            as_u64(&f[4], "expire_time")?,
            as_u256(&f[5], "value")?,
        ))
    }
}

/// An ordered sequence of tickets.
///
/// The canonical order is ascending by id read as an unsigned integer (see
/// [`Tickets::sort`]). Cloning copies every ticket, so a clone never shares
/// storage with the original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tickets(Vec<Ticket>);

impl Tickets {
    /// An empty collection.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ticket> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Ticket] {
        &self.0
    }

    /// Append a ticket.
    pub fn add(&mut self, ticket: Ticket) {
        self.0.push(ticket);
    }

    /// Remove the first ticket with `id`, keeping the order of the rest.
    ///
    /// Returns the removed ticket; does nothing if no ticket matches.
    pub fn delete(&mut self, id: &Hash) -> Option<Ticket> {
        let pos = self.0.iter().position(|t| t.id == *id)?;
        Some(self.0.remove(pos))
    }

    /// Find a ticket by id.
    pub fn get(&self, id: &Hash) -> Option<&Ticket> {
        self.0.iter().find(|t| t.id == *id)
    }

    /// Index by id. With duplicate ids the later ticket wins.
    pub fn to_map(&self) -> HashMap<Hash, Ticket> {
        self.0.iter().map(|t| (t.id, t.clone())).collect()
    }

    /// Sort ascending by id.
    pub fn sort(&mut self) {
        self.0.sort_by(|a, b| a.id.cmp(&b.id));
    }

    pub fn into_vec(self) -> Vec<Ticket> {
        self.0
    }
}

impl From<Vec<Ticket>> for Tickets {
    fn from(tickets: Vec<Ticket>) -> Self {
        Self(tickets)
    }
}

impl FromIterator<Ticket> for Tickets {
    fn from_iter<I: IntoIterator<Item = Ticket>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Tickets {
    type Item = Ticket;
    type IntoIter = std::vec::IntoIter<Ticket>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tickets {
    type Item = &'a Ticket;
    type IntoIter = std::slice::Iter<'a, Ticket>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parameters of a ticket purchase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuyTicketParam {
    pub start: u64,
    pub end: u64,
}

impl BuyTicketParam {
    /// Check the ticket window.
    ///
    /// With a non-zero `timestamp` the window is also checked against the
    /// latest block: it must not start more than 3 hours ahead, and must
    /// last at least a week (plus `adjust` seconds) past that block.
    pub fn check(
        &self,
        _block_number: u64,
        timestamp: u64,
        adjust: i64,
    ) -> std::result::Result<(), ValidationError> {
        let start = u128::from(self.start);
        let end = u128::from(self.end);

        if end <= start || end < start + u128::from(TICKET_MIN_LIFETIME) {
            return Err(ValidationError::TicketLifetimeTooShort {
                start: self.start,
                end: self.end,
            });
        }

        if timestamp != 0 {
            if start > u128::from(timestamp) + u128::from(TICKET_MAX_START_AHEAD) {
                return Err(ValidationError::TicketStartTooLate {
                    start: self.start,
                    timestamp,
                });
            }
            let earliest_end =
                i128::from(timestamp) + i128::from(TICKET_MIN_REMAINING) + i128::from(adjust);
            if i128::from(self.end) < earliest_end {
                return Err(ValidationError::TicketExpiresTooSoon {
                    end: self.end,
                    timestamp,
                    adjust,
                });
            }
        }

        Ok(())
    }
}

impl Validate for BuyTicketParam {
    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        self.check(ctx.block_number, ctx.timestamp, ctx.ticket_adjust)
    }
}

impl Canonical for BuyTicketParam {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![u64_value(self.start), u64_value(self.end)])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 2, "BuyTicketParam")?;
        Ok(Self {
            start: as_u64(&f[0], "start")?,
            end: as_u64(&f[1], "end")?,
        })
    }
}
