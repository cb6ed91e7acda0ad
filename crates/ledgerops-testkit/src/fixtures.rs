//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a chain snapshot plus builders
//! for records the ledger would normally hand to the gate.

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use ledgerops_core::{ticket_price, Address, Hash, U256};
use ledgerops_ops::{
    BuyTicketParam, MakeSwapParam, Swap, TakeSwapParam, Ticket, Tickets, ValidationContext,
};

const DAY: u64 = 86_400;

/// A chain snapshot plus an account, with a seeded id generator.
pub struct ChainFixture {
    pub block_number: u64,
    pub timestamp: u64,
    pub account: Address,
    rng: StdRng,
}

impl ChainFixture {
    /// A fixture at block 1_000_000, 2023-11-14T22:13:20Z.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// A fixture whose generated ids are fixed by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut account = [0u8; 20];
        rng.fill_bytes(&mut account);
        Self {
            block_number: 1_000_000,
            timestamp: 1_700_000_000,
            account: Address::from_bytes(account),
            rng,
        }
    }

    /// Move the chain forward by `blocks` blocks of `seconds` each.
    pub fn advance(&mut self, blocks: u64, seconds: u64) {
        self.block_number += blocks;
        self.timestamp += blocks * seconds;
    }

    /// The validation context for the current block.
    pub fn context<'a>(&self) -> ValidationContext<'a> {
        ValidationContext::new(self.block_number, self.timestamp)
    }

    /// A fresh random identifier.
    pub fn random_hash(&mut self) -> Hash {
        let mut bytes = [0u8; 32];
        self.rng.fill_bytes(&mut bytes);
        Hash::from_bytes(bytes)
    }

    /// A fresh non-zero random address.
    pub fn random_address(&mut self) -> Address {
        let mut bytes = [0u8; 20];
        self.rng.fill_bytes(&mut bytes);
        bytes[0] |= 1;
        Address::from_bytes(bytes)
    }

    /// A ticket purchase starting now, lasting `days` days.
    pub fn ticket_param(&self, days: u64) -> BuyTicketParam {
        BuyTicketParam {
            start: self.timestamp,
            end: self.timestamp + days * DAY,
        }
    }

    /// A ticket owned by the fixture account, bought at the current block.
    pub fn make_ticket(&mut self) -> Ticket {
        let id = self.random_hash();
        Ticket::new(
            id,
            self.account,
            self.block_number,
            self.timestamp,
            self.timestamp + 30 * DAY,
            ticket_price(self.block_number),
        )
    }

    /// `count` tickets, in purchase order.
    pub fn make_tickets(&mut self, count: usize) -> Tickets {
        (0..count).map(|_| self.make_ticket()).collect()
    }

    /// An offer of `size` units, each trading `min_from` for `min_to`, open
    /// for `days` days.
    pub fn offer(&self, min_from: u64, min_to: u64, size: u64, days: u64) -> MakeSwapParam {
        MakeSwapParam {
            from_asset_id: Hash::from_bytes([0xff; 32]),
            from_start_time: self.timestamp,
            from_end_time: self.timestamp + days * DAY,
            min_from_amount: Some(U256::from(min_from)),
            to_asset_id: Hash::from_bytes([0x01; 32]),
            to_start_time: self.timestamp,
            to_end_time: self.timestamp + days * DAY,
            min_to_amount: Some(U256::from(min_to)),
            swap_size: Some(U256::from(size)),
            targets: None,
            time: None,
            description: String::new(),
        }
    }

    /// Store an offer as the ledger would.
    pub fn make_swap(&mut self, offer: &MakeSwapParam) -> Swap {
        let id = self.random_hash();
        offer.to_swap(id, self.account)
    }

    /// Take `size` units of `swap`.
    pub fn take(&self, swap: &Swap, size: u64) -> TakeSwapParam {
        TakeSwapParam {
            swap_id: swap.id,
            size: Some(U256::from(size)),
        }
    }

    /// A random timestamp offset within the next day.
    pub fn jitter(&mut self) -> u64 {
        self.rng.gen_range(0..DAY)
    }
}

impl Default for ChainFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixtures for several accounts sharing one chain snapshot.
pub fn multi_account_fixtures(count: usize) -> Vec<ChainFixture> {
    (0..count).map(|i| ChainFixture::with_seed(i as u64)).collect()
}
