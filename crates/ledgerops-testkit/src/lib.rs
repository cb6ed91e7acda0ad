//! # ledgerops testkit
//!
//! Testing utilities for ledgerops.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: checksum casing and canonical envelope bytes that
//!   every node must reproduce
//! - **Generators**: Proptest strategies for identifiers, amounts and
//!   operations
//! - **Fixtures**: a seeded chain snapshot for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use ledgerops_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, produced) in verify_all_vectors() {
//!     assert!(ok, "{}: {}", name, produced);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use ledgerops_testkit::generators::open_swap_offer;
//!
//! proptest! {
//!     #[test]
//!     fn open_offers_pass(offer in open_swap_offer(1_700_000_000)) {
//!         prop_assert!(offer.check(0, 1_700_000_000).is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use ledgerops_testkit::fixtures::ChainFixture;
//!
//! let mut fixture = ChainFixture::new();
//! let offer = fixture.offer(100, 50, 10, 2);
//! let swap = fixture.make_swap(&offer);
//! let take = fixture.take(&swap, 10);
//! assert!(take.check(&swap, fixture.timestamp).is_ok());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_account_fixtures, ChainFixture};
pub use vectors::{all_vectors, verify_all_vectors, verify_checksum_vectors, GoldenVector};
