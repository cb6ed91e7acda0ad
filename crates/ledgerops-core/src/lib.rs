//! # ledgerops core
//!
//! Pure primitives shared by every ledgerops crate: fixed-length identifiers,
//! checksum-cased addresses, reserved protocol identifiers and 256-bit
//! amounts.
//!
//! ## Key Types
//!
//! - [`Hash`] - 32-byte identifier (assets, tickets, swaps)
//! - [`Address`] - 20-byte account address, displayed with an EIP-55 checksum
//! - [`MixedcaseAddress`] - an address plus the exact text it came from
//! - [`U256`] - every quantity is a 256-bit unsigned value
//!
//! ## Encodings
//!
//! Identifiers have one canonical text form (`0x` + lowercase hex; addresses
//! use checksum casing for display), a strict decoder for text and JSON, a
//! lenient [`Hash::from_hex`] for free-form input, and a blob persistence
//! contract via `rusqlite` (see [`sql`]).

pub mod amount;
pub mod checksum;
pub mod error;
pub mod hexutil;
pub mod reserved;
pub mod sql;
pub mod types;

pub use amount::{parse_big256, ticket_price, ONE_COIN, U256};
pub use checksum::MixedcaseAddress;
pub use error::CodecError;
pub use reserved::{
    storage_key, ASSET_KEY, ASSET_KEY_ADDRESS, NATIVE_CALL_ADDRESS, NOTATION_KEY,
    NOTATION_KEY_ADDRESS, SWAP_KEY, SWAP_KEY_ADDRESS, SYSTEM_ASSET_ID, TICKET_KEY,
    TICKET_KEY_ADDRESS, TICKET_LOG_ADDRESS,
};
pub use types::{
    is_hex_address, is_hex_hash, Address, Hash, UnprefixedAddress, UnprefixedHash,
    ADDRESS_LENGTH, HASH_LENGTH,
};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_from_slice_is_stable(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            let h = Hash::from_slice(&bytes);
            prop_assert_eq!(Hash::from_slice(h.as_bytes()), h);

            let a = Address::from_slice(&bytes);
            prop_assert_eq!(Address::from_slice(a.as_bytes()), a);
        }

        #[test]
        fn test_checksum_text_roundtrip(bytes in any::<[u8; 20]>()) {
            let a = Address::from_bytes(bytes);
            let text = a.to_checksum_hex();
            prop_assert_eq!(text.parse::<Address>().unwrap(), a);
            prop_assert_eq!(text.to_lowercase(), a.to_hex());
            prop_assert!(MixedcaseAddress::from_text(&text).unwrap().valid_checksum());
        }

        #[test]
        fn test_hash_text_roundtrip(bytes in any::<[u8; 32]>()) {
            let h = Hash::from_bytes(bytes);
            prop_assert_eq!(h.to_string().parse::<Hash>().unwrap(), h);
            prop_assert_eq!(Hash::from_u256(h.to_u256()), h);
        }
    }
}
