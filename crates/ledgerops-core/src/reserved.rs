//! Reserved protocol identifiers.
//!
//! These byte patterns are part of the wire contract of the existing network
//! and must not change.

use crate::types::{Address, Hash, ADDRESS_LENGTH, HASH_LENGTH};

const fn sentinel_address(last: u8) -> Address {
    let mut bytes = [0xffu8; ADDRESS_LENGTH];
    bytes[ADDRESS_LENGTH - 1] = last;
    Address::from_bytes(bytes)
}

/// Destination address of every native-operation call.
pub const NATIVE_CALL_ADDRESS: Address = sentinel_address(0xff);

/// Address that ticket events are logged under.
pub const TICKET_LOG_ADDRESS: Address = sentinel_address(0xfe);

/// Storage account holding notation records.
pub const NOTATION_KEY_ADDRESS: Address = sentinel_address(0xfd);

/// Storage account holding asset records.
pub const ASSET_KEY_ADDRESS: Address = sentinel_address(0xfc);

/// Storage account holding ticket records.
pub const TICKET_KEY_ADDRESS: Address = sentinel_address(0xfb);

/// Storage account holding swap records.
pub const SWAP_KEY_ADDRESS: Address = sentinel_address(0xfa);

/// Identifier of the native asset.
pub const SYSTEM_ASSET_ID: Hash = Hash::from_bytes([0xff; HASH_LENGTH]);

/// Storage key prefix for notation records.
pub const NOTATION_KEY: &[u8] = &[0x01];

/// Storage key prefix for asset records.
pub const ASSET_KEY: &[u8] = &[0x02];

/// Storage key prefix for ticket records.
pub const TICKET_KEY: &[u8] = &[0x03];

/// Storage key prefix for swap records. `0x04` is retired.
pub const SWAP_KEY: &[u8] = &[0x06];

/// Build a storage key: `prefix || id`.
pub fn storage_key(prefix: &[u8], id: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + id.len());
    key.extend_from_slice(prefix);
    key.extend_from_slice(id);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_hex() {
        assert_eq!(
            NATIVE_CALL_ADDRESS.to_hex(),
            "0xffffffffffffffffffffffffffffffffffffffff"
        );
        assert_eq!(
            TICKET_LOG_ADDRESS.to_hex(),
            "0xfffffffffffffffffffffffffffffffffffffffe"
        );
        assert_eq!(
            SWAP_KEY_ADDRESS.to_hex(),
            "0xfffffffffffffffffffffffffffffffffffffffa"
        );
        assert_eq!(SYSTEM_ASSET_ID.to_hex(), format!("0x{}", "f".repeat(64)));
    }

    #[test]
    fn test_sentinels_are_distinct() {
        let all = [
            NATIVE_CALL_ADDRESS,
            TICKET_LOG_ADDRESS,
            NOTATION_KEY_ADDRESS,
            ASSET_KEY_ADDRESS,
            TICKET_KEY_ADDRESS,
            SWAP_KEY_ADDRESS,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_storage_key() {
        let id = Hash::from_bytes([0x07; 32]);
        let key = storage_key(TICKET_KEY, id.as_bytes());
        assert_eq!(key.len(), 33);
        assert_eq!(key[0], 0x03);
        assert_eq!(&key[1..], id.as_bytes());
    }
}
