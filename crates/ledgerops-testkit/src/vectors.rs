//! Golden test vectors for deterministic verification.
//!
//! Checksum vectors come from the published mixed-case address checksum
//! test set and from the reserved protocol addresses. Envelope vectors pin
//! the canonical bytes of native calls, which must match across every node.

use ledgerops_core::{
    Address, ASSET_KEY_ADDRESS, NATIVE_CALL_ADDRESS, NOTATION_KEY_ADDRESS, SWAP_KEY_ADDRESS,
    TICKET_KEY_ADDRESS, TICKET_LOG_ADDRESS,
};
use ledgerops_ops::{Canonical, OperationCall};

/// A checksum-casing test vector.
#[derive(Debug, Clone)]
pub struct ChecksumVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Expected checksum text.
    pub checksummed: &'static str,
}

/// A canonical envelope test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Expected canonical bytes of the whole envelope (hex).
    pub envelope_hex: &'static str,
}

/// Get all checksum vectors.
pub fn checksum_vectors() -> Vec<ChecksumVector> {
    vec![
        ChecksumVector {
            name: "mixed 1",
            checksummed: "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        },
        ChecksumVector {
            name: "mixed 2",
            checksummed: "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        },
        ChecksumVector {
            name: "mixed 3",
            checksummed: "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        },
        ChecksumVector {
            name: "mixed 4",
            checksummed: "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        },
        ChecksumVector {
            name: "all caps 1",
            checksummed: "0x52908400098527886E0F7030069857D2E4169EE7",
        },
        ChecksumVector {
            name: "all caps 2",
            checksummed: "0x8617E340B3D01FA5F11F306F4090FD50E238070D",
        },
        ChecksumVector {
            name: "all lower 1",
            checksummed: "0xde709f2102306220921060314715629080e2fb77",
        },
        ChecksumVector {
            name: "all lower 2",
            checksummed: "0x27b1fdb04752bbc536007a920d24acb045561c26",
        },
    ]
}

/// The reserved addresses and their checksum text.
pub fn reserved_address_vectors() -> Vec<(&'static str, Address, &'static str)> {
    vec![
        (
            "native call",
            NATIVE_CALL_ADDRESS,
            "0xFFfFfFffFFfffFFfFFfFFFFFffFFFffffFfFFFfF",
        ),
        (
            "ticket log",
            TICKET_LOG_ADDRESS,
            "0xffffFFFfFFffffffffffffffFfFFFfffFFFfFFfE",
        ),
        (
            "notation key",
            NOTATION_KEY_ADDRESS,
            "0xfFfFFffFffffFFffFffFFFFFFfFFFfFfFFfFfFfD",
        ),
        (
            "asset key",
            ASSET_KEY_ADDRESS,
            "0xFfFfFfFFfFFFFfffffFfFfFffffffFFfFFFfFFfc",
        ),
        (
            "ticket key",
            TICKET_KEY_ADDRESS,
            "0xFFFfFfFfFFFFfFfFffffFFFffffFFffffFfffffb",
        ),
        (
            "swap key",
            SWAP_KEY_ADDRESS,
            "0xfFFffFFFfFfFfFFfFffFFfFFfFffffFFFFFFFffA",
        ),
    ]
}

/// Get all envelope vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "GenNotation",
            envelope_hex: "820040",
        },
        GoldenVector {
            name: "BuyTicket for 30 days from 2023-11-14T22:13:20Z",
            envelope_hex: "82044b821a6553f1001a657b7e00",
        },
        GoldenVector {
            name: "SendAsset of one native coin",
            envelope_hex: "82025841835820ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff540101010101010101010101010101010101010101480de0b6b3a7640000",
        },
        GoldenVector {
            name: "TakeSwap of 10 units",
            envelope_hex: "820858258258201111111111111111111111111111111111111111111111111111111111111111410a",
        },
        GoldenVector {
            name: "TransferNotation 42",
            envelope_hex: "820d581882182a540202020202020202020202020202020202020202",
        },
    ]
}

/// Verify all checksum vectors and reserved addresses.
///
/// Returns `(name, matches, produced)` for each vector.
pub fn verify_checksum_vectors() -> Vec<(String, bool, String)> {
    let published = checksum_vectors().into_iter().map(|v| {
        let produced = v
            .checksummed
            .parse::<Address>()
            .map(|a| a.to_checksum_hex())
            .unwrap_or_default();
        (v.name.to_string(), produced == v.checksummed, produced)
    });
    let reserved = reserved_address_vectors()
        .into_iter()
        .map(|(name, address, expected)| {
            let produced = address.to_checksum_hex();
            (name.to_string(), produced == expected, produced)
        });
    published.chain(reserved).collect()
}

/// Verify that every envelope vector decodes and re-encodes to the same bytes.
///
/// Returns `(name, matches, produced)` for each vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let produced = hex::decode(v.envelope_hex)
                .ok()
                .and_then(|bytes| OperationCall::from_bytes(&bytes).ok())
                .and_then(|call| call.to_bytes().ok())
                .map(hex::encode)
                .unwrap_or_default();
            (v.name.to_string(), produced == v.envelope_hex, produced)
        })
        .collect()
}
