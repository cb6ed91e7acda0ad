//! Mixed-case checksum encoding for addresses (EIP-55).
//!
//! The checksum is the Keccak-256 digest of the lowercase hex text; a letter
//! at position `i` is uppercased when nibble `i` of the digest is above 7.
//! The output must match other implementations bit for bit.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;

use crate::error::CodecError;
use crate::hexutil;
use crate::types::{is_hex_address, Address, ADDRESS_LENGTH};

/// Apply checksum casing to 40 lowercase hex digits. Returns the `0x`-prefixed form.
fn checksum_case(lower: &str) -> String {
    let digest = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = digest[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if nibble > 7 && c.is_ascii_alphabetic() {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl Address {
    /// The checksum-cased `0x` hex form.
    pub fn to_checksum_hex(&self) -> String {
        checksum_case(&hex::encode(self.0))
    }
}

/// An address together with the text it was parsed from.
///
/// Lets callers echo user input verbatim while still reporting whether the
/// casing is a valid checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedcaseAddress {
    addr: Address,
    original: String,
}

impl MixedcaseAddress {
    /// Wrap an address; the original text is its checksum form.
    pub fn new(addr: Address) -> Self {
        Self {
            original: addr.to_checksum_hex(),
            addr,
        }
    }

    /// Parse free-form address text, keeping it as given.
    pub fn from_text(text: &str) -> Result<Self, CodecError> {
        if !is_hex_address(text) {
            return Err(CodecError::InvalidAddress(text.to_string()));
        }
        let bytes = hexutil::decode_lenient(text)?;
        Ok(Self {
            addr: Address::from_slice(&bytes),
            original: text.to_string(),
        })
    }

    /// The decoded address.
    pub fn address(&self) -> Address {
        self.addr
    }

    /// The text exactly as supplied.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// True when the original text is the exact checksum form.
    pub fn valid_checksum(&self) -> bool {
        self.original == self.addr.to_checksum_hex()
    }

    /// The original text with its prefix normalised to lowercase `0x`.
    fn normalized_original(&self) -> String {
        format!("0x{}", hexutil::strip_hex_prefix(&self.original))
    }
}

impl fmt::Display for MixedcaseAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid_checksum() {
            write!(f, "{} [chksum ok]", self.original)
        } else {
            write!(f, "{} [chksum INVALID]", self.original)
        }
    }
}

impl Serialize for MixedcaseAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.normalized_original())
    }
}

impl<'de> Deserialize<'de> for MixedcaseAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let original = String::deserialize(deserializer)?;
        let mut out = [0u8; ADDRESS_LENGTH];
        hexutil::decode_fixed("Address", &original, &mut out).map_err(serde::de::Error::custom)?;
        Ok(Self {
            addr: Address(out),
            original,
        })
    }
}
