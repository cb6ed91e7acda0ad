//! Fixed-length identifier types.
//!
//! [`Hash`] (32 bytes) and [`Address`] (20 bytes) share one surface: named
//! constructors per input format, canonical hex, a `U256` view, strict text
//! and JSON decoding. Length is part of the type, so no value of either type
//! can ever hold a different number of bytes.

use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;
use crate::hexutil;

/// Length of a [`Hash`] in bytes.
pub const HASH_LENGTH: usize = 32;

/// Length of an [`Address`] in bytes.
pub const ADDRESS_LENGTH: usize = 20;

macro_rules! fixed_bytes {
    ($name:ident, $len:expr, $type_name:literal) => {
        impl $name {
            /// Length in bytes.
            pub const LEN: usize = $len;

            /// The all-zero value.
            pub const ZERO: Self = Self([0u8; $len]);

            /// Create from an exact-length byte array.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Create from a byte slice of any length.
            ///
            /// Longer input is cropped from the left, shorter input is
            /// left-padded with zeros, so the unsigned integer value is kept
            /// whenever it fits.
            pub fn from_slice(bytes: &[u8]) -> Self {
                let mut out = [0u8; $len];
                hexutil::right_align(bytes, &mut out);
                Self(out)
            }

            /// Create from an unsigned integer (cropped to the low-order bytes).
            pub fn from_u256(value: U256) -> Self {
                let mut buf = [0u8; 32];
                value.to_big_endian(&mut buf);
                Self::from_slice(&buf)
            }

            /// Create from free-form hex with an optional `0x`/`0X` prefix.
            ///
            /// Length is not checked: the decoded bytes go through
            /// [`Self::from_slice`]. Invalid characters are an error.
            pub fn from_hex(s: &str) -> Result<Self, CodecError> {
                let bytes = hexutil::decode_lenient(s)?;
                Ok(Self::from_slice(&bytes))
            }

            /// Get the raw bytes.
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Interpret the bytes as a big-endian unsigned integer.
            pub fn to_u256(&self) -> U256 {
                U256::from_big_endian(&self.0)
            }

            /// Canonical hex: `0x` followed by exactly twice `LEN` lowercase digits.
            pub fn to_hex(&self) -> String {
                hexutil::encode_prefixed(&self.0)
            }

            /// Compact form for log lines: first and last three bytes.
            pub fn terminal_string(&self) -> String {
                format!(
                    "{}\u{2026}{}",
                    hex::encode(&self.0[..3]),
                    hex::encode(&self.0[$len - 3..])
                )
            }

            /// Returns true if every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }

            /// Whether `s` can represent a value of this type: after an
            /// optional prefix, exactly twice `LEN` hex digits.
            pub fn is_valid_hex(s: &str) -> bool {
                let digits = hexutil::strip_hex_prefix(s);
                digits.len() == 2 * $len && hexutil::is_hex(digits)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $type_name, self)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        /// Strict text decoding: prefix required, exact length.
        impl FromStr for $name {
            type Err = CodecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut out = [0u8; $len];
                hexutil::decode_fixed($type_name, s, &mut out)?;
                Ok(Self(out))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

macro_rules! unprefixed {
    ($name:ident, $inner:ident, $len:expr, $type_name:literal) => {
        impl From<$inner> for $name {
            fn from(inner: $inner) -> Self {
                Self(inner)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0.as_bytes()))
            }
        }

        /// The `0x` prefix is optional; length must still be exact.
        impl FromStr for $name {
            type Err = CodecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut out = [0u8; $len];
                hexutil::decode_fixed_unprefixed($type_name, s, &mut out)?;
                Ok(Self($inner(out)))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A 32-byte hash. Used for asset, ticket and swap identifiers.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash(pub [u8; HASH_LENGTH]);

fixed_bytes!(Hash, HASH_LENGTH, "Hash");

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A 20-byte account address.
///
/// `Display` and JSON use the mixed-case checksum form; see
/// [`Address::to_checksum_hex`].
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

fixed_bytes!(Address, ADDRESS_LENGTH, "Address");

impl Address {
    /// Left-pad the address with zeros into a [`Hash`].
    pub fn to_hash(&self) -> Hash {
        Hash::from_slice(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum_hex())
    }
}

/// A [`Hash`] whose text form has no `0x` prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UnprefixedHash(pub Hash);

unprefixed!(UnprefixedHash, Hash, HASH_LENGTH, "UnprefixedHash");

/// An [`Address`] whose text form has no `0x` prefix (lowercase, no checksum).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UnprefixedAddress(pub Address);

unprefixed!(UnprefixedAddress, Address, ADDRESS_LENGTH, "UnprefixedAddress");

/// Returns true if `s` is a valid hex-encoded address (prefix optional).
pub fn is_hex_address(s: &str) -> bool {
    Address::is_valid_hex(s)
}

/// Returns true if `s` is a valid hex-encoded hash (prefix optional).
pub fn is_hex_hash(s: &str) -> bool {
    Hash::is_valid_hex(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_hex_roundtrip() {
        let h = Hash::from_bytes([0x42; 32]);
        let hex = h.to_hex();
        assert_eq!(hex.len(), 66);
        assert!(hex.starts_with("0x4242"));
        assert_eq!(hex.parse::<Hash>().unwrap(), h);
    }

    #[test]
    fn test_address_from_long_slice_keeps_tail() {
        let mut input = [0u8; 40];
        for (i, b) in input.iter_mut().enumerate() {
            *b = i as u8;
        }
        let a = Address::from_slice(&input);
        assert_eq!(a.as_bytes()[..], input[20..]);
    }

    #[test]
    fn test_address_from_short_slice_pads_left() {
        let input = [0xabu8; 10];
        let a = Address::from_slice(&input);
        assert_eq!(a.as_bytes()[..10], [0u8; 10]);
        assert_eq!(a.as_bytes()[10..], input);
    }

    #[test]
    fn test_u256_views_agree() {
        let v = U256::from(0x1234_5678u64);
        let h = Hash::from_u256(v);
        assert_eq!(h.to_u256(), v);
        assert_eq!(&h.as_bytes()[28..], &[0x12, 0x34, 0x56, 0x78]);

        let a = Address::from_u256(v);
        assert_eq!(a.to_u256(), v);
        assert_eq!(a.to_hash().to_u256(), v);
    }

    #[test]
    fn test_from_hex_is_lenient_on_length() {
        let h = Hash::from_hex("0X1").unwrap();
        assert_eq!(h.to_u256(), U256::one());

        let a = Address::from_hex("ff").unwrap();
        assert_eq!(a.as_bytes()[19], 0xff);

        assert!(Hash::from_hex("0xnothex").is_err());
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!(
            "0x1234".parse::<Hash>(),
            Err(CodecError::WrongLength {
                type_name: "Hash",
                got: 4,
                want: 64
            })
        );
        assert_eq!(
            "ffffffffffffffffffffffffffffffffffffffff".parse::<Address>(),
            Err(CodecError::MissingPrefix)
        );
    }

    #[test]
    fn test_is_valid_hex() {
        assert!(is_hex_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(is_hex_address("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert!(!is_hex_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beae"));
        assert!(!is_hex_address("0xgaaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert!(is_hex_hash(&Hash::ZERO.to_hex()));
        assert!(!is_hex_hash(&Address::ZERO.to_hex()));
    }

    #[test]
    fn test_ordering_is_numeric() {
        let small = Hash::from_u256(U256::from(2u64));
        let large = Hash::from_u256(U256::from(256u64));
        assert!(small < large);
    }

    #[test]
    fn test_terminal_string() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xaa;
        bytes[31] = 0xbb;
        let h = Hash::from_bytes(bytes);
        assert_eq!(h.terminal_string(), "aa0000\u{2026}0000bb");
    }

    #[test]
    fn test_json_hash_roundtrip() {
        let h = Hash::from_bytes([0xcd; 32]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", h.to_hex()));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn test_json_rejects_wrong_length() {
        let result: Result<Address, _> = serde_json::from_str("\"0x1234\"");
        assert!(result.is_err());
        let result: Result<Hash, _> = serde_json::from_str("\"0xffffffffffffffffffffffffffffffffffffffff\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_unprefixed_variants() {
        let a = Address::from_bytes([0x11; 20]);
        let u = UnprefixedAddress(a);
        let text = u.to_string();
        assert_eq!(text.len(), 40);
        assert!(!text.starts_with("0x"));

        let with_prefix: UnprefixedAddress = format!("0x{}", text).parse().unwrap();
        let without: UnprefixedAddress = text.parse().unwrap();
        assert_eq!(with_prefix, without);
        assert_eq!(Address::from(without), a);

        let json = serde_json::to_string(&UnprefixedHash(Hash::from_bytes([1; 32]))).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));

        let err = "abcd".parse::<UnprefixedHash>().unwrap_err();
        assert!(err.to_string().contains("UnprefixedHash"));
    }
}
