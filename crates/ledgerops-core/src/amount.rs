//! Quantities and their encodings.
//!
//! Every monetary or size quantity is a [`U256`]: a `Copy` value, so
//! duplicating a record never shares integer storage with the original.
//! Timestamps are Unix seconds (`u64`); block numbers are `u64`.

pub use primitive_types::U256;

/// One whole coin of an 18-decimal asset (10^18 base units).
pub const ONE_COIN: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// Price of a single ticket, in base units of the native asset.
///
/// The price is currently flat; the block number is accepted so callers do
/// not change when a schedule is introduced.
pub fn ticket_price(_block_number: u64) -> U256 {
    U256::from(5000u64) * ONE_COIN
}

/// Parse a 256-bit integer in decimal or `0x`-prefixed hexadecimal syntax.
///
/// Leading zeros are accepted and the empty string parses as zero. Returns
/// `None` for malformed input or values that need more than 256 bits.
pub fn parse_big256(s: &str) -> Option<U256> {
    if s.is_empty() {
        return Some(U256::zero());
    }
    if s.len() >= 2 && (s.starts_with("0x") || s.starts_with("0X")) {
        parse_hex_digits(&s[2..])
    } else {
        U256::from_dec_str(s).ok()
    }
}

fn parse_hex_digits(digits: &str) -> Option<U256> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    if significant.len() > 64 {
        return None;
    }
    let padded = if significant.len() % 2 == 1 {
        format!("0{}", significant)
    } else {
        significant.to_string()
    };
    let bytes = hex::decode(padded).ok()?;
    Some(U256::from_big_endian(&bytes))
}

/// Minimal big-endian magnitude of `value`; zero encodes as no bytes.
pub fn to_be_bytes_trimmed(value: &U256) -> Vec<u8> {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    let first = buf.iter().position(|b| *b != 0).unwrap_or(buf.len());
    buf[first..].to_vec()
}

/// Inverse of [`to_be_bytes_trimmed`]. Returns `None` for more than 32 bytes.
pub fn from_be_bytes(bytes: &[u8]) -> Option<U256> {
    if bytes.len() > 32 {
        return None;
    }
    Some(U256::from_big_endian(bytes))
}

/// Serde adapter writing a [`U256`] as a decimal string.
pub mod serde_decimal {
    use super::{parse_big256, U256};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_big256(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid 256-bit integer: {}", s)))
    }
}

/// Serde adapter for an optional [`U256`]; `None` is `null`.
pub mod serde_decimal_opt {
    use super::{parse_big256, U256};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<U256>, D::Error> {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) => parse_big256(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid 256-bit integer: {}", s))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[test]
    fn test_parse_big256() {
        assert_eq!(parse_big256(""), Some(U256::zero()));
        assert_eq!(parse_big256("0042"), Some(U256::from(42u64)));
        assert_eq!(parse_big256("0x2a"), Some(U256::from(42u64)));
        assert_eq!(parse_big256("0X02A"), Some(U256::from(42u64)));
        assert_eq!(parse_big256("0x"), None);
        assert_eq!(parse_big256("-1"), None);
        assert_eq!(parse_big256("12a"), None);

        let max = format!("0x{}", "f".repeat(64));
        assert_eq!(parse_big256(&max), Some(U256::MAX));
        let padded = format!("0x0000{}", "f".repeat(64));
        assert_eq!(parse_big256(&padded), Some(U256::MAX));
        let too_big = format!("0x1{}", "0".repeat(64));
        assert_eq!(parse_big256(&too_big), None);
        assert_eq!(parse_big256(&format!("{}0", U256::MAX)), None);
    }

    #[test]
    fn test_ticket_price() {
        assert_eq!(
            ticket_price(0).to_string(),
            "5000000000000000000000"
        );
        assert_eq!(ticket_price(0), ticket_price(9_999_999));
    }

    #[test]
    fn test_trimmed_bytes() {
        assert!(to_be_bytes_trimmed(&U256::zero()).is_empty());
        assert_eq!(to_be_bytes_trimmed(&U256::from(0x0102u64)), vec![0x01, 0x02]);
        assert_eq!(to_be_bytes_trimmed(&U256::MAX).len(), 32);
        assert_eq!(from_be_bytes(&[0x01, 0x02]), Some(U256::from(0x0102u64)));
        assert_eq!(from_be_bytes(&[0u8; 33]), None);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "serde_decimal")]
        total: U256,
        #[serde(with = "serde_decimal_opt")]
        value: Option<U256>,
    }

    #[test]
    fn test_decimal_serde() {
        let h = Holder {
            total: ONE_COIN,
            value: None,
        };
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, r#"{"total":"1000000000000000000","value":null}"#);
        let back: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);

        let hex: Holder = serde_json::from_str(r#"{"total":"0x10","value":"7"}"#).unwrap();
        assert_eq!(hex.total, U256::from(16u64));
        assert_eq!(hex.value, Some(U256::from(7u64)));

        assert!(serde_json::from_str::<Holder>(r#"{"total":"x","value":null}"#).is_err());
    }
}
