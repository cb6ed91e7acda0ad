//! Canonical CBOR encoding for operation parameters and records.
//!
//! Every type is encoded as a CBOR array of its fields in declared order:
//! - Integers use the smallest valid encoding
//! - `U256` is a byte string holding its minimal big-endian magnitude
//!   (zero is the empty byte string)
//! - An absent amount or list is `null`; an empty list is `[]`
//! - Definite lengths only, no maps, no floats
//!
//! Decoding is strict: the input must re-encode to exactly the same bytes,
//! so every value has one and only one byte representation.

use ciborium::value::Value;

use ledgerops_core::amount::{from_be_bytes, to_be_bytes_trimmed};
use ledgerops_core::{Address, Hash, U256};

use crate::error::{OpsError, Result};

/// Types with a canonical byte encoding.
pub trait Canonical: Sized {
    /// Convert to a CBOR value (array of fields in declared order).
    fn to_cbor(&self) -> Value;

    /// Rebuild from a CBOR value produced by [`Canonical::to_cbor`].
    fn from_cbor(value: &Value) -> Result<Self>;

    /// Canonical bytes.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        encode(&self.to_cbor())
    }

    /// Decode canonical bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_cbor(&decode(bytes)?)
    }
}

/// Encode a CBOR value to canonical bytes.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value)?;
    Ok(buf)
}

/// Decode canonical bytes into a CBOR value.
///
/// Rejects trailing bytes and any encoding that is not the canonical one.
pub fn decode(bytes: &[u8]) -> Result<Value> {
    let value: Value =
        ciborium::de::from_reader(bytes).map_err(|e| OpsError::Decoding(e.to_string()))?;
    let reencoded =
        encode(&value).map_err(|_| OpsError::Decoding("non-canonical encoding".into()))?;
    if reencoded != bytes {
        return Err(OpsError::Decoding("non-canonical encoding".into()));
    }
    Ok(value)
}

/// Recursively encode a CBOR value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<()> {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => {
            encode_bytes(buf, b);
            Ok(())
        }
        Value::Text(s) => {
            encode_text(buf, s);
            Ok(())
        }
        Value::Array(arr) => {
            encode_uint(buf, 4, arr.len() as u64);
            for item in arr {
                encode_value_to(buf, item)?;
            }
            Ok(())
        }
        Value::Bool(b) => {
            buf.push(if *b { 0xf5 } else { 0xf4 });
            Ok(())
        }
        Value::Null => {
            buf.push(0xf6);
            Ok(())
        }
        Value::Float(_) => Err(OpsError::Encoding(
            "floats not supported in canonical encoding".into(),
        )),
        _ => Err(OpsError::Encoding("unsupported CBOR value type".into())),
    }
}

/// Encode an unsigned CBOR integer (major type 0). Negative values never
/// occur in canonical forms.
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) -> Result<()> {
    let n = u64::try_from(i)
        .map_err(|_| OpsError::Encoding("integer out of unsigned 64-bit range".into()))?;
    encode_uint(buf, 0, n);
    Ok(())
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

// ─────────────────────────────────────────────────────────────────────────────
// Field helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Borrow the fields of an array with exactly `n` items.
pub(crate) fn fields<'a>(value: &'a Value, n: usize, what: &str) -> Result<&'a [Value]> {
    match value {
        Value::Array(items) if items.len() == n => Ok(items),
        Value::Array(items) => Err(OpsError::Decoding(format!(
            "{}: expected {} fields, got {}",
            what,
            n,
            items.len()
        ))),
        _ => Err(OpsError::Decoding(format!("{}: expected array", what))),
    }
}

pub(crate) fn hash_value(h: &Hash) -> Value {
    Value::Bytes(h.as_bytes().to_vec())
}

pub(crate) fn as_hash(value: &Value, field: &str) -> Result<Hash> {
    match value {
        Value::Bytes(b) if b.len() == Hash::LEN => Ok(Hash::from_slice(b)),
        _ => Err(OpsError::Decoding(format!("invalid {}", field))),
    }
}

pub(crate) fn address_value(a: &Address) -> Value {
    Value::Bytes(a.as_bytes().to_vec())
}

pub(crate) fn as_address(value: &Value, field: &str) -> Result<Address> {
    match value {
        Value::Bytes(b) if b.len() == Address::LEN => Ok(Address::from_slice(b)),
        _ => Err(OpsError::Decoding(format!("invalid {}", field))),
    }
}

pub(crate) fn u64_value(n: u64) -> Value {
    Value::Integer(n.into())
}

pub(crate) fn as_u64(value: &Value, field: &str) -> Result<u64> {
    match value {
        Value::Integer(i) => {
            u64::try_from(*i).map_err(|_| OpsError::Decoding(format!("invalid {}", field)))
        }
        _ => Err(OpsError::Decoding(format!("invalid {}", field))),
    }
}

pub(crate) fn as_u8(value: &Value, field: &str) -> Result<u8> {
    let n = as_u64(value, field)?;
    u8::try_from(n).map_err(|_| OpsError::Decoding(format!("{} out of range: {}", field, n)))
}

pub(crate) fn u256_value(v: &U256) -> Value {
    Value::Bytes(to_be_bytes_trimmed(v))
}

pub(crate) fn as_u256(value: &Value, field: &str) -> Result<U256> {
    match value {
        Value::Bytes(b) if b.first() != Some(&0) => {
            from_be_bytes(b).ok_or_else(|| OpsError::Decoding(format!("{} exceeds 256 bits", field)))
        }
        Value::Bytes(_) => Err(OpsError::Decoding(format!(
            "{} has leading zero bytes",
            field
        ))),
        _ => Err(OpsError::Decoding(format!("invalid {}", field))),
    }
}

pub(crate) fn opt_u256_value(v: &Option<U256>) -> Value {
    match v {
        Some(v) => u256_value(v),
        None => Value::Null,
    }
}

pub(crate) fn as_opt_u256(value: &Value, field: &str) -> Result<Option<U256>> {
    match value {
        Value::Null => Ok(None),
        other => as_u256(other, field).map(Some),
    }
}

pub(crate) fn text_value(s: &str) -> Value {
    Value::Text(s.to_string())
}

pub(crate) fn as_text(value: &Value, field: &str) -> Result<String> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        _ => Err(OpsError::Decoding(format!("invalid {}", field))),
    }
}

pub(crate) fn as_bool(value: &Value, field: &str) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        _ => Err(OpsError::Decoding(format!("invalid {}", field))),
    }
}

pub(crate) fn opt_addresses_value(list: &Option<Vec<Address>>) -> Value {
    match list {
        Some(list) => Value::Array(list.iter().map(address_value).collect()),
        None => Value::Null,
    }
}

pub(crate) fn as_opt_addresses(value: &Value, field: &str) -> Result<Option<Vec<Address>>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => items
            .iter()
            .map(|item| as_address(item, field))
            .collect::<Result<Vec<_>>>()
            .map(Some),
        _ => Err(OpsError::Decoding(format!("invalid {}", field))),
    }
}
