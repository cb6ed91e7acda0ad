//! Shared hex routines used by every fixed-length identifier.
//!
//! Decoders that target a concrete type take that type's name as a literal
//! string; it only ever ends up in error messages.

use crate::error::{CodecError, Result};

/// Returns true if `s` starts with `0x` or `0X`.
pub fn has_hex_prefix(s: &str) -> bool {
    s.len() >= 2 && (s.starts_with("0x") || s.starts_with("0X"))
}

/// Strip an optional `0x`/`0X` prefix.
pub fn strip_hex_prefix(s: &str) -> &str {
    if has_hex_prefix(s) {
        &s[2..]
    } else {
        s
    }
}

/// Returns true if `s` is a non-prefixed, even-length string of hex digits.
pub fn is_hex(s: &str) -> bool {
    s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Encode bytes as `0x`-prefixed lowercase hex.
pub fn encode_prefixed(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    out.push_str(&hex::encode(bytes));
    out
}

/// Decode free-form hex: the prefix is optional and an odd number of digits
/// gets an implicit leading zero.
pub fn decode_lenient(s: &str) -> Result<Vec<u8>> {
    let digits = strip_hex_prefix(s);
    if digits.len() % 2 == 1 {
        let mut padded = String::with_capacity(digits.len() + 1);
        padded.push('0');
        padded.push_str(digits);
        hex::decode(padded).map_err(|_| CodecError::InvalidHex)
    } else {
        hex::decode(digits).map_err(|_| CodecError::InvalidHex)
    }
}

/// Decode `0x`-prefixed hex into exactly `out.len()` bytes.
pub fn decode_fixed(type_name: &'static str, input: &str, out: &mut [u8]) -> Result<()> {
    if !has_hex_prefix(input) {
        return Err(CodecError::MissingPrefix);
    }
    decode_fixed_digits(type_name, &input[2..], out)
}

/// Decode hex with an optional prefix into exactly `out.len()` bytes.
pub fn decode_fixed_unprefixed(type_name: &'static str, input: &str, out: &mut [u8]) -> Result<()> {
    decode_fixed_digits(type_name, strip_hex_prefix(input), out)
}

fn decode_fixed_digits(type_name: &'static str, digits: &str, out: &mut [u8]) -> Result<()> {
    if digits.len() % 2 == 1 {
        return Err(CodecError::OddLength);
    }
    if digits.len() != out.len() * 2 {
        return Err(CodecError::WrongLength {
            type_name,
            got: digits.len(),
            want: out.len() * 2,
        });
    }
    hex::decode_to_slice(digits, out).map_err(|_| CodecError::InvalidHex)
}

/// Copy `src` right-aligned into `out`: crop from the left when `src` is
/// longer, zero-fill on the left when it is shorter.
pub fn right_align(src: &[u8], out: &mut [u8]) {
    out.fill(0);
    let src = if src.len() > out.len() {
        &src[src.len() - out.len()..]
    } else {
        src
    };
    let offset = out.len() - src.len();
    out[offset..].copy_from_slice(src);
}
