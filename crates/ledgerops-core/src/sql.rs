//! Persistence contract for identifiers.
//!
//! Identifiers are stored as raw blobs of exactly their length. Loading is
//! strict: a blob of the wrong size or a non-blob value is an error, never
//! truncated or padded.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::error::CodecError;
use crate::types::{Address, Hash, ADDRESS_LENGTH, HASH_LENGTH};

fn scan_fixed<const N: usize>(type_name: &'static str, value: ValueRef<'_>) -> Result<[u8; N], CodecError> {
    let bytes = match value {
        ValueRef::Blob(bytes) => bytes,
        other => {
            return Err(CodecError::TypeMismatch {
                type_name,
                found: other.data_type().to_string(),
            })
        }
    };
    if bytes.len() != N {
        return Err(CodecError::LengthMismatch {
            type_name,
            got: bytes.len(),
            want: N,
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok(out)
}

fn to_from_sql_error(err: CodecError) -> FromSqlError {
    match err {
        CodecError::LengthMismatch { got, want, .. } => FromSqlError::InvalidBlobSize {
            expected_size: want,
            blob_size: got,
        },
        CodecError::TypeMismatch { .. } => FromSqlError::InvalidType,
        other => FromSqlError::Other(Box::new(other)),
    }
}

impl Hash {
    /// Load from a stored value.
    pub fn scan(value: ValueRef<'_>) -> Result<Self, CodecError> {
        scan_fixed::<HASH_LENGTH>("Hash", value).map(Self)
    }
}

impl Address {
    /// Load from a stored value.
    pub fn scan(value: ValueRef<'_>) -> Result<Self, CodecError> {
        scan_fixed::<ADDRESS_LENGTH>("Address", value).map(Self)
    }
}

impl ToSql for Hash {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&self.0)))
    }
}

impl FromSql for Hash {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Self::scan(value).map_err(to_from_sql_error)
    }
}

impl ToSql for Address {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&self.0)))
    }
}

impl FromSql for Address {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Self::scan(value).map_err(to_from_sql_error)
    }
}
