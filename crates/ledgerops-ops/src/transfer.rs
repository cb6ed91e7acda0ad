//! Value movement: plain sends, time-locked transfers, supply changes and
//! notation transfers.

use ciborium::value::Value;
use serde::{Deserialize, Serialize};

use ledgerops_core::amount::serde_decimal_opt;
use ledgerops_core::{Address, Hash, U256};

use crate::canonical::{
    address_value, as_address, as_bool, as_hash, as_opt_u256, as_text, as_u64, as_u8, fields,
    hash_value, opt_u256_value, text_value, u64_value, Canonical,
};
use crate::context::{Validate, ValidationContext};
use crate::error::{OpsError, Result, ValidationError};

/// Maximum length (bytes) of the annotation on an extended value change.
pub const MAX_TRANSAC_DATA_LEN: usize = 256;

fn require_positive(value: &Option<U256>) -> std::result::Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_zero() => Ok(()),
        _ => Err(ValidationError::ValueNotPositive),
    }
}

/// Move an asset balance to another account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendAssetParam {
    #[serde(rename = "AssetID")]
    pub asset_id: Hash,
    pub to: Address,
    #[serde(with = "serde_decimal_opt", default)]
    pub value: Option<U256>,
}

impl SendAssetParam {
    pub fn check(&self, _block_number: u64) -> std::result::Result<(), ValidationError> {
        require_positive(&self.value)?;
        if self.to.is_zero() {
            return Err(ValidationError::ZeroReceiver);
        }
        Ok(())
    }
}

impl Validate for SendAssetParam {
    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        self.check(ctx.block_number)
    }
}

impl Canonical for SendAssetParam {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![
            hash_value(&self.asset_id),
            address_value(&self.to),
            opt_u256_value(&self.value),
        ])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 3, "SendAssetParam")?;
        Ok(Self {
            asset_id: as_hash(&f[0], "asset_id")?,
            to: as_address(&f[1], "to")?,
            value: as_opt_u256(&f[2], "value")?,
        })
    }
}

/// Where a time-locked transfer takes value from and puts it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum TimeLockType {
    #[default]
    AssetToTimeLock = 0,
    TimeLockToTimeLock = 1,
    TimeLockToAsset = 2,
    SmartTransfer = 3,
}

impl TimeLockType {
    pub fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::AssetToTimeLock),
            1 => Some(Self::TimeLockToTimeLock),
            2 => Some(Self::TimeLockToAsset),
            3 => Some(Self::SmartTransfer),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TimeLockType {
    type Error = OpsError;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_u8(code)
            .ok_or_else(|| OpsError::Decoding(format!("unknown time lock type: {}", code)))
    }
}

impl From<TimeLockType> for u8 {
    fn from(t: TimeLockType) -> u8 {
        t.to_u8()
    }
}

/// A transfer into, between or out of time-locked balances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeLockParam {
    #[serde(rename = "Type")]
    pub lock_type: TimeLockType,
    #[serde(rename = "AssetID")]
    pub asset_id: Hash,
    pub to: Address,
    pub start_time: u64,
    pub end_time: u64,
    #[serde(with = "serde_decimal_opt", default)]
    pub value: Option<U256>,
}

impl TimeLockParam {
    pub fn check(
        &self,
        _block_number: u64,
        timestamp: u64,
    ) -> std::result::Result<(), ValidationError> {
        require_positive(&self.value)?;
        if self.start_time > self.end_time {
            return Err(ValidationError::InvertedWindow {
                window: "time lock",
                start: self.start_time,
                end: self.end_time,
            });
        }
        if self.end_time < timestamp {
            return Err(ValidationError::TimeLockEnded {
                end: self.end_time,
                timestamp,
            });
        }
        Ok(())
    }
}

impl Validate for TimeLockParam {
    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        self.check(ctx.block_number, ctx.timestamp)
    }
}

impl Canonical for TimeLockParam {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![
            u64_value(self.lock_type.to_u8().into()),
            hash_value(&self.asset_id),
            address_value(&self.to),
            u64_value(self.start_time),
            u64_value(self.end_time),
            opt_u256_value(&self.value),
        ])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 6, "TimeLockParam")?;
        Ok(Self {
            lock_type: TimeLockType::try_from(as_u8(&f[0], "lock_type")?)?,
            asset_id: as_hash(&f[1], "asset_id")?,
            to: as_address(&f[2], "to")?,
            start_time: as_u64(&f[3], "start_time")?,
            end_time: as_u64(&f[4], "end_time")?,
            value: as_opt_u256(&f[5], "value")?,
        })
    }
}

/// Increase or decrease the supply of a changeable asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetValueChangeParam {
    #[serde(rename = "AssetID")]
    pub asset_id: Hash,
    pub to: Address,
    #[serde(with = "serde_decimal_opt", default)]
    pub value: Option<U256>,
    pub is_inc: bool,
}

impl AssetValueChangeParam {
    pub fn check(&self, _block_number: u64) -> std::result::Result<(), ValidationError> {
        require_positive(&self.value)
    }
}

impl Validate for AssetValueChangeParam {
    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        self.check(ctx.block_number)
    }
}

impl Canonical for AssetValueChangeParam {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![
            hash_value(&self.asset_id),
            address_value(&self.to),
            opt_u256_value(&self.value),
            Value::Bool(self.is_inc),
        ])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 4, "AssetValueChangeParam")?;
        Ok(Self {
            asset_id: as_hash(&f[0], "asset_id")?,
            to: as_address(&f[1], "to")?,
            value: as_opt_u256(&f[2], "value")?,
            is_inc: as_bool(&f[3], "is_inc")?,
        })
    }
}

/// A supply change carrying a free-form annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetValueChangeExParam {
    #[serde(rename = "AssetID")]
    pub asset_id: Hash,
    pub to: Address,
    #[serde(with = "serde_decimal_opt", default)]
    pub value: Option<U256>,
    pub is_inc: bool,
    #[serde(default)]
    pub transac_data: String,
}

impl AssetValueChangeExParam {
    pub fn check(&self, _block_number: u64) -> std::result::Result<(), ValidationError> {
        require_positive(&self.value)?;
        if self.transac_data.len() > MAX_TRANSAC_DATA_LEN {
            return Err(ValidationError::TooLong {
                field: "transac_data",
                len: self.transac_data.len(),
                max: MAX_TRANSAC_DATA_LEN,
            });
        }
        Ok(())
    }
}

impl Validate for AssetValueChangeExParam {
    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        self.check(ctx.block_number)
    }
}

impl Canonical for AssetValueChangeExParam {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![
            hash_value(&self.asset_id),
            address_value(&self.to),
            opt_u256_value(&self.value),
            Value::Bool(self.is_inc),
            text_value(&self.transac_data),
        ])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 5, "AssetValueChangeExParam")?;
        Ok(Self {
            asset_id: as_hash(&f[0], "asset_id")?,
            to: as_address(&f[1], "to")?,
            value: as_opt_u256(&f[2], "value")?,
            is_inc: as_bool(&f[3], "is_inc")?,
            transac_data: as_text(&f[4], "transac_data")?,
        })
    }
}

/// Hand a short numeric account alias (notation) to another address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransferNotationParam {
    pub notation: u64,
    pub to_address: Address,
}

impl Validate for TransferNotationParam {
    fn validate(&self, _ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        Ok(())
    }
}

impl Canonical for TransferNotationParam {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![u64_value(self.notation), address_value(&self.to_address)])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 2, "TransferNotationParam")?;
        Ok(Self {
            notation: as_u64(&f[0], "notation")?,
            to_address: as_address(&f[1], "to_address")?,
        })
    }
}
