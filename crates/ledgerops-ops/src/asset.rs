//! Assets: native fungible units with a fixed precision and supply.

use ciborium::value::Value;
use serde::{Deserialize, Serialize};

use ledgerops_core::amount::{serde_decimal, serde_decimal_opt};
use ledgerops_core::{Address, Hash, ONE_COIN, SYSTEM_ASSET_ID, U256};

use crate::canonical::{
    address_value, as_address, as_bool, as_hash, as_opt_u256, as_text, as_u256, as_u8, fields,
    hash_value, opt_u256_value, text_value, u256_value, u64_value, Canonical,
};
use crate::context::{Validate, ValidationContext};
use crate::error::{Result, ValidationError};

/// Maximum number of decimals an asset may declare.
pub const MAX_DECIMALS: u8 = 18;

/// Maximum description length (bytes) for assets and swaps.
pub const MAX_DESCRIPTION_LEN: usize = 1024;

/// Maximum asset name length (bytes).
pub const MAX_NAME_LEN: usize = 128;

/// Maximum asset symbol length (bytes).
pub const MAX_SYMBOL_LEN: usize = 64;

/// An issued asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Asset {
    #[serde(rename = "ID")]
    pub id: Hash,
    pub owner: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(with = "serde_decimal")]
    pub total: U256,
    pub can_change: bool,
    pub description: String,
}

impl Asset {
    /// Assign the identifier and owner chosen by the ledger.
    pub fn with_identity(mut self, id: Hash, owner: Address) -> Self {
        self.id = id;
        self.owner = owner;
        self
    }
}

/// The native asset of the network.
pub fn system_asset() -> Asset {
    Asset {
        id: SYSTEM_ASSET_ID,
        owner: Address::ZERO,
        name: "Fusion".into(),
        symbol: "FSN".into(),
        decimals: 18,
        total: U256::from(81_920_000u64) * ONE_COIN,
        can_change: false,
        description: "https://fusion.org".into(),
    }
}

/// Parameters of an asset issuance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenAssetParam {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(with = "serde_decimal_opt", default)]
    pub total: Option<U256>,
    pub can_change: bool,
    pub description: String,
}

impl GenAssetParam {
    /// Check issuance rules.
    pub fn check(&self, _block_number: u64) -> std::result::Result<(), ValidationError> {
        let total_set = self.total.map_or(false, |t| !t.is_zero());
        if self.name.is_empty() || self.symbol.is_empty() || !total_set {
            return Err(ValidationError::AssetFieldsMissing);
        }
        if self.decimals > MAX_DECIMALS {
            return Err(ValidationError::DecimalsOutOfRange(self.decimals));
        }
        check_len("description", &self.description, MAX_DESCRIPTION_LEN)?;
        check_len("name", &self.name, MAX_NAME_LEN)?;
        check_len("symbol", &self.symbol, MAX_SYMBOL_LEN)?;
        Ok(())
    }

    /// Convert into an asset record. Identifier and owner are left zero for
    /// the ledger to fill in (see [`Asset::with_identity`]).
    pub fn to_asset(&self) -> Asset {
        Asset {
            id: Hash::ZERO,
            owner: Address::ZERO,
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
            total: self.total.unwrap_or_default(),
            can_change: self.can_change,
            description: self.description.clone(),
        }
    }
}

pub(crate) fn check_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> std::result::Result<(), ValidationError> {
    if value.len() > max {
        return Err(ValidationError::TooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

impl Validate for GenAssetParam {
    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        self.check(ctx.block_number)
    }
}

impl Canonical for GenAssetParam {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![
            text_value(&self.name),
            text_value(&self.symbol),
            u64_value(self.decimals.into()),
            opt_u256_value(&self.total),
            Value::Bool(self.can_change),
            text_value(&self.description),
        ])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 6, "GenAssetParam")?;
        Ok(Self {
            name: as_text(&f[0], "name")?,
            symbol: as_text(&f[1], "symbol")?,
            decimals: as_u8(&f[2], "decimals")?,
            total: as_opt_u256(&f[3], "total")?,
            can_change: as_bool(&f[4], "can_change")?,
            description: as_text(&f[5], "description")?,
        })
    }
}

impl Canonical for Asset {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![
            hash_value(&self.id),
            address_value(&self.owner),
            text_value(&self.name),
            text_value(&self.symbol),
            u64_value(self.decimals.into()),
            u256_value(&self.total),
            Value::Bool(self.can_change),
            text_value(&self.description),
        ])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 8, "Asset")?;
        Ok(Self {
            id: as_hash(&f[0], "id")?,
            owner: as_address(&f[1], "owner")?,
            name: as_text(&f[2], "name")?,
            symbol: as_text(&f[3], "symbol")?,
            decimals: as_u8(&f[4], "decimals")?,
            total: as_u256(&f[5], "total")?,
            can_change: as_bool(&f[6], "can_change")?,
            description: as_text(&f[7], "description")?,
        })
    }
}
