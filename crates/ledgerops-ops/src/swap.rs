//! Atomic swap offers: creation, recall and (partial) take.
//!
//! An offer moves through Open, PartiallyFilled, then Filled, Recalled or
//! Expired. Only the ledger tracks those states; this module checks the
//! preconditions of each transition.

use ciborium::value::Value;
use serde::{Deserialize, Serialize};

use ledgerops_core::amount::{serde_decimal, serde_decimal_opt};
use ledgerops_core::{Address, Hash, U256};

use crate::asset::{check_len, MAX_DESCRIPTION_LEN};
use crate::canonical::{
    address_value, as_address, as_hash, as_opt_addresses, as_opt_u256, as_text, as_u256, as_u64,
    fields, hash_value, opt_addresses_value, opt_u256_value, text_value, u256_value, u64_value,
    Canonical,
};
use crate::context::{Validate, ValidationContext};
use crate::error::{Result, ValidationError};

/// A stored swap offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Swap {
    #[serde(rename = "ID")]
    pub id: Hash,
    pub owner: Address,
    #[serde(rename = "FromAssetID")]
    pub from_asset_id: Hash,
    pub from_start_time: u64,
    pub from_end_time: u64,
    #[serde(with = "serde_decimal")]
    pub min_from_amount: U256,
    #[serde(rename = "ToAssetID")]
    pub to_asset_id: Hash,
    pub to_start_time: u64,
    pub to_end_time: u64,
    #[serde(with = "serde_decimal")]
    pub min_to_amount: U256,
    #[serde(with = "serde_decimal")]
    pub swap_size: U256,
    /// Addresses allowed to take the offer. `None` means anyone.
    #[serde(rename = "Targes")]
    pub targets: Option<Vec<Address>>,
    #[serde(with = "serde_decimal")]
    pub time: U256,
    pub description: String,
}

impl Swap {
    /// Whether either window has closed at `timestamp`.
    pub fn is_expired(&self, timestamp: u64) -> bool {
        self.from_end_time <= timestamp || self.to_end_time <= timestamp
    }

    /// Whether `address` may take this offer.
    pub fn is_target(&self, address: &Address) -> bool {
        match &self.targets {
            None => true,
            Some(list) => list.contains(address),
        }
    }
}

impl Canonical for Swap {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![
            hash_value(&self.id),
            address_value(&self.owner),
            hash_value(&self.from_asset_id),
            u64_value(self.from_start_time),
            u64_value(self.from_end_time),
            u256_value(&self.min_from_amount),
            hash_value(&self.to_asset_id),
            u64_value(self.to_start_time),
            u64_value(self.to_end_time),
            u256_value(&self.min_to_amount),
            u256_value(&self.swap_size),
            opt_addresses_value(&self.targets),
            u256_value(&self.time),
            text_value(&self.description),
        ])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 14, "Swap")?;
        Ok(Self {
            id: as_hash(&f[0], "id")?,
            owner: as_address(&f[1], "owner")?,
            from_asset_id: as_hash(&f[2], "from_asset_id")?,
            from_start_time: as_u64(&f[3], "from_start_time")?,
            from_end_time: as_u64(&f[4], "from_end_time")?,
            min_from_amount: as_u256(&f[5], "min_from_amount")?,
            to_asset_id: as_hash(&f[6], "to_asset_id")?,
            to_start_time: as_u64(&f[7], "to_start_time")?,
            to_end_time: as_u64(&f[8], "to_end_time")?,
            min_to_amount: as_u256(&f[9], "min_to_amount")?,
            swap_size: as_u256(&f[10], "swap_size")?,
            targets: as_opt_addresses(&f[11], "targets")?,
            time: as_u256(&f[12], "time")?,
            description: as_text(&f[13], "description")?,
        })
    }
}

/// Parameters of a new swap offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MakeSwapParam {
    #[serde(rename = "FromAssetID")]
    pub from_asset_id: Hash,
    pub from_start_time: u64,
    pub from_end_time: u64,
    #[serde(with = "serde_decimal_opt", default)]
    pub min_from_amount: Option<U256>,
    #[serde(rename = "ToAssetID")]
    pub to_asset_id: Hash,
    pub to_start_time: u64,
    pub to_end_time: u64,
    #[serde(with = "serde_decimal_opt", default)]
    pub min_to_amount: Option<U256>,
    #[serde(with = "serde_decimal_opt", default)]
    pub swap_size: Option<U256>,
    #[serde(rename = "Targes", default)]
    pub targets: Option<Vec<Address>>,
    #[serde(with = "serde_decimal_opt", default)]
    pub time: Option<U256>,
    #[serde(default)]
    pub description: String,
}

fn positive(value: Option<U256>) -> Option<U256> {
    value.filter(|v| !v.is_zero())
}

impl MakeSwapParam {
    /// Check offer rules against the latest block time.
    ///
    /// A `swap_size * min_from_amount` above 2^256 - 1 is rejected as
    /// [`ValidationError::SwapTotalOverflow`].
    pub fn check(
        &self,
        _block_number: u64,
        timestamp: u64,
    ) -> std::result::Result<(), ValidationError> {
        let (min_from, _min_to, size) = match (
            positive(self.min_from_amount),
            positive(self.min_to_amount),
            positive(self.swap_size),
        ) {
            (Some(f), Some(t), Some(s)) => (f, t, s),
            _ => return Err(ValidationError::SwapAmountsNotPositive),
        };
        check_len("description", &self.description, MAX_DESCRIPTION_LEN)?;
        if min_from.checked_mul(size).is_none() {
            return Err(ValidationError::SwapTotalOverflow("swap_size * min_from_amount"));
        }

        if self.from_start_time > self.from_end_time {
            return Err(ValidationError::InvertedWindow {
                window: "from",
                start: self.from_start_time,
                end: self.from_end_time,
            });
        }
        if self.to_start_time > self.to_end_time {
            return Err(ValidationError::InvertedWindow {
                window: "to",
                start: self.to_start_time,
                end: self.to_end_time,
            });
        }

        if self.from_end_time <= timestamp {
            return Err(ValidationError::SwapWindowClosed {
                window: "from",
                end: self.from_end_time,
                timestamp,
            });
        }
        if self.to_end_time <= timestamp {
            return Err(ValidationError::SwapWindowClosed {
                window: "to",
                end: self.to_end_time,
                timestamp,
            });
        }
        Ok(())
    }

    /// Build the stored record for this offer. Unset amounts become zero.
    pub fn to_swap(&self, id: Hash, owner: Address) -> Swap {
        Swap {
            id,
            owner,
            from_asset_id: self.from_asset_id,
            from_start_time: self.from_start_time,
            from_end_time: self.from_end_time,
            min_from_amount: self.min_from_amount.unwrap_or_default(),
            to_asset_id: self.to_asset_id,
            to_start_time: self.to_start_time,
            to_end_time: self.to_end_time,
            min_to_amount: self.min_to_amount.unwrap_or_default(),
            swap_size: self.swap_size.unwrap_or_default(),
            targets: self.targets.clone(),
            time: self.time.unwrap_or_default(),
            description: self.description.clone(),
        }
    }
}

impl Validate for MakeSwapParam {
    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        self.check(ctx.block_number, ctx.timestamp)
    }
}

impl Canonical for MakeSwapParam {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![
            hash_value(&self.from_asset_id),
            u64_value(self.from_start_time),
            u64_value(self.from_end_time),
            opt_u256_value(&self.min_from_amount),
            hash_value(&self.to_asset_id),
            u64_value(self.to_start_time),
            u64_value(self.to_end_time),
            opt_u256_value(&self.min_to_amount),
            opt_u256_value(&self.swap_size),
            opt_addresses_value(&self.targets),
            opt_u256_value(&self.time),
            text_value(&self.description),
        ])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 12, "MakeSwapParam")?;
        Ok(Self {
            from_asset_id: as_hash(&f[0], "from_asset_id")?,
            from_start_time: as_u64(&f[1], "from_start_time")?,
            from_end_time: as_u64(&f[2], "from_end_time")?,
            min_from_amount: as_opt_u256(&f[3], "min_from_amount")?,
            to_asset_id: as_hash(&f[4], "to_asset_id")?,
            to_start_time: as_u64(&f[5], "to_start_time")?,
            to_end_time: as_u64(&f[6], "to_end_time")?,
            min_to_amount: as_opt_u256(&f[7], "min_to_amount")?,
            swap_size: as_opt_u256(&f[8], "swap_size")?,
            targets: as_opt_addresses(&f[9], "targets")?,
            time: as_opt_u256(&f[10], "time")?,
            description: as_text(&f[11], "description")?,
        })
    }
}

/// Withdraw an open offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecallSwapParam {
    #[serde(rename = "SwapID")]
    pub swap_id: Hash,
}

impl RecallSwapParam {
    /// Check that the referenced offer is well formed.
    ///
    /// Ownership is not checked here; the ledger compares the caller with
    /// [`Swap::owner`] when it applies the recall.
    pub fn check(&self, _block_number: u64, swap: &Swap) -> std::result::Result<(), ValidationError> {
        if swap.min_from_amount.is_zero() {
            return Err(ValidationError::SwapIllegal("min_from_amount"));
        }
        if swap.swap_size.is_zero() {
            return Err(ValidationError::SwapIllegal("swap_size"));
        }
        if swap.min_from_amount.checked_mul(swap.swap_size).is_none() {
            return Err(ValidationError::SwapTotalOverflow("swap_size * min_from_amount"));
        }
        Ok(())
    }
}

impl Validate for RecallSwapParam {
    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        self.check(ctx.block_number, ctx.require_swap()?)
    }
}

impl Canonical for RecallSwapParam {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![hash_value(&self.swap_id)])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 1, "RecallSwapParam")?;
        Ok(Self {
            swap_id: as_hash(&f[0], "swap_id")?,
        })
    }
}

/// Take `size` units of an offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TakeSwapParam {
    #[serde(rename = "SwapID")]
    pub swap_id: Hash,
    #[serde(with = "serde_decimal_opt", default)]
    pub size: Option<U256>,
}

impl TakeSwapParam {
    /// Check the take against the stored offer and the latest block time.
    ///
    /// Products of `size` with either minimum amount that do not fit in 256
    /// bits are rejected as [`ValidationError::SwapTotalOverflow`].
    pub fn check(&self, swap: &Swap, timestamp: u64) -> std::result::Result<(), ValidationError> {
        let size = self.size.unwrap_or_default();
        if size.is_zero() || size > swap.swap_size {
            return Err(ValidationError::TakeSizeOutOfRange {
                size,
                swap_size: swap.swap_size,
            });
        }
        if swap.min_from_amount.is_zero() {
            return Err(ValidationError::SwapIllegal("min_from_amount"));
        }
        if swap.min_to_amount.is_zero() {
            return Err(ValidationError::SwapIllegal("min_to_amount"));
        }

        if swap.min_from_amount.checked_mul(size).is_none() {
            return Err(ValidationError::SwapTotalOverflow("size * min_from_amount"));
        }
        if swap.min_to_amount.checked_mul(size).is_none() {
            return Err(ValidationError::SwapTotalOverflow("size * min_to_amount"));
        }

        if swap.from_end_time <= timestamp {
            return Err(ValidationError::SwapWindowClosed {
                window: "from",
                end: swap.from_end_time,
                timestamp,
            });
        }
        if swap.to_end_time <= timestamp {
            return Err(ValidationError::SwapWindowClosed {
                window: "to",
                end: swap.to_end_time,
                timestamp,
            });
        }
        Ok(())
    }
}

impl Validate for TakeSwapParam {
    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        self.check(ctx.require_swap()?, ctx.timestamp)
    }
}

impl Canonical for TakeSwapParam {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![hash_value(&self.swap_id), opt_u256_value(&self.size)])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 2, "TakeSwapParam")?;
        Ok(Self {
            swap_id: as_hash(&f[0], "swap_id")?,
            size: as_opt_u256(&f[1], "size")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: u64 = 1_700_000_000;

    fn make(from_end: u64, to_end: u64) -> MakeSwapParam {
        MakeSwapParam {
            from_asset_id: Hash::from_bytes([1; 32]),
            from_start_time: 0,
            from_end_time: from_end,
            min_from_amount: Some(U256::from(100u64)),
            to_asset_id: Hash::from_bytes([2; 32]),
            to_start_time: 0,
            to_end_time: to_end,
            min_to_amount: Some(U256::from(100u64)),
            swap_size: Some(U256::from(10u64)),
            targets: None,
            time: None,
            description: String::new(),
        }
    }

    fn stored() -> Swap {
        Swap {
            swap_size: U256::from(10u64),
            min_from_amount: U256::from(100u64),
            min_to_amount: U256::from(50u64),
            from_end_time: T + 100,
            to_end_time: T + 100,
            ..Swap::default()
        }
    }

    fn take(size: u64) -> TakeSwapParam {
        TakeSwapParam {
            swap_id: Hash::ZERO,
            size: Some(U256::from(size)),
        }
    }

    #[test]
    fn test_make_swap_open_windows() {
        assert!(make(T + 1, T + 1).check(0, T).is_ok());
    }

    #[test]
    fn test_make_swap_closed_windows() {
        assert!(matches!(
            make(T, T + 1).check(0, T),
            Err(ValidationError::SwapWindowClosed { window: "from", .. })
        ));
        assert!(matches!(
            make(T + 1, T).check(0, T),
            Err(ValidationError::SwapWindowClosed { window: "to", .. })
        ));
    }

    #[test]
    fn test_make_swap_amounts() {
        let mut p = make(T + 1, T + 1);
        p.swap_size = None;
        assert_eq!(p.check(0, T), Err(ValidationError::SwapAmountsNotPositive));
        let mut p = make(T + 1, T + 1);
        p.min_to_amount = Some(U256::zero());
        assert_eq!(p.check(0, T), Err(ValidationError::SwapAmountsNotPositive));
    }

    #[test]
    fn test_make_swap_overflowing_total() {
        let mut p = make(T + 1, T + 1);
        p.min_from_amount = Some(U256::MAX);
        p.swap_size = Some(U256::from(2u64));
        assert!(matches!(
            p.check(0, T),
            Err(ValidationError::SwapTotalOverflow(_))
        ));
    }

    #[test]
    fn test_make_swap_inverted_window() {
        let mut p = make(T + 10, T + 10);
        p.from_start_time = T + 11;
        assert!(matches!(
            p.check(0, T),
            Err(ValidationError::InvertedWindow { window: "from", .. })
        ));

        let mut p = make(T + 10, T + 10);
        p.to_start_time = T + 11;
        assert!(matches!(
            p.check(0, T),
            Err(ValidationError::InvertedWindow { window: "to", .. })
        ));
    }

    #[test]
    fn test_make_swap_description_bound() {
        let mut p = make(T + 1, T + 1);
        p.description = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(matches!(
            p.check(0, T),
            Err(ValidationError::TooLong { field: "description", .. })
        ));
    }

    #[test]
    fn test_take_full_size() {
        assert!(take(10).check(&stored(), T).is_ok());
        assert!(take(1).check(&stored(), T).is_ok());
    }

    #[test]
    fn test_take_out_of_range() {
        assert!(matches!(
            take(11).check(&stored(), T),
            Err(ValidationError::TakeSizeOutOfRange { .. })
        ));
        assert!(matches!(
            take(0).check(&stored(), T),
            Err(ValidationError::TakeSizeOutOfRange { .. })
        ));
        let unset = TakeSwapParam {
            swap_id: Hash::ZERO,
            size: None,
        };
        assert!(unset.check(&stored(), T).is_err());
    }

    #[test]
    fn test_take_overflowing_total() {
        let mut swap = stored();
        swap.swap_size = U256::MAX;
        swap.min_from_amount = U256::MAX;
        assert_eq!(
            take(2).check(&swap, T),
            Err(ValidationError::SwapTotalOverflow("size * min_from_amount"))
        );
    }

    #[test]
    fn test_take_expired_offer() {
        let swap = stored();
        assert!(swap.is_expired(T + 100));
        assert!(matches!(
            take(5).check(&swap, T + 100),
            Err(ValidationError::SwapWindowClosed { .. })
        ));
    }

    #[test]
    fn test_take_illegal_offer() {
        let mut swap = stored();
        swap.min_to_amount = U256::zero();
        assert_eq!(
            take(5).check(&swap, T),
            Err(ValidationError::SwapIllegal("min_to_amount"))
        );
    }

    #[test]
    fn test_recall() {
        let p = RecallSwapParam::default();
        assert!(p.check(0, &stored()).is_ok());
        let mut swap = stored();
        swap.swap_size = U256::zero();
        assert_eq!(p.check(0, &swap), Err(ValidationError::SwapIllegal("swap_size")));
    }

    #[test]
    fn test_recall_zero_min_from_amount() {
        let mut swap = stored();
        swap.min_from_amount = U256::zero();
        assert_eq!(
            RecallSwapParam::default().check(0, &swap),
            Err(ValidationError::SwapIllegal("min_from_amount"))
        );
    }

    #[test]
    fn test_recall_overflowing_total() {
        let mut swap = stored();
        swap.min_from_amount = U256::MAX;
        swap.swap_size = U256::from(2u64);
        assert_eq!(
            RecallSwapParam::default().check(0, &swap),
            Err(ValidationError::SwapTotalOverflow("swap_size * min_from_amount"))
        );
    }

    #[test]
    fn test_recall_and_take_need_swap_in_context() {
        let ctx = ValidationContext::new(1, T);
        assert_eq!(
            RecallSwapParam::default().validate(&ctx),
            Err(ValidationError::SwapMissing)
        );
        assert_eq!(take(1).validate(&ctx), Err(ValidationError::SwapMissing));

        let swap = stored();
        let ctx = ctx.swap(&swap);
        assert!(take(1).validate(&ctx).is_ok());
    }

    #[test]
    fn test_to_swap_and_targets() {
        let mut p = make(T + 1, T + 2);
        let taker = Address::from_bytes([7; 20]);
        p.targets = Some(vec![taker]);
        let swap = p.to_swap(Hash::from_bytes([9; 32]), Address::from_bytes([8; 20]));
        assert_eq!(swap.swap_size, U256::from(10u64));
        assert_eq!(swap.time, U256::zero());
        assert!(swap.is_target(&taker));
        assert!(!swap.is_target(&Address::ZERO));
        assert!(stored().is_target(&Address::ZERO));
    }

    #[test]
    fn test_swap_json_field_names() {
        let mut swap = stored();
        swap.targets = Some(vec![]);
        let json = serde_json::to_value(&swap).unwrap();
        assert_eq!(json["SwapSize"], "10");
        assert_eq!(json["Targes"], serde_json::json!([]));
        let back: Swap = serde_json::from_value(json).unwrap();
        assert_eq!(back, swap);
    }

    #[test]
    fn test_canonical_roundtrip() {
        let mut p = make(T + 1, T + 2);
        p.targets = Some(vec![Address::from_bytes([3; 20])]);
        p.time = Some(U256::from(5u64));
        let decoded = MakeSwapParam::from_bytes(&p.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, p);

        let swap = p.to_swap(Hash::from_bytes([4; 32]), Address::from_bytes([5; 20]));
        assert_eq!(Swap::from_bytes(&swap.to_bytes().unwrap()).unwrap(), swap);
    }
}
