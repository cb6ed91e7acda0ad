//! The closed set of native operations and their wire envelope.

use bytes::Bytes;
use ciborium::value::Value;

use crate::asset::GenAssetParam;
use crate::canonical::{as_u64, fields, u64_value, Canonical};
use crate::context::{Validate, ValidationContext};
use crate::error::{OpsError, Result, ValidationError};
use crate::swap::{MakeSwapParam, RecallSwapParam, TakeSwapParam};
use crate::ticket::BuyTicketParam;
use crate::transfer::{
    AssetValueChangeExParam, AssetValueChangeParam, SendAssetParam, TimeLockParam,
    TransferNotationParam,
};

/// Wire tag of a native operation. The values are fixed by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperationKind {
    GenNotation = 0,
    GenAsset = 1,
    SendAsset = 2,
    TimeLock = 3,
    BuyTicket = 4,
    OldAssetValueChange = 5,
    MakeSwap = 6,
    RecallSwap = 7,
    TakeSwap = 8,
    Empty = 9,
    MakeSwapExt = 10,
    TakeSwapExt = 11,
    AssetValueChange = 12,
    TransferNotation = 13,
}

impl OperationKind {
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::GenNotation),
            1 => Some(Self::GenAsset),
            2 => Some(Self::SendAsset),
            3 => Some(Self::TimeLock),
            4 => Some(Self::BuyTicket),
            5 => Some(Self::OldAssetValueChange),
            6 => Some(Self::MakeSwap),
            7 => Some(Self::RecallSwap),
            8 => Some(Self::TakeSwap),
            9 => Some(Self::Empty),
            10 => Some(Self::MakeSwapExt),
            11 => Some(Self::TakeSwapExt),
            12 => Some(Self::AssetValueChange),
            13 => Some(Self::TransferNotation),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Whether [`Operation`] has a payload type for this kind.
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Empty | Self::MakeSwapExt | Self::TakeSwapExt)
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A native operation with its decoded parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    GenNotation,
    GenAsset(GenAssetParam),
    SendAsset(SendAssetParam),
    TimeLock(TimeLockParam),
    BuyTicket(BuyTicketParam),
    OldAssetValueChange(AssetValueChangeParam),
    MakeSwap(MakeSwapParam),
    RecallSwap(RecallSwapParam),
    TakeSwap(TakeSwapParam),
    AssetValueChange(AssetValueChangeExParam),
    TransferNotation(TransferNotationParam),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::GenNotation => OperationKind::GenNotation,
            Operation::GenAsset(_) => OperationKind::GenAsset,
            Operation::SendAsset(_) => OperationKind::SendAsset,
            Operation::TimeLock(_) => OperationKind::TimeLock,
            Operation::BuyTicket(_) => OperationKind::BuyTicket,
            Operation::OldAssetValueChange(_) => OperationKind::OldAssetValueChange,
            Operation::MakeSwap(_) => OperationKind::MakeSwap,
            Operation::RecallSwap(_) => OperationKind::RecallSwap,
            Operation::TakeSwap(_) => OperationKind::TakeSwap,
            Operation::AssetValueChange(_) => OperationKind::AssetValueChange,
            Operation::TransferNotation(_) => OperationKind::TransferNotation,
        }
    }

    /// Whether validating this operation needs the referenced swap.
    pub fn needs_swap(&self) -> bool {
        matches!(self, Operation::RecallSwap(_) | Operation::TakeSwap(_))
    }

    /// Wrap into the wire envelope.
    pub fn to_call(&self) -> Result<OperationCall> {
        let data = match self {
            Operation::GenNotation => Vec::new(),
            Operation::GenAsset(p) => p.to_bytes()?,
            Operation::SendAsset(p) => p.to_bytes()?,
            Operation::TimeLock(p) => p.to_bytes()?,
            Operation::BuyTicket(p) => p.to_bytes()?,
            Operation::OldAssetValueChange(p) => p.to_bytes()?,
            Operation::MakeSwap(p) => p.to_bytes()?,
            Operation::RecallSwap(p) => p.to_bytes()?,
            Operation::TakeSwap(p) => p.to_bytes()?,
            Operation::AssetValueChange(p) => p.to_bytes()?,
            Operation::TransferNotation(p) => p.to_bytes()?,
        };
        Ok(OperationCall::new(self.kind(), data))
    }

    /// Decode the payload of a wire envelope.
    pub fn from_call(call: &OperationCall) -> Result<Self> {
        let data = call.data.as_ref();
        let op = match call.kind {
            OperationKind::GenNotation => {
                if !data.is_empty() {
                    return Err(OpsError::Decoding("GenNotation carries no payload".into()));
                }
                Operation::GenNotation
            }
            OperationKind::GenAsset => Operation::GenAsset(GenAssetParam::from_bytes(data)?),
            OperationKind::SendAsset => Operation::SendAsset(SendAssetParam::from_bytes(data)?),
            OperationKind::TimeLock => Operation::TimeLock(TimeLockParam::from_bytes(data)?),
            OperationKind::BuyTicket => Operation::BuyTicket(BuyTicketParam::from_bytes(data)?),
            OperationKind::OldAssetValueChange => {
                Operation::OldAssetValueChange(AssetValueChangeParam::from_bytes(data)?)
            }
            OperationKind::MakeSwap => Operation::MakeSwap(MakeSwapParam::from_bytes(data)?),
            OperationKind::RecallSwap => {
                Operation::RecallSwap(RecallSwapParam::from_bytes(data)?)
            }
            OperationKind::TakeSwap => Operation::TakeSwap(TakeSwapParam::from_bytes(data)?),
            OperationKind::AssetValueChange => {
                Operation::AssetValueChange(AssetValueChangeExParam::from_bytes(data)?)
            }
            OperationKind::TransferNotation => {
                Operation::TransferNotation(TransferNotationParam::from_bytes(data)?)
            }
            kind @ (OperationKind::Empty
            | OperationKind::MakeSwapExt
            | OperationKind::TakeSwapExt) => return Err(OpsError::UnsupportedKind(kind)),
        };
        Ok(op)
    }
}

impl Validate for Operation {
    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        match self {
            Operation::GenNotation => Ok(()),
            Operation::GenAsset(p) => p.validate(ctx),
            Operation::SendAsset(p) => p.validate(ctx),
            Operation::TimeLock(p) => p.validate(ctx),
            Operation::BuyTicket(p) => p.validate(ctx),
            Operation::OldAssetValueChange(p) => p.validate(ctx),
            Operation::MakeSwap(p) => p.validate(ctx),
            Operation::RecallSwap(p) => p.validate(ctx),
            Operation::TakeSwap(p) => p.validate(ctx),
            Operation::AssetValueChange(p) => p.validate(ctx),
            Operation::TransferNotation(p) => p.validate(ctx),
        }
    }
}

/// The envelope a native call travels in: a kind tag plus the canonical
/// bytes of its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationCall {
    pub kind: OperationKind,
    pub data: Bytes,
}

impl OperationCall {
    pub fn new(kind: OperationKind, data: impl Into<Bytes>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }
}

impl Canonical for OperationCall {
    fn to_cbor(&self) -> Value {
        Value::Array(vec![
            u64_value(self.kind.to_u8().into()),
            Value::Bytes(self.data.to_vec()),
        ])
    }

    fn from_cbor(value: &Value) -> Result<Self> {
        let f = fields(value, 2, "OperationCall")?;
        let tag = as_u64(&f[0], "kind")?;
        let kind = u8::try_from(tag)
            .ok()
            .and_then(OperationKind::from_u8)
            .ok_or(OpsError::UnknownKind(tag))?;
        let data = match &f[1] {
            Value::Bytes(b) => Bytes::copy_from_slice(b),
            _ => return Err(OpsError::Decoding("invalid data".into())),
        };
        Ok(Self { kind, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerops_core::{Address, Hash, U256};

    fn samples() -> Vec<Operation> {
        vec![
            Operation::GenNotation,
            Operation::GenAsset(GenAssetParam {
                name: "Gold".into(),
                symbol: "GLD".into(),
                decimals: 6,
                total: Some(U256::from(1_000_000u64)),
                ..GenAssetParam::default()
            }),
            Operation::SendAsset(SendAssetParam {
                asset_id: Hash::from_bytes([0xff; 32]),
                to: Address::from_bytes([1; 20]),
                value: Some(U256::from(10u64)),
            }),
            Operation::BuyTicket(BuyTicketParam { start: 1, end: 2 }),
            Operation::OldAssetValueChange(AssetValueChangeParam::default()),
            Operation::RecallSwap(RecallSwapParam::default()),
            Operation::AssetValueChange(AssetValueChangeExParam::default()),
            Operation::TransferNotation(TransferNotationParam {
                notation: 42,
                to_address: Address::from_bytes([2; 20]),
            }),
        ]
    }

    #[test]
    fn test_kind_tags_are_fixed() {
        assert_eq!(OperationKind::GenNotation.to_u8(), 0);
        assert_eq!(OperationKind::TakeSwap.to_u8(), 8);
        assert_eq!(OperationKind::AssetValueChange.to_u8(), 12);
        assert_eq!(OperationKind::TransferNotation.to_u8(), 13);
        for tag in 0..=13u8 {
            assert_eq!(OperationKind::from_u8(tag).unwrap().to_u8(), tag);
        }
        assert!(OperationKind::from_u8(14).is_none());
    }

    #[test]
    fn test_call_roundtrip() {
        for op in samples() {
            let call = op.to_call().unwrap();
            assert_eq!(call.kind, op.kind());
            let bytes = call.to_bytes().unwrap();
            let decoded = OperationCall::from_bytes(&bytes).unwrap();
            assert_eq!(Operation::from_call(&decoded).unwrap(), op);
        }
    }

    #[test]
    fn test_old_value_change_uses_plain_payload() {
        let p = AssetValueChangeParam {
            value: Some(U256::one()),
            ..AssetValueChangeParam::default()
        };
        let call = OperationCall::new(OperationKind::OldAssetValueChange, p.to_bytes().unwrap());
        assert_eq!(
            Operation::from_call(&call).unwrap(),
            Operation::OldAssetValueChange(p)
        );

        // the extended payload has one more field
        let call = OperationCall::new(OperationKind::AssetValueChange, p.to_bytes().unwrap());
        assert!(matches!(
            Operation::from_call(&call),
            Err(OpsError::Decoding(_))
        ));
    }

    #[test]
    fn test_unsupported_kinds() {
        for kind in [
            OperationKind::Empty,
            OperationKind::MakeSwapExt,
            OperationKind::TakeSwapExt,
        ] {
            assert!(!kind.is_supported());
            let call = OperationCall::new(kind, Vec::new());
            assert_eq!(
                Operation::from_call(&call),
                Err(OpsError::UnsupportedKind(kind))
            );
        }
    }

    #[test]
    fn test_unknown_tag() {
        let call = Value::Array(vec![u64_value(99), Value::Bytes(vec![])]);
        assert_eq!(
            OperationCall::from_cbor(&call),
            Err(OpsError::UnknownKind(99))
        );
    }

    #[test]
    fn test_unknown_tag_beyond_u8() {
        let call = Value::Array(vec![u64_value(256), Value::Bytes(vec![])]);
        assert_eq!(
            OperationCall::from_cbor(&call),
            Err(OpsError::UnknownKind(256))
        );
        let bytes = [0x82, 0x19, 0x01, 0x00, 0x40];
        assert_eq!(
            OperationCall::from_bytes(&bytes),
            Err(OpsError::UnknownKind(256))
        );
    }

    #[test]
    fn test_gen_notation_rejects_payload() {
        let call = OperationCall::new(OperationKind::GenNotation, vec![0x80]);
        assert!(Operation::from_call(&call).is_err());
    }

    #[test]
    fn test_validate_delegates() {
        let ctx = ValidationContext::new(1, 0);
        let op = Operation::SendAsset(SendAssetParam::default());
        assert_eq!(op.validate(&ctx), Err(ValidationError::ValueNotPositive));
        assert!(Operation::GenNotation.validate(&ctx).is_ok());

        let op = Operation::TakeSwap(TakeSwapParam::default());
        assert!(op.needs_swap());
        assert_eq!(op.validate(&ctx), Err(ValidationError::SwapMissing));
    }
}
