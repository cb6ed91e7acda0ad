//! Proptest generators for property-based testing.

use proptest::prelude::*;

use ledgerops_core::{Address, Hash, U256};
use ledgerops_ops::{
    BuyTicketParam, MakeSwapParam, Operation, SendAssetParam, Swap, TakeSwapParam, Ticket,
    TimeLockParam, TimeLockType, TransferNotationParam,
};

const DAY: u64 = 86_400;

/// Generate a random Hash.
pub fn hash() -> impl Strategy<Value = Hash> {
    any::<[u8; 32]>().prop_map(Hash::from_bytes)
}

/// Generate a random Address.
pub fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from_bytes)
}

/// Generate a non-zero Address.
pub fn receiver() -> impl Strategy<Value = Address> {
    address().prop_filter("non-zero receiver", |a| !a.is_zero())
}

/// Generate any 256-bit amount.
pub fn amount() -> impl Strategy<Value = U256> {
    any::<[u64; 4]>().prop_map(U256)
}

/// Generate a strictly positive amount small enough that products of two
/// never overflow.
pub fn small_amount() -> impl Strategy<Value = U256> {
    (1u128..=u128::MAX).prop_map(U256::from)
}

/// Generate a block timestamp in a realistic range.
pub fn timestamp() -> impl Strategy<Value = u64> {
    1_500_000_000u64..=2_000_000_000u64
}

/// Generate a TimeLockType.
pub fn time_lock_type() -> impl Strategy<Value = TimeLockType> {
    prop_oneof![
        Just(TimeLockType::AssetToTimeLock),
        Just(TimeLockType::TimeLockToTimeLock),
        Just(TimeLockType::TimeLockToAsset),
        Just(TimeLockType::SmartTransfer),
    ]
}

/// A valid ticket purchase for the block at `now`.
pub fn valid_ticket_window(now: u64) -> impl Strategy<Value = BuyTicketParam> {
    (0u64..=3 * 3600, 0u64..=365 * DAY).prop_map(move |(ahead, extra)| {
        let start = now + ahead;
        BuyTicketParam {
            start,
            end: start + 30 * DAY + extra,
        }
    })
}

/// A swap offer with both windows open at `now`.
pub fn open_swap_offer(now: u64) -> impl Strategy<Value = MakeSwapParam> {
    (
        hash(),
        hash(),
        small_amount(),
        small_amount(),
        small_amount(),
        1u64..=365 * DAY,
        1u64..=365 * DAY,
        proptest::option::of(prop::collection::vec(address(), 0..4)),
    )
        .prop_map(
            move |(from_asset, to_asset, min_from, min_to, size, from_len, to_len, targets)| {
                MakeSwapParam {
                    from_asset_id: from_asset,
                    from_start_time: now,
                    from_end_time: now + from_len,
                    min_from_amount: Some(min_from),
                    to_asset_id: to_asset,
                    to_start_time: now,
                    to_end_time: now + to_len,
                    min_to_amount: Some(min_to),
                    swap_size: Some(size),
                    targets,
                    time: None,
                    description: String::new(),
                }
            },
        )
}

/// A stored swap open at `now` together with a take that fits it.
pub fn swap_and_take(now: u64) -> impl Strategy<Value = (Swap, TakeSwapParam)> {
    (open_swap_offer(now), hash(), address(), any::<u128>()).prop_map(
        |(offer, id, owner, pick)| {
            let swap = offer.to_swap(id, owner);
            let size = U256::from(pick) % swap.swap_size + U256::one();
            let take = TakeSwapParam {
                swap_id: id,
                size: Some(size),
            };
            (swap, take)
        },
    )
}

/// Generate a Ticket.
pub fn ticket() -> impl Strategy<Value = Ticket> {
    (hash(), address(), any::<u64>(), timestamp(), amount()).prop_map(
        |(id, owner, height, start, value)| {
            Ticket::new(id, owner, height, start, start + 30 * DAY, value)
        },
    )
}

/// Generate any supported operation with arbitrary (not necessarily valid)
/// parameters.
pub fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::GenNotation),
        (hash(), address(), proptest::option::of(amount())).prop_map(|(asset_id, to, value)| {
            Operation::SendAsset(SendAssetParam {
                asset_id,
                to,
                value,
            })
        }),
        (any::<u64>(), any::<u64>())
            .prop_map(|(start, end)| Operation::BuyTicket(BuyTicketParam { start, end })),
        (
            time_lock_type(),
            hash(),
            address(),
            any::<u64>(),
            any::<u64>(),
            proptest::option::of(amount())
        )
            .prop_map(|(lock_type, asset_id, to, start_time, end_time, value)| {
                Operation::TimeLock(TimeLockParam {
                    lock_type,
                    asset_id,
                    to,
                    start_time,
                    end_time,
                    value,
                })
            }),
        (hash(), proptest::option::of(amount())).prop_map(|(swap_id, size)| {
            Operation::TakeSwap(TakeSwapParam { swap_id, size })
        }),
        (any::<u64>(), address()).prop_map(|(notation, to_address)| {
            Operation::TransferNotation(TransferNotationParam {
                notation,
                to_address,
            })
        }),
        open_swap_offer(1_700_000_000).prop_map(Operation::MakeSwap),
    ]
}
