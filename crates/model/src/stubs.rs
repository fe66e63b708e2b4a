// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Type stubs to facilitate testing.

use alloy_primitives::{Address, B256, U256, address};
use rstest::fixture;

use crate::{
    entities::Reserve,
    events::{
        BorrowEvent, DepositEvent, EventMeta, FlashLoanEvent, LiquidationCallEvent, RepayEvent,
        ReserveDataUpdatedEvent, ReserveInitializedEvent, ReserveUsedAsCollateralEvent,
        WithdrawEvent,
    },
    identifiers::{price_oracle_asset_id, reserve_id},
    schema::SchemaConfig,
};

/// Pool id used by the stubs.
pub const STUB_POOL_ID: &str = "0xb53c1a33016b2dc2ff3653530bff1848a515c8c5";

/// Block timestamp of the first stub event.
pub const STUB_TIMESTAMP: u64 = 1_700_000_000;

/// The stub lending pool contract.
#[must_use]
pub const fn lending_pool_address() -> Address {
    address!("0x7d2768dE32b0b80b7a3454c06BdAc94A69DDc7A9")
}

/// The stub pool configurator contract.
#[must_use]
pub const fn configurator_address() -> Address {
    address!("0x311Bb771e4F8952E6Da169b425E7e92d6Ac45756")
}

/// The stub oracle contract.
#[must_use]
pub const fn oracle_address() -> Address {
    address!("0xA50ba011c48153De246E5192C8f9258A2ba79Ca9")
}

/// DAI.
#[must_use]
pub const fn dai() -> Address {
    address!("0x6B175474E89094C44Da98b954EedeAC495271d0F")
}

/// WETH.
#[must_use]
pub const fn weth() -> Address {
    address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")
}

/// First stub account.
#[must_use]
pub const fn alice() -> Address {
    address!("0x00000000000000000000000000000000000A11CE")
}

/// Second stub account.
#[must_use]
pub const fn bob() -> Address {
    address!("0x0000000000000000000000000000000000000B0B")
}

/// Creates event coordinates with a transaction hash unique per (block, transaction).
#[must_use]
pub fn stub_meta(
    contract: Address,
    block_number: u64,
    transaction_index: u32,
    log_index: u32,
    block_timestamp: u64,
) -> EventMeta {
    let hash_seed = [
        block_number.to_be_bytes().as_slice(),
        transaction_index.to_be_bytes().as_slice(),
    ]
    .concat();
    EventMeta::new(
        contract,
        block_number,
        block_timestamp,
        B256::left_padding_from(&hash_seed),
        transaction_index,
        log_index,
        0,
    )
}

/// Coordinates of a lending pool event.
#[fixture]
pub fn event_meta() -> EventMeta {
    stub_meta(lending_pool_address(), 18_000_000, 4, 12, STUB_TIMESTAMP)
}

/// An empty DAI reserve with every optional section.
#[fixture]
pub fn reserve() -> Reserve {
    Reserve::new(
        reserve_id(&dai(), STUB_POOL_ID),
        dai(),
        STUB_POOL_ID,
        price_oracle_asset_id(&dai()),
        &SchemaConfig::default(),
    )
}

/// A DAI deposit by [`alice`] at [`event_meta`].
#[must_use]
pub fn stub_deposit_event() -> DepositEvent {
    deposit(event_meta(), dai(), alice(), U256::from(1_000u64))
}

/// Deposit of `amount` into `asset` by `user` on its own behalf.
#[must_use]
pub fn deposit(meta: EventMeta, asset: Address, user: Address, amount: U256) -> DepositEvent {
    DepositEvent {
        meta,
        reserve: asset,
        user,
        on_behalf_of: user,
        amount,
        referral: 0,
    }
}

/// Withdrawal of `amount` from `asset` by `user` to itself.
#[must_use]
pub fn withdraw(meta: EventMeta, asset: Address, user: Address, amount: U256) -> WithdrawEvent {
    WithdrawEvent {
        meta,
        reserve: asset,
        user,
        to: user,
        amount,
    }
}

/// Borrow of `amount` from `asset` with the raw `mode`.
#[must_use]
pub fn borrow(
    meta: EventMeta,
    asset: Address,
    user: Address,
    amount: U256,
    mode: u64,
) -> BorrowEvent {
    BorrowEvent {
        meta,
        reserve: asset,
        user,
        on_behalf_of: user,
        amount,
        borrow_rate_mode: U256::from(mode),
        borrow_rate: U256::ZERO,
        referral: 0,
    }
}

/// Repayment of `amount` of `asset` by `user` for itself.
#[must_use]
pub fn repay(meta: EventMeta, asset: Address, user: Address, amount: U256) -> RepayEvent {
    RepayEvent {
        meta,
        reserve: asset,
        user,
        repayer: user,
        amount,
    }
}

/// Liquidation of `user` seizing `collateral_amount` of `collateral`.
#[must_use]
pub fn liquidation_call(
    meta: EventMeta,
    collateral: Address,
    debt: Address,
    user: Address,
    collateral_amount: U256,
) -> LiquidationCallEvent {
    LiquidationCallEvent {
        meta,
        collateral_asset: collateral,
        debt_asset: debt,
        user,
        debt_to_cover: collateral_amount / U256::from(2),
        liquidated_collateral_amount: collateral_amount,
        liquidator: bob(),
        receive_a_token: false,
    }
}

/// Collateral usage change of `asset` by `user`.
#[must_use]
pub fn collateral_toggle(
    meta: EventMeta,
    asset: Address,
    user: Address,
) -> ReserveUsedAsCollateralEvent {
    ReserveUsedAsCollateralEvent {
        meta,
        reserve: asset,
        user,
    }
}

/// Rate update of `asset` carrying `liquidity_rate` and unit indices.
#[must_use]
pub fn reserve_data_updated(
    meta: EventMeta,
    asset: Address,
    liquidity_rate: U256,
) -> ReserveDataUpdatedEvent {
    ReserveDataUpdatedEvent {
        meta,
        reserve: asset,
        liquidity_rate,
        stable_borrow_rate: U256::from(3u64),
        variable_borrow_rate: U256::from(2u64),
        liquidity_index: crate::math::RAY,
        variable_borrow_index: crate::math::RAY,
    }
}

/// Flash loan of `amount` of `asset` initiated by [`alice`].
#[must_use]
pub fn flash_loan(
    meta: EventMeta,
    asset: Address,
    amount: U256,
    premium: U256,
    referral_code: u16,
) -> FlashLoanEvent {
    FlashLoanEvent {
        meta,
        target: bob(),
        initiator: alice(),
        asset,
        amount,
        premium,
        referral_code,
    }
}

/// Listing of `asset` with token addresses derived from its last byte.
#[must_use]
pub fn reserve_initialized(meta: EventMeta, asset: Address) -> ReserveInitializedEvent {
    let last = asset.0[19];
    ReserveInitializedEvent {
        meta,
        asset,
        a_token: Address::with_last_byte(last.wrapping_add(1)),
        stable_debt_token: Address::with_last_byte(last.wrapping_add(2)),
        variable_debt_token: Address::with_last_byte(last.wrapping_add(3)),
        interest_rate_strategy_address: Address::with_last_byte(last.wrapping_add(4)),
    }
}
