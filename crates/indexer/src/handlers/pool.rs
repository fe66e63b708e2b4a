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

//! Handlers for user actions on the lending pool contract.
//!
//! Each action is recorded once under its event coordinates. An event whose action record
//! already exists has been applied and is ignored, so re-processing never double counts.

use alloy_primitives::U256;
use nautilus_lending_model::{
    LendingResult,
    enums::BorrowRateMode,
    events::{
        BorrowEvent, DepositEvent, FlashLoanEvent, LiquidationCallEvent, RepayEvent,
        ReserveUsedAsCollateralEvent, WithdrawEvent,
    },
    history::{Borrow, Deposit, FlashLoan, LiquidationCall, Repay, UsageAsCollateral, Withdraw},
    identifiers::history_entity_id,
};

use crate::{registry::EntityRegistry, store::EntityStore};

/// Handles a `Deposit` event.
///
/// Balances are not mutated here, they follow from token events.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved or the record conflicts.
pub fn handle_deposit<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &DepositEvent,
) -> LendingResult<()> {
    let meta = &event.meta;
    let id = history_entity_id(meta);
    if registry.already_recorded::<Deposit>(&id) {
        return Ok(());
    }

    let pool_id = registry.get_pool_by_contract(&meta.contract)?;
    let reserve = registry.get_or_init_reserve_in_pool(&event.reserve, &pool_id)?;
    let user_reserve =
        registry.get_or_init_user_reserve_with_ids(&event.on_behalf_of, &event.reserve, &pool_id)?;
    let caller = registry.get_or_init_user(&event.user);
    let referrer = registry.link_referrer(event.referral);

    registry.append_history(Deposit {
        id,
        pool: pool_id,
        user: user_reserve.user,
        caller: caller.id,
        user_reserve: user_reserve.id,
        reserve: reserve.id,
        amount: event.amount,
        referrer,
        timestamp: meta.block_timestamp,
    })
}

/// Handles a `Withdraw` event.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved or the record conflicts.
pub fn handle_withdraw<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &WithdrawEvent,
) -> LendingResult<()> {
    let meta = &event.meta;
    let id = history_entity_id(meta);
    if registry.already_recorded::<Withdraw>(&id) {
        return Ok(());
    }

    let pool_id = registry.get_pool_by_contract(&meta.contract)?;
    let reserve = registry.get_or_init_reserve_in_pool(&event.reserve, &pool_id)?;
    let user_reserve =
        registry.get_or_init_user_reserve_with_ids(&event.user, &event.reserve, &pool_id)?;
    let recipient = registry.get_or_init_user(&event.to);

    registry.append_history(Withdraw {
        id,
        pool: pool_id,
        user: user_reserve.user,
        to: recipient.id,
        user_reserve: user_reserve.id,
        reserve: reserve.id,
        amount: event.amount,
        timestamp: meta.block_timestamp,
    })
}

/// Handles a `Borrow` event.
///
/// The debt balances of the position are captured as they stand before the borrow.
///
/// # Errors
///
/// Returns [`LendingError::InvalidBorrowMode`](nautilus_lending_model::LendingError) before
/// any write if the rate mode is unknown, or an error if the pool cannot be resolved.
pub fn handle_borrow<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &BorrowEvent,
) -> LendingResult<()> {
    let meta = &event.meta;
    let borrow_rate_mode = BorrowRateMode::from_raw(event.borrow_rate_mode)?;
    let id = history_entity_id(meta);
    if registry.already_recorded::<Borrow>(&id) {
        return Ok(());
    }

    let pool_id = registry.get_pool_by_contract(&meta.contract)?;
    let reserve = registry.get_or_init_reserve_in_pool(&event.reserve, &pool_id)?;
    let user_reserve =
        registry.get_or_init_user_reserve_with_ids(&event.on_behalf_of, &event.reserve, &pool_id)?;
    let caller = registry.get_or_init_user(&event.user);
    let referrer = registry.link_referrer(event.referral);

    registry.append_history(Borrow {
        id,
        pool: pool_id,
        user: user_reserve.user.clone(),
        caller: caller.id,
        reserve: reserve.id,
        amount: event.amount,
        borrow_rate: event.borrow_rate,
        borrow_rate_mode,
        variable_token_debt: user_reserve.scaled_variable_debt,
        stable_token_debt: user_reserve.principal_stable_debt(),
        user_reserve: user_reserve.id,
        referrer,
        timestamp: meta.block_timestamp,
    })
}

/// Handles a `Repay` event.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved or the record conflicts.
pub fn handle_repay<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &RepayEvent,
) -> LendingResult<()> {
    let meta = &event.meta;
    let id = history_entity_id(meta);
    if registry.already_recorded::<Repay>(&id) {
        return Ok(());
    }

    let pool_id = registry.get_pool_by_contract(&meta.contract)?;
    let reserve = registry.get_or_init_reserve_in_pool(&event.reserve, &pool_id)?;
    let user_reserve =
        registry.get_or_init_user_reserve_with_ids(&event.user, &event.reserve, &pool_id)?;
    let repayer = registry.get_or_init_user(&event.repayer);
    registry.save(reserve.clone());

    registry.append_history(Repay {
        id,
        pool: pool_id,
        user: user_reserve.user,
        repayer: repayer.id,
        user_reserve: user_reserve.id,
        reserve: reserve.id,
        amount: event.amount,
        timestamp: meta.block_timestamp,
    })
}

/// Handles a `LiquidationCall` event.
///
/// The seized collateral is added to the collateral reserve's lifetime liquidated counter.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved or the counter overflows.
pub fn handle_liquidation_call<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &LiquidationCallEvent,
) -> LendingResult<()> {
    let meta = &event.meta;
    let id = history_entity_id(meta);
    if registry.already_recorded::<LiquidationCall>(&id) {
        return Ok(());
    }

    let pool_id = registry.get_pool_by_contract(&meta.contract)?;
    let principal_reserve = registry.get_or_init_reserve_in_pool(&event.debt_asset, &pool_id)?;
    let principal_user_reserve =
        registry.get_or_init_user_reserve_with_ids(&event.user, &event.debt_asset, &pool_id)?;

    // Loaded after the debt leg since both legs may share one reserve
    let mut collateral_reserve =
        registry.get_or_init_reserve_in_pool(&event.collateral_asset, &pool_id)?;
    let collateral_user_reserve =
        registry.get_or_init_user_reserve_with_ids(&event.user, &event.collateral_asset, &pool_id)?;
    collateral_reserve.record_liquidation(event.liquidated_collateral_amount)?;
    registry.save(collateral_reserve.clone());

    registry.append_history(LiquidationCall {
        id,
        pool: pool_id,
        user: collateral_user_reserve.user,
        collateral_reserve: collateral_reserve.id,
        collateral_user_reserve: collateral_user_reserve.id,
        collateral_amount: event.liquidated_collateral_amount,
        principal_reserve: principal_reserve.id,
        principal_user_reserve: principal_user_reserve.id,
        principal_amount: event.debt_to_cover,
        liquidator: event.liquidator,
        timestamp: meta.block_timestamp,
    })
}

/// Handles `ReserveUsedAsCollateralEnabled` (`enabled = true`) and
/// `ReserveUsedAsCollateralDisabled` (`enabled = false`) events.
///
/// The transition record is written from the stored flag before the flag is updated.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved or the record conflicts.
pub fn handle_usage_as_collateral<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &ReserveUsedAsCollateralEvent,
    enabled: bool,
) -> LendingResult<()> {
    let meta = &event.meta;
    let id = history_entity_id(meta);
    if registry.already_recorded::<UsageAsCollateral>(&id) {
        return Ok(());
    }

    let pool_id = registry.get_pool_by_contract(&meta.contract)?;
    let reserve = registry.get_or_init_reserve_in_pool(&event.reserve, &pool_id)?;
    let mut user_reserve =
        registry.get_or_init_user_reserve_with_ids(&event.user, &event.reserve, &pool_id)?;

    registry.append_history(UsageAsCollateral {
        id,
        pool: pool_id,
        user: user_reserve.user.clone(),
        user_reserve: user_reserve.id.clone(),
        reserve: reserve.id,
        from_state: user_reserve.usage_as_collateral_enabled_on_user,
        to_state: enabled,
        timestamp: meta.block_timestamp,
    })?;

    user_reserve.usage_as_collateral_enabled_on_user = enabled;
    user_reserve.last_update_timestamp = meta.block_timestamp;
    registry.save(user_reserve);
    Ok(())
}

/// Handles a `FlashLoan` event.
///
/// The premium is attributed to liquidity providers in full.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved or a counter overflows.
pub fn handle_flash_loan<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &FlashLoanEvent,
) -> LendingResult<()> {
    let meta = &event.meta;
    let id = history_entity_id(meta);
    if registry.already_recorded::<FlashLoan>(&id) {
        return Ok(());
    }

    let pool_id = registry.get_pool_by_contract(&meta.contract)?;
    let mut reserve = registry.get_or_init_reserve_in_pool(&event.asset, &pool_id)?;
    let initiator = registry.get_or_init_user(&event.initiator);
    reserve.record_flash_loan(event.amount, event.premium)?;
    registry.save(reserve.clone());
    let referrer = registry.link_referrer(event.referral_code);

    registry.append_history(FlashLoan {
        id,
        pool: pool_id,
        reserve: reserve.id,
        target: event.target,
        initiator: initiator.id,
        amount: event.amount,
        total_fee: event.premium,
        lp_fee: event.premium,
        protocol_fee: U256::ZERO,
        referrer,
        timestamp: meta.block_timestamp,
    })
}
