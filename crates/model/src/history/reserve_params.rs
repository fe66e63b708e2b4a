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

//! Snapshots of a reserve's rates and indices, written on reserve data updates.
//!
//! Records are keyed by event and reserve, see
//! [`crate::identifiers::reserve_params_history_item_id`].

use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    entities::{Reserve, ReserveFlashLoans},
    schema::SchemaConfig,
};

/// Stable debt values of a reserve parameters snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveParamsStableDebt {
    /// Stable borrow rate.
    pub stable_borrow_rate: U256,
    /// Average stable borrow rate.
    pub average_stable_borrow_rate: U256,
    /// Outstanding stable debt principal.
    pub total_principal_stable_debt: U256,
    /// Stable debt principal ever issued.
    pub lifetime_principal_stable_debt: U256,
}

/// Point-in-time snapshot of the rates, liquidity and lifetime counters of a reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveParamsHistoryItem {
    /// `historyEntityId ++ reserveId`.
    pub id: String,
    /// The reserve id.
    pub reserve: String,
    /// Variable borrow rate.
    pub variable_borrow_rate: U256,
    /// Variable borrow index.
    pub variable_borrow_index: U256,
    /// Utilization rate.
    pub utilization_rate: Decimal,
    /// Liquidity index.
    pub liquidity_index: U256,
    /// Liquidity rate.
    pub liquidity_rate: U256,
    /// Total liquidity.
    pub total_liquidity: U256,
    /// Total supply token balance.
    pub total_a_token_supply: U256,
    /// Liquidity available to borrow.
    pub available_liquidity: U256,
    /// Liquidity used as collateral.
    pub total_liquidity_as_collateral: U256,
    /// Oracle price in ETH.
    pub price_in_eth: U256,
    /// Oracle price in USD.
    pub price_in_usd: Decimal,
    /// Outstanding scaled variable debt.
    pub total_scaled_variable_debt: U256,
    /// Outstanding variable debt.
    pub total_current_variable_debt: U256,
    /// Scaled variable debt ever issued.
    pub lifetime_scaled_variable_debt: U256,
    /// Variable debt ever issued.
    pub lifetime_current_variable_debt: U256,
    /// Liquidity ever supplied.
    pub lifetime_liquidity: U256,
    /// Amount ever borrowed.
    pub lifetime_borrows: U256,
    /// Amount ever repaid.
    pub lifetime_repayments: U256,
    /// Amount ever withdrawn.
    pub lifetime_withdrawals: U256,
    /// Collateral ever liquidated.
    pub lifetime_liquidated: U256,
    /// Reserve factor ever accrued.
    pub lifetime_reserve_factor_accrued: U256,
    /// Interest ever earned by depositors.
    pub lifetime_depositors_interest_earned: U256,
    /// Stable debt values, when tracked.
    pub stable_debt: Option<ReserveParamsStableDebt>,
    /// Flash loan accumulators, when tracked.
    pub flash_loans: Option<ReserveFlashLoans>,
    /// The block timestamp of the snapshot.
    pub timestamp: u64,
}

impl ReserveParamsHistoryItem {
    /// Creates a zeroed snapshot of `reserve`.
    #[must_use]
    pub fn new(id: impl Into<String>, reserve: impl Into<String>, schema: &SchemaConfig) -> Self {
        Self {
            id: id.into(),
            reserve: reserve.into(),
            variable_borrow_rate: U256::ZERO,
            variable_borrow_index: U256::ZERO,
            utilization_rate: Decimal::ZERO,
            liquidity_index: U256::ZERO,
            liquidity_rate: U256::ZERO,
            total_liquidity: U256::ZERO,
            total_a_token_supply: U256::ZERO,
            available_liquidity: U256::ZERO,
            total_liquidity_as_collateral: U256::ZERO,
            price_in_eth: U256::ZERO,
            price_in_usd: Decimal::ZERO,
            total_scaled_variable_debt: U256::ZERO,
            total_current_variable_debt: U256::ZERO,
            lifetime_scaled_variable_debt: U256::ZERO,
            lifetime_current_variable_debt: U256::ZERO,
            lifetime_liquidity: U256::ZERO,
            lifetime_borrows: U256::ZERO,
            lifetime_repayments: U256::ZERO,
            lifetime_withdrawals: U256::ZERO,
            lifetime_liquidated: U256::ZERO,
            lifetime_reserve_factor_accrued: U256::ZERO,
            lifetime_depositors_interest_earned: U256::ZERO,
            stable_debt: schema.stable_debt.then(ReserveParamsStableDebt::default),
            flash_loans: schema.flash_loans.then(ReserveFlashLoans::default),
            timestamp: 0,
        }
    }

    /// Copies the current parameters of `reserve` into the snapshot.
    pub fn capture(&mut self, reserve: &Reserve, price_in_eth: U256, timestamp: u64) {
        self.variable_borrow_rate = reserve.variable_borrow_rate;
        self.variable_borrow_index = reserve.variable_borrow_index;
        self.utilization_rate = reserve.utilization_rate;
        self.liquidity_index = reserve.liquidity_index;
        self.liquidity_rate = reserve.liquidity_rate;
        self.total_liquidity = reserve.total_liquidity;
        self.total_a_token_supply = reserve.total_a_token_supply;
        self.available_liquidity = reserve.available_liquidity;
        self.total_liquidity_as_collateral = reserve.total_liquidity_as_collateral;
        self.price_in_eth = price_in_eth;
        self.total_scaled_variable_debt = reserve.total_scaled_variable_debt;
        self.total_current_variable_debt = reserve.total_current_variable_debt;
        self.lifetime_scaled_variable_debt = reserve.lifetime_scaled_variable_debt;
        self.lifetime_current_variable_debt = reserve.lifetime_current_variable_debt;
        self.lifetime_liquidity = reserve.lifetime_liquidity;
        self.lifetime_borrows = reserve.lifetime_borrows;
        self.lifetime_repayments = reserve.lifetime_repayments;
        self.lifetime_withdrawals = reserve.lifetime_withdrawals;
        self.lifetime_liquidated = reserve.lifetime_liquidated;
        self.lifetime_reserve_factor_accrued = reserve.lifetime_reserve_factor_accrued;
        self.lifetime_depositors_interest_earned = reserve.lifetime_depositors_interest_earned;
        if let (Some(snapshot), Some(stable)) = (self.stable_debt.as_mut(), &reserve.stable_debt) {
            snapshot.stable_borrow_rate = stable.stable_borrow_rate;
            snapshot.average_stable_borrow_rate = stable.average_stable_rate;
            snapshot.total_principal_stable_debt = stable.total_principal_stable_debt;
            snapshot.lifetime_principal_stable_debt = stable.lifetime_principal_stable_debt;
        }
        if self.flash_loans.is_some() {
            self.flash_loans.clone_from(&reserve.flash_loans);
        }
        self.timestamp = timestamp;
    }
}
