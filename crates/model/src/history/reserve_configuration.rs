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

//! Snapshots of a reserve's configuration, written on configurator events.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{entities::Reserve, schema::SchemaConfig};

/// Point-in-time snapshot of the risk configuration of a reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveConfigurationHistoryItem {
    /// The history entity id of the configurator event.
    pub id: String,
    /// The reserve id.
    pub reserve: String,
    /// Whether the asset can be used as collateral.
    pub usage_as_collateral_enabled: bool,
    /// Whether borrowing is enabled.
    pub borrowing_enabled: bool,
    /// Whether stable rate borrowing is enabled, when tracked.
    pub stable_borrow_rate_enabled: Option<bool>,
    /// Whether the reserve is active.
    pub is_active: bool,
    /// Whether the reserve is frozen.
    pub is_frozen: bool,
    /// The interest rate strategy contract.
    pub reserve_interest_rate_strategy: Address,
    /// Loan to value (basis points).
    pub base_ltv_as_collateral: U256,
    /// Liquidation threshold (basis points).
    pub reserve_liquidation_threshold: U256,
    /// Liquidation bonus (basis points).
    pub reserve_liquidation_bonus: U256,
    /// Reserve factor (basis points).
    pub reserve_factor: U256,
    /// The block timestamp of the snapshot.
    pub timestamp: u64,
}

impl ReserveConfigurationHistoryItem {
    /// Creates a false/zero snapshot of `reserve`.
    #[must_use]
    pub fn new(id: impl Into<String>, reserve: impl Into<String>, schema: &SchemaConfig) -> Self {
        Self {
            id: id.into(),
            reserve: reserve.into(),
            usage_as_collateral_enabled: false,
            borrowing_enabled: false,
            stable_borrow_rate_enabled: schema.stable_debt.then_some(false),
            is_active: false,
            is_frozen: false,
            reserve_interest_rate_strategy: Address::ZERO,
            base_ltv_as_collateral: U256::ZERO,
            reserve_liquidation_threshold: U256::ZERO,
            reserve_liquidation_bonus: U256::ZERO,
            reserve_factor: U256::ZERO,
            timestamp: 0,
        }
    }

    /// Copies the current configuration of `reserve` into the snapshot.
    pub fn capture(&mut self, reserve: &Reserve, timestamp: u64) {
        self.usage_as_collateral_enabled = reserve.usage_as_collateral_enabled;
        self.borrowing_enabled = reserve.borrowing_enabled;
        if self.stable_borrow_rate_enabled.is_some() {
            self.stable_borrow_rate_enabled = Some(reserve.stable_borrow_rate_enabled());
        }
        self.is_active = reserve.is_active;
        self.is_frozen = reserve.is_frozen;
        self.reserve_interest_rate_strategy = reserve.reserve_interest_rate_strategy;
        self.base_ltv_as_collateral = reserve.base_ltv_as_collateral;
        self.reserve_liquidation_threshold = reserve.reserve_liquidation_threshold;
        self.reserve_liquidation_bonus = reserve.reserve_liquidation_bonus;
        self.reserve_factor = reserve.reserve_factor;
        self.timestamp = timestamp;
    }
}
