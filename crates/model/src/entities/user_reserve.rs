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

//! Per-user position in a reserve.

use std::fmt::Display;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::schema::SchemaConfig;

/// Stable rate debt of a position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReserveStableDebt {
    /// Stable debt principal.
    pub principal_stable_debt: U256,
    /// Stable debt including accrued interest.
    pub current_stable_debt: U256,
    /// Stable borrow rate of the position.
    pub stable_borrow_rate: U256,
    /// Stable borrow rate before the last update.
    pub old_stable_borrow_rate: U256,
    /// Timestamp of the last stable debt update.
    pub stable_borrow_last_update_timestamp: u64,
}

/// Incentive indices of a position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReserveIncentives {
    /// Supply token incentives index of the user.
    pub a_token_incentives_user_index: U256,
    /// Variable debt token incentives index of the user.
    pub v_token_incentives_user_index: U256,
    /// Stable debt token incentives index of the user.
    pub s_token_incentives_user_index: U256,
    /// Timestamp of the last supply incentives update.
    pub a_incentives_last_update_timestamp: u64,
    /// Timestamp of the last variable debt incentives update.
    pub v_incentives_last_update_timestamp: u64,
    /// Timestamp of the last stable debt incentives update.
    pub s_incentives_last_update_timestamp: u64,
}

/// The position of one user in one reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReserve {
    /// `user ++ underlyingAsset ++ poolId`.
    pub id: String,
    /// The pool id.
    pub pool: String,
    /// The user id.
    pub user: String,
    /// The reserve id.
    pub reserve: String,
    /// Whether the user uses the reserve as collateral.
    pub usage_as_collateral_enabled_on_user: bool,
    /// Scaled supply token balance.
    pub scaled_a_token_balance: U256,
    /// Scaled variable debt.
    pub scaled_variable_debt: U256,
    /// Supply token balance including accrued interest.
    pub current_a_token_balance: U256,
    /// Variable debt including accrued interest.
    pub current_variable_debt: U256,
    /// Total debt including accrued interest.
    pub current_total_debt: U256,
    /// Variable borrow index at the last update.
    pub variable_borrow_index: U256,
    /// Timestamp of the last update.
    pub last_update_timestamp: u64,
    /// Liquidity rate at the last update.
    pub liquidity_rate: U256,
    /// Stable debt section.
    pub stable_debt: Option<UserReserveStableDebt>,
    /// Incentives section.
    pub incentives: Option<UserReserveIncentives>,
}

impl UserReserve {
    /// Creates a new empty position.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        pool: impl Into<String>,
        user: impl Into<String>,
        reserve: impl Into<String>,
        schema: &SchemaConfig,
    ) -> Self {
        Self {
            id: id.into(),
            pool: pool.into(),
            user: user.into(),
            reserve: reserve.into(),
            usage_as_collateral_enabled_on_user: false,
            scaled_a_token_balance: U256::ZERO,
            scaled_variable_debt: U256::ZERO,
            current_a_token_balance: U256::ZERO,
            current_variable_debt: U256::ZERO,
            current_total_debt: U256::ZERO,
            variable_borrow_index: U256::ZERO,
            last_update_timestamp: 0,
            liquidity_rate: U256::ZERO,
            stable_debt: schema.stable_debt.then(UserReserveStableDebt::default),
            incentives: schema.incentives.then(UserReserveIncentives::default),
        }
    }

    /// Returns the principal stable debt, if stable debt is tracked.
    #[must_use]
    pub fn principal_stable_debt(&self) -> Option<U256> {
        self.stable_debt
            .as_ref()
            .map(|stable| stable.principal_stable_debt)
    }
}

impl Display for UserReserve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "UserReserve(id={}, user={}, reserve={})",
            self.id, self.user, self.reserve
        )
    }
}
