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

//! User and referrer records.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// An external account interacting with the pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The lowercase hex address of the account.
    pub id: String,
    /// Number of reserves the account currently borrows from.
    pub borrowed_reserves_count: u32,
    /// Rewards accrued but not yet claimed.
    pub unclaimed_rewards: U256,
    /// Timestamp of the last incentives update.
    pub incentives_last_updated: u64,
    /// Rewards accrued over the account lifetime.
    pub lifetime_rewards: U256,
}

impl User {
    /// Creates a new [`User`] with zeroed counters.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            borrowed_reserves_count: 0,
            unclaimed_rewards: U256::ZERO,
            incentives_last_updated: 0,
            lifetime_rewards: U256::ZERO,
        }
    }
}

/// A referral code seen on deposits, borrows or flash loans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referrer {
    /// The decimal referral code.
    pub id: String,
}

impl Referrer {
    /// Creates a new [`Referrer`] instance.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
