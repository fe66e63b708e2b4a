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

//! Events emitted by the pool configurator contract.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::events::EventMeta;

/// A reserve listed in the pool together with its token contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveInitializedEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub asset: Address,
    /// The supply (interest-bearing) token.
    pub a_token: Address,
    /// The stable debt token.
    pub stable_debt_token: Address,
    /// The variable debt token.
    pub variable_debt_token: Address,
    /// The interest rate strategy contract.
    pub interest_rate_strategy_address: Address,
}

/// Collateral risk parameters of a reserve changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralConfigurationChangedEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub asset: Address,
    /// Loan to value (basis points).
    pub ltv: U256,
    /// Liquidation threshold (basis points).
    pub liquidation_threshold: U256,
    /// Liquidation bonus (basis points).
    pub liquidation_bonus: U256,
}

/// Borrowing enabled on a reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowingEnabledOnReserveEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub asset: Address,
    /// Whether stable rate borrowing was enabled as well.
    pub stable_rate_enabled: bool,
}

/// Borrowing disabled on a reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowingDisabledOnReserveEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub asset: Address,
}

/// The kind of status transition carried by a [`ReserveStatusChangedEvent`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum ReserveStatusChange {
    /// `ReserveActivated`.
    Activated,
    /// `ReserveDeactivated`.
    Deactivated,
    /// `ReserveFrozen`.
    Frozen,
    /// `ReserveUnfrozen`.
    Unfrozen,
}

/// A reserve was activated, deactivated, frozen or unfrozen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveStatusChangedEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub asset: Address,
    /// The transition applied.
    pub change: ReserveStatusChange,
}

/// The interest rate strategy of a reserve was replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveInterestRateStrategyChangedEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub asset: Address,
    /// The new strategy contract.
    pub strategy: Address,
}

/// The reserve factor of a reserve changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveFactorChangedEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub asset: Address,
    /// The new reserve factor (basis points).
    pub factor: U256,
}
