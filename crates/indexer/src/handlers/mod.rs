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

//! One handler function per lending pool event kind.
//!
//! Every handler validates its hard dependencies (contract mapping, pool record, decoded enum
//! values) before its first write. Handlers never commit: the caller wraps them in a
//! [`StoreTransaction`](crate::store::StoreTransaction).

use nautilus_lending_model::{LendingPoolEvent, LendingResult};

use crate::{registry::EntityRegistry, store::EntityStore};

pub mod admin;
pub mod configurator;
pub mod oracle;
pub mod pool;
pub mod reserve;

/// Applies `event` to the entity state behind `registry`.
///
/// # Errors
///
/// Returns an error if the handler for the event kind fails.
pub fn handle_event<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &LendingPoolEvent,
) -> LendingResult<()> {
    match event {
        LendingPoolEvent::Deposit(e) => pool::handle_deposit(registry, e),
        LendingPoolEvent::Withdraw(e) => pool::handle_withdraw(registry, e),
        LendingPoolEvent::Borrow(e) => pool::handle_borrow(registry, e),
        LendingPoolEvent::Repay(e) => pool::handle_repay(registry, e),
        LendingPoolEvent::LiquidationCall(e) => pool::handle_liquidation_call(registry, e),
        LendingPoolEvent::ReserveUsedAsCollateralEnabled(e) => {
            pool::handle_usage_as_collateral(registry, e, true)
        }
        LendingPoolEvent::ReserveUsedAsCollateralDisabled(e) => {
            pool::handle_usage_as_collateral(registry, e, false)
        }
        LendingPoolEvent::FlashLoan(e) => pool::handle_flash_loan(registry, e),
        LendingPoolEvent::Paused(e) => admin::handle_paused(registry, e),
        LendingPoolEvent::Unpaused(e) => admin::handle_unpaused(registry, e),
        LendingPoolEvent::ReserveDataUpdated(e) => reserve::handle_reserve_data_updated(registry, e),
        LendingPoolEvent::ReserveInitialized(e) => {
            configurator::handle_reserve_initialized(registry, e)
        }
        LendingPoolEvent::CollateralConfigurationChanged(e) => {
            configurator::handle_collateral_configuration_changed(registry, e)
        }
        LendingPoolEvent::BorrowingEnabledOnReserve(e) => {
            configurator::handle_borrowing_enabled(registry, e)
        }
        LendingPoolEvent::BorrowingDisabledOnReserve(e) => {
            configurator::handle_borrowing_disabled(registry, e)
        }
        LendingPoolEvent::ReserveStatusChanged(e) => {
            configurator::handle_reserve_status_changed(registry, e)
        }
        LendingPoolEvent::ReserveInterestRateStrategyChanged(e) => {
            configurator::handle_interest_rate_strategy_changed(registry, e)
        }
        LendingPoolEvent::ReserveFactorChanged(e) => {
            configurator::handle_reserve_factor_changed(registry, e)
        }
        LendingPoolEvent::AssetSourceUpdated(e) => oracle::handle_asset_source_updated(registry, e),
    }
}
