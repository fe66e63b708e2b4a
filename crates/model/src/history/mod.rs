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

//! Append-only history records.
//!
//! Action records capture one user-facing event each and are keyed by
//! [`history_entity_id`](crate::identifiers::history_entity_id). Reserve snapshots capture the
//! state of a reserve right after a rate update or a configuration change. None of these
//! records is mutated after it has been written.

pub mod actions;
pub mod reserve_configuration;
pub mod reserve_params;

// Re-exports
pub use actions::{
    Borrow, Deposit, FlashLoan, LiquidationCall, Repay, UsageAsCollateral, Withdraw,
};
pub use reserve_configuration::ReserveConfigurationHistoryItem;
pub use reserve_params::{ReserveParamsHistoryItem, ReserveParamsStableDebt};
