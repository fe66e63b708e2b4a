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

//! Events emitted by the lending pool contract itself.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::events::EventMeta;

/// Liquidity supplied to a reserve by `user` on behalf of `on_behalf_of`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub reserve: Address,
    /// The address that initiated the deposit.
    pub user: Address,
    /// The beneficiary of the deposit.
    pub on_behalf_of: Address,
    /// The raw amount deposited.
    pub amount: U256,
    /// The referral code attached to the deposit.
    pub referral: u16,
}

/// Liquidity redeemed from a reserve by `user` and sent to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub reserve: Address,
    /// The owner of the redeemed position.
    pub user: Address,
    /// The recipient of the redeemed liquidity.
    pub to: Address,
    /// The raw amount withdrawn.
    pub amount: U256,
}

/// Debt opened against a reserve by `user` on behalf of `on_behalf_of`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub reserve: Address,
    /// The address that initiated the borrow.
    pub user: Address,
    /// The account that receives the debt.
    pub on_behalf_of: Address,
    /// The raw amount borrowed.
    pub amount: U256,
    /// The raw borrow rate mode (0 = none, 1 = stable, 2 = variable).
    pub borrow_rate_mode: U256,
    /// The borrow rate at the time of borrowing (ray).
    pub borrow_rate: U256,
    /// The referral code attached to the borrow.
    pub referral: u16,
}

/// Debt of `user` repaid by `repayer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepayEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub reserve: Address,
    /// The account whose debt is repaid.
    pub user: Address,
    /// The address that paid.
    pub repayer: Address,
    /// The raw amount repaid.
    pub amount: U256,
}

/// A liquidation of `user`, seizing collateral to cover debt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationCallEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the collateral reserve.
    pub collateral_asset: Address,
    /// The underlying asset of the debt reserve.
    pub debt_asset: Address,
    /// The liquidated account.
    pub user: Address,
    /// The raw amount of debt covered by the liquidator.
    pub debt_to_cover: U256,
    /// The raw amount of collateral seized.
    pub liquidated_collateral_amount: U256,
    /// The liquidator.
    pub liquidator: Address,
    /// Whether the liquidator received the supply token instead of the underlying.
    pub receive_a_token: bool,
}

/// A reserve enabled or disabled as collateral for `user`.
///
/// The direction is carried by the [`LendingPoolEvent`](crate::events::LendingPoolEvent)
/// variant, the payload is identical for both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveUsedAsCollateralEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub reserve: Address,
    /// The account changing its collateral usage.
    pub user: Address,
}

/// The pool was paused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PausedEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
}

/// The pool was unpaused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpausedEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
}

/// Rates and cumulative indices of a reserve after its state was updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveDataUpdatedEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The underlying asset of the reserve.
    pub reserve: Address,
    /// The new liquidity rate (ray).
    pub liquidity_rate: U256,
    /// The new stable borrow rate (ray).
    pub stable_borrow_rate: U256,
    /// The new variable borrow rate (ray).
    pub variable_borrow_rate: U256,
    /// The new cumulative liquidity index (ray).
    pub liquidity_index: U256,
    /// The new cumulative variable borrow index (ray).
    pub variable_borrow_index: U256,
}

/// A flash loan executed against a reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashLoanEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The receiver contract of the loan.
    pub target: Address,
    /// The address that initiated the loan.
    pub initiator: Address,
    /// The underlying asset of the reserve.
    pub asset: Address,
    /// The raw amount lent.
    pub amount: U256,
    /// The raw premium paid.
    pub premium: U256,
    /// The referral code attached to the loan.
    pub referral_code: u16,
}
