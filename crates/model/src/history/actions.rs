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

//! Immutable audit records of user actions, one per event.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::enums::BorrowRateMode;

/// Liquidity supplied to a reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    /// The history entity id of the event.
    pub id: String,
    /// The pool id.
    pub pool: String,
    /// The beneficiary user id.
    pub user: String,
    /// The initiating user id.
    pub caller: String,
    /// The position id of the beneficiary.
    pub user_reserve: String,
    /// The reserve id.
    pub reserve: String,
    /// The raw amount deposited.
    pub amount: U256,
    /// The referrer id, when referrals are linked.
    pub referrer: Option<String>,
    /// The block timestamp.
    pub timestamp: u64,
}

/// Liquidity redeemed from a reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdraw {
    /// The history entity id of the event.
    pub id: String,
    /// The pool id.
    pub pool: String,
    /// The owner user id.
    pub user: String,
    /// The recipient user id.
    pub to: String,
    /// The position id of the owner.
    pub user_reserve: String,
    /// The reserve id.
    pub reserve: String,
    /// The raw amount withdrawn.
    pub amount: U256,
    /// The block timestamp.
    pub timestamp: u64,
}

/// Debt opened against a reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrow {
    /// The history entity id of the event.
    pub id: String,
    /// The pool id.
    pub pool: String,
    /// The debtor user id.
    pub user: String,
    /// The initiating user id.
    pub caller: String,
    /// The position id of the debtor.
    pub user_reserve: String,
    /// The reserve id.
    pub reserve: String,
    /// The raw amount borrowed.
    pub amount: U256,
    /// The borrow rate at the time of borrowing.
    pub borrow_rate: U256,
    /// The rate mode of the debt.
    pub borrow_rate_mode: BorrowRateMode,
    /// Scaled variable debt of the position before this borrow.
    pub variable_token_debt: U256,
    /// Principal stable debt of the position before this borrow, when tracked.
    pub stable_token_debt: Option<U256>,
    /// The referrer id, when referrals are linked.
    pub referrer: Option<String>,
    /// The block timestamp.
    pub timestamp: u64,
}

/// Debt repaid to a reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repay {
    /// The history entity id of the event.
    pub id: String,
    /// The pool id.
    pub pool: String,
    /// The debtor user id.
    pub user: String,
    /// The paying user id.
    pub repayer: String,
    /// The position id of the debtor.
    pub user_reserve: String,
    /// The reserve id.
    pub reserve: String,
    /// The raw amount repaid.
    pub amount: U256,
    /// The block timestamp.
    pub timestamp: u64,
}

/// A liquidation, recording both the collateral and the debt leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationCall {
    /// The history entity id of the event.
    pub id: String,
    /// The pool id.
    pub pool: String,
    /// The liquidated user id.
    pub user: String,
    /// The collateral reserve id.
    pub collateral_reserve: String,
    /// The collateral position id.
    pub collateral_user_reserve: String,
    /// The raw collateral amount seized.
    pub collateral_amount: U256,
    /// The debt reserve id.
    pub principal_reserve: String,
    /// The debt position id.
    pub principal_user_reserve: String,
    /// The raw debt amount covered.
    pub principal_amount: U256,
    /// The liquidator.
    pub liquidator: Address,
    /// The block timestamp.
    pub timestamp: u64,
}

/// A collateral usage transition of a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageAsCollateral {
    /// The history entity id of the event.
    pub id: String,
    /// The pool id.
    pub pool: String,
    /// The user id.
    pub user: String,
    /// The position id.
    pub user_reserve: String,
    /// The reserve id.
    pub reserve: String,
    /// The flag before the event.
    pub from_state: bool,
    /// The flag after the event.
    pub to_state: bool,
    /// The block timestamp.
    pub timestamp: u64,
}

/// A flash loan executed against a reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashLoan {
    /// The history entity id of the event.
    pub id: String,
    /// The pool id.
    pub pool: String,
    /// The reserve id.
    pub reserve: String,
    /// The receiver contract.
    pub target: Address,
    /// The initiating user id.
    pub initiator: String,
    /// The raw amount lent.
    pub amount: U256,
    /// The raw premium paid.
    pub total_fee: U256,
    /// The premium share paid to liquidity providers.
    pub lp_fee: U256,
    /// The premium share paid to the protocol.
    pub protocol_fee: U256,
    /// The referrer id, when referrals are linked.
    pub referrer: Option<String>,
    /// The block timestamp.
    pub timestamp: u64,
}
