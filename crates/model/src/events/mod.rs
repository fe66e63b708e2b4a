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

//! Typed lending-pool event records.
//!
//! These are the records handed over by the decoding layer, one per emitted contract log,
//! in canonical (block, transaction index, log index) order.

use std::fmt::Display;

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

pub mod configurator;
pub mod oracle;
pub mod pool;

// Re-exports
pub use configurator::{
    BorrowingDisabledOnReserveEvent, BorrowingEnabledOnReserveEvent,
    CollateralConfigurationChangedEvent, ReserveFactorChangedEvent, ReserveInitializedEvent,
    ReserveInterestRateStrategyChangedEvent, ReserveStatusChangedEvent, ReserveStatusChange,
};
pub use oracle::AssetSourceUpdatedEvent;
pub use pool::{
    BorrowEvent, DepositEvent, FlashLoanEvent, LiquidationCallEvent, PausedEvent, RepayEvent,
    ReserveDataUpdatedEvent, ReserveUsedAsCollateralEvent, UnpausedEvent, WithdrawEvent,
};

/// The on-chain coordinates shared by every decoded event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventMeta {
    /// The address of the contract which emitted the event.
    pub contract: Address,
    /// The block number in which the event was included.
    pub block_number: u64,
    /// The block timestamp (UNIX seconds).
    pub block_timestamp: u64,
    /// The hash of the transaction containing the event.
    pub transaction_hash: B256,
    /// The position of the transaction within the block.
    pub transaction_index: u32,
    /// The position of the event log within the block.
    pub log_index: u32,
    /// The position of the event log within the transaction.
    pub transaction_log_index: u32,
}

impl EventMeta {
    /// Creates a new [`EventMeta`] instance.
    #[must_use]
    pub const fn new(
        contract: Address,
        block_number: u64,
        block_timestamp: u64,
        transaction_hash: B256,
        transaction_index: u32,
        log_index: u32,
        transaction_log_index: u32,
    ) -> Self {
        Self {
            contract,
            block_number,
            block_timestamp,
            transaction_hash,
            transaction_index,
            log_index,
            transaction_log_index,
        }
    }

    /// Returns the canonical ordering position of the event.
    #[must_use]
    pub const fn position(&self) -> EventPosition {
        EventPosition::new(self.block_number, self.transaction_index, self.log_index)
    }
}

/// The canonical position of an event in the chain.
///
/// Positions compare numerically by block number, then transaction index, then log index,
/// which is the order events are delivered in. History record ids are *not* ordered this way
/// when compared as strings, so chronology must always be decided on positions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct EventPosition {
    /// The block number.
    pub block_number: u64,
    /// The transaction index within the block.
    pub transaction_index: u32,
    /// The log index within the block.
    pub log_index: u32,
}

impl EventPosition {
    /// Creates a new [`EventPosition`] instance.
    #[must_use]
    pub const fn new(block_number: u64, transaction_index: u32, log_index: u32) -> Self {
        Self {
            block_number,
            transaction_index,
            log_index,
        }
    }
}

impl Display for EventPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EventPosition(block={}, tx={}, log={})",
            self.block_number, self.transaction_index, self.log_index
        )
    }
}

/// Represents every event kind the projection understands.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, strum::IntoStaticStr)]
#[serde(tag = "event")]
pub enum LendingPoolEvent {
    /// Liquidity supplied to a reserve.
    Deposit(DepositEvent),
    /// Liquidity redeemed from a reserve.
    Withdraw(WithdrawEvent),
    /// Debt opened against a reserve.
    Borrow(BorrowEvent),
    /// Debt repaid to a reserve.
    Repay(RepayEvent),
    /// A position liquidated by a third party.
    LiquidationCall(LiquidationCallEvent),
    /// A reserve enabled as collateral for a user.
    ReserveUsedAsCollateralEnabled(ReserveUsedAsCollateralEvent),
    /// A reserve disabled as collateral for a user.
    ReserveUsedAsCollateralDisabled(ReserveUsedAsCollateralEvent),
    /// The pool paused.
    Paused(PausedEvent),
    /// The pool unpaused.
    Unpaused(UnpausedEvent),
    /// Periodic reserve rate and index snapshot.
    ReserveDataUpdated(ReserveDataUpdatedEvent),
    /// A flash loan executed against a reserve.
    FlashLoan(FlashLoanEvent),
    /// A reserve listed by the configurator.
    ReserveInitialized(ReserveInitializedEvent),
    /// Collateral risk parameters changed.
    CollateralConfigurationChanged(CollateralConfigurationChangedEvent),
    /// Borrowing enabled on a reserve.
    BorrowingEnabledOnReserve(BorrowingEnabledOnReserveEvent),
    /// Borrowing disabled on a reserve.
    BorrowingDisabledOnReserve(BorrowingDisabledOnReserveEvent),
    /// Reserve activated, deactivated, frozen or unfrozen.
    ReserveStatusChanged(ReserveStatusChangedEvent),
    /// Interest rate strategy replaced.
    ReserveInterestRateStrategyChanged(ReserveInterestRateStrategyChangedEvent),
    /// Reserve factor changed.
    ReserveFactorChanged(ReserveFactorChangedEvent),
    /// Oracle source configured for an asset.
    AssetSourceUpdated(AssetSourceUpdatedEvent),
}

impl LendingPoolEvent {
    /// Returns the on-chain coordinates of the event.
    #[must_use]
    pub fn meta(&self) -> &EventMeta {
        match self {
            Self::Deposit(e) => &e.meta,
            Self::Withdraw(e) => &e.meta,
            Self::Borrow(e) => &e.meta,
            Self::Repay(e) => &e.meta,
            Self::LiquidationCall(e) => &e.meta,
            Self::ReserveUsedAsCollateralEnabled(e) | Self::ReserveUsedAsCollateralDisabled(e) => {
                &e.meta
            }
            Self::Paused(e) => &e.meta,
            Self::Unpaused(e) => &e.meta,
            Self::ReserveDataUpdated(e) => &e.meta,
            Self::FlashLoan(e) => &e.meta,
            Self::ReserveInitialized(e) => &e.meta,
            Self::CollateralConfigurationChanged(e) => &e.meta,
            Self::BorrowingEnabledOnReserve(e) => &e.meta,
            Self::BorrowingDisabledOnReserve(e) => &e.meta,
            Self::ReserveStatusChanged(e) => &e.meta,
            Self::ReserveInterestRateStrategyChanged(e) => &e.meta,
            Self::ReserveFactorChanged(e) => &e.meta,
            Self::AssetSourceUpdated(e) => &e.meta,
        }
    }

    /// Returns the canonical position of the event.
    #[must_use]
    pub fn position(&self) -> EventPosition {
        self.meta().position()
    }

    /// Returns the event kind name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl Display for LendingPoolEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let meta = self.meta();
        write!(
            f,
            "{}(contract={}, block={}, tx={}, log={})",
            self.name(),
            meta.contract,
            meta.block_number,
            meta.transaction_index,
            meta.log_index
        )
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::stubs::{event_meta, stub_deposit_event};

    #[rstest]
    fn test_position_orders_numerically() {
        let earlier = EventPosition::new(9, 5, 40);
        let later = EventPosition::new(10, 0, 0);
        assert!(earlier < later);
        assert!(EventPosition::new(10, 1, 2) < EventPosition::new(10, 1, 3));
        assert!(EventPosition::new(10, 1, 9) < EventPosition::new(10, 2, 0));
    }

    #[rstest]
    fn test_meta_position(event_meta: EventMeta) {
        let position = event_meta.position();
        assert_eq!(position.block_number, event_meta.block_number);
        assert_eq!(position.transaction_index, event_meta.transaction_index);
        assert_eq!(position.log_index, event_meta.log_index);
    }

    #[rstest]
    fn test_event_name_and_display() {
        let event = LendingPoolEvent::Deposit(stub_deposit_event());
        assert_eq!(event.name(), "Deposit");
        assert!(event.to_string().starts_with("Deposit(contract="));
    }

    #[rstest]
    fn test_serde_tagged_roundtrip() {
        let event = LendingPoolEvent::Deposit(stub_deposit_event());
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"Deposit\""));
        let decoded: LendingPoolEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);
    }
}
