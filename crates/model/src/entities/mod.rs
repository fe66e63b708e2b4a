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

//! Keyed entity records of the projected graph.
//!
//! Every record is addressed by an [`EntityKind`] and a string id derived in
//! [`crate::identifiers`]. Records reference each other by id only, the graph is never held
//! in memory as object links.
//!
//! [`Entity`] is the storage form of any record, [`Record`] converts between it and the
//! concrete record types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter, IntoStaticStr};

use crate::history::{
    Borrow, Deposit, FlashLoan, LiquidationCall, Repay, ReserveConfigurationHistoryItem,
    ReserveParamsHistoryItem, UsageAsCollateral, Withdraw,
};

pub mod oracle;
pub mod pool;
pub mod reserve;
pub mod token;
pub mod user;
pub mod user_reserve;

// Re-exports
pub use oracle::{PriceOracle, PriceOracleAsset};
pub use pool::{ContractToPoolMapping, Pool, Protocol};
pub use reserve::{Reserve, ReserveFlashLoans, ReserveIncentives, ReserveStableDebt};
pub use token::TokenWrapper;
pub use user::{Referrer, User};
pub use user_reserve::{UserReserve, UserReserveIncentives, UserReserveStableDebt};

/// The kind of a stored record, the first half of its storage key.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    StrumDisplay,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum EntityKind {
    /// The protocol singleton.
    Protocol,
    /// A lending pool deployment.
    Pool,
    /// A contract to pool routing entry.
    ContractToPoolMapping,
    /// An asset market within a pool.
    Reserve,
    /// An external account.
    User,
    /// A position of a user in a reserve.
    UserReserve,
    /// A supply or debt token contract.
    TokenWrapper,
    /// The price oracle singleton.
    PriceOracle,
    /// Oracle metadata of an asset.
    PriceOracleAsset,
    /// A referral code.
    Referrer,
    /// A deposit action.
    Deposit,
    /// A withdraw action.
    Withdraw,
    /// A borrow action.
    Borrow,
    /// A repay action.
    Repay,
    /// A liquidation action.
    LiquidationCall,
    /// A collateral usage toggle.
    UsageAsCollateral,
    /// A flash loan action.
    FlashLoan,
    /// A reserve parameters snapshot.
    ReserveParamsHistoryItem,
    /// A reserve configuration snapshot.
    ReserveConfigurationHistoryItem,
}

impl EntityKind {
    /// Returns whether records of this kind are append-only history.
    #[must_use]
    pub const fn is_history(&self) -> bool {
        matches!(
            self,
            Self::Deposit
                | Self::Withdraw
                | Self::Borrow
                | Self::Repay
                | Self::LiquidationCall
                | Self::UsageAsCollateral
                | Self::FlashLoan
                | Self::ReserveParamsHistoryItem
                | Self::ReserveConfigurationHistoryItem
        )
    }

    /// Returns the static name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// A stored record of any kind.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Entity {
    /// The protocol singleton.
    Protocol(Protocol),
    /// A lending pool deployment.
    Pool(Pool),
    /// A contract to pool routing entry.
    ContractToPoolMapping(ContractToPoolMapping),
    /// An asset market within a pool.
    Reserve(Reserve),
    /// An external account.
    User(User),
    /// A position of a user in a reserve.
    UserReserve(UserReserve),
    /// A supply or debt token contract.
    TokenWrapper(TokenWrapper),
    /// The price oracle singleton.
    PriceOracle(PriceOracle),
    /// Oracle metadata of an asset.
    PriceOracleAsset(PriceOracleAsset),
    /// A referral code.
    Referrer(Referrer),
    /// A deposit action.
    Deposit(Deposit),
    /// A withdraw action.
    Withdraw(Withdraw),
    /// A borrow action.
    Borrow(Borrow),
    /// A repay action.
    Repay(Repay),
    /// A liquidation action.
    LiquidationCall(LiquidationCall),
    /// A collateral usage toggle.
    UsageAsCollateral(UsageAsCollateral),
    /// A flash loan action.
    FlashLoan(FlashLoan),
    /// A reserve parameters snapshot.
    ReserveParamsHistoryItem(ReserveParamsHistoryItem),
    /// A reserve configuration snapshot.
    ReserveConfigurationHistoryItem(ReserveConfigurationHistoryItem),
}

/// A concrete record type which can be stored as an [`Entity`].
pub trait Record: Sized {
    /// The kind under which records of this type are stored.
    const KIND: EntityKind;

    /// Returns the id of the record.
    fn id(&self) -> &str;

    /// Wraps the record into its storage form.
    fn into_entity(self) -> Entity;

    /// Unwraps a stored entity, returning `None` if it is of another kind.
    fn from_entity(entity: Entity) -> Option<Self>;
}

macro_rules! impl_record {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl Record for $ty {
                const KIND: EntityKind = EntityKind::$ty;

                fn id(&self) -> &str {
                    &self.id
                }

                fn into_entity(self) -> Entity {
                    Entity::$ty(self)
                }

                fn from_entity(entity: Entity) -> Option<Self> {
                    match entity {
                        Entity::$ty(record) => Some(record),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Entity {
                fn from(record: $ty) -> Self {
                    Entity::$ty(record)
                }
            }
        )+

        impl Entity {
            /// Returns the kind of the stored record.
            #[must_use]
            pub const fn kind(&self) -> EntityKind {
                match self {
                    $(Self::$ty(_) => EntityKind::$ty,)+
                }
            }

            /// Returns the id of the stored record.
            #[must_use]
            pub fn id(&self) -> &str {
                match self {
                    $(Self::$ty(record) => &record.id,)+
                }
            }
        }
    };
}

impl_record!(
    Protocol,
    Pool,
    ContractToPoolMapping,
    Reserve,
    User,
    UserReserve,
    TokenWrapper,
    PriceOracle,
    PriceOracleAsset,
    Referrer,
    Deposit,
    Withdraw,
    Borrow,
    Repay,
    LiquidationCall,
    UsageAsCollateral,
    FlashLoan,
    ReserveParamsHistoryItem,
    ReserveConfigurationHistoryItem,
);

impl Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(id={})", self.kind(), self.id())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    fn test_record_entity_conversion() {
        let user = User::new("0xaa");
        let entity = user.clone().into_entity();
        assert_eq!(entity.kind(), EntityKind::User);
        assert_eq!(entity.id(), "0xaa");
        assert_eq!(entity.to_string(), "User(id=0xaa)");
        assert_eq!(User::from_entity(entity.clone()), Some(user));
        assert_eq!(Referrer::from_entity(entity), None);
    }

    #[rstest]
    fn test_history_kinds() {
        let history: Vec<EntityKind> = EntityKind::iter().filter(EntityKind::is_history).collect();
        assert_eq!(history.len(), 9);
        assert!(!EntityKind::Reserve.is_history());
        assert!(EntityKind::ReserveParamsHistoryItem.is_history());
    }

    #[rstest]
    fn test_entity_serde_is_tagged() {
        let entity = Entity::from(Referrer::new("7"));
        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"{"kind":"Referrer","id":"7"}"#);
    }
}
