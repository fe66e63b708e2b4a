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

//! Closed enumerations decoded from raw event integers.

use std::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{LendingError, LendingResult};

fn raw_to_u64(raw: U256) -> Option<u64> {
    u64::try_from(raw).ok()
}

/// The interest rate mode of a borrow position.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum BorrowRateMode {
    /// No debt.
    None,
    /// Stable rate debt.
    Stable,
    /// Variable rate debt.
    Variable,
}

impl BorrowRateMode {
    /// Decodes a raw on-chain borrow rate mode (0, 1 or 2).
    ///
    /// # Errors
    ///
    /// Returns [`LendingError::InvalidBorrowMode`] for any other value.
    pub fn from_raw(raw: U256) -> LendingResult<Self> {
        match raw_to_u64(raw) {
            Some(0) => Ok(Self::None),
            Some(1) => Ok(Self::Stable),
            Some(2) => Ok(Self::Variable),
            _ => Err(LendingError::InvalidBorrowMode(raw.to_string())),
        }
    }

    /// Returns the raw on-chain value of the mode.
    #[must_use]
    pub fn as_raw(&self) -> U256 {
        match self {
            Self::None => U256::ZERO,
            Self::Stable => U256::from(1u8),
            Self::Variable => U256::from(2u8),
        }
    }

    /// Parses the canonical name of a mode (`"None"`, `"Stable"`, `"Variable"`).
    ///
    /// # Errors
    ///
    /// Returns [`LendingError::InvalidBorrowMode`] for any other name.
    pub fn from_name(name: &str) -> LendingResult<Self> {
        Self::from_str(name).map_err(|_| LendingError::InvalidBorrowMode(name.to_string()))
    }
}

/// The pricing type of an oracle asset.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum PriceOracleAssetType {
    /// Priced directly by a single source.
    #[default]
    Simple,
    /// Priced from other assets.
    Composite,
}

impl PriceOracleAssetType {
    /// Decodes a raw oracle asset type (1 or 2).
    ///
    /// # Errors
    ///
    /// Returns [`LendingError::InvalidOracleAssetType`] for any other value.
    pub fn from_raw(raw: U256) -> LendingResult<Self> {
        match raw_to_u64(raw) {
            Some(1) => Ok(Self::Simple),
            Some(2) => Ok(Self::Composite),
            _ => Err(LendingError::InvalidOracleAssetType(raw.to_string())),
        }
    }
}

/// The platform of an oracle asset price source.
///
/// `Error` marks sources of a platform that is not tracked.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum PriceOracleAssetPlatform {
    /// A plain price feed.
    #[default]
    Simple,
    /// A Uniswap pool token.
    Uniswap,
    /// A Balancer pool token.
    Balancer,
    /// A Gelato position.
    Gelato,
    /// An untracked platform.
    Error,
}

impl PriceOracleAssetPlatform {
    /// Decodes a raw oracle platform (1 to 4).
    ///
    /// # Errors
    ///
    /// Returns [`LendingError::InvalidOraclePlatform`] for any other value.
    pub fn try_from_raw(raw: U256) -> LendingResult<Self> {
        match raw_to_u64(raw) {
            Some(1) => Ok(Self::Simple),
            Some(2) => Ok(Self::Uniswap),
            Some(3) => Ok(Self::Balancer),
            Some(4) => Ok(Self::Gelato),
            _ => Err(LendingError::InvalidOraclePlatform(raw.to_string())),
        }
    }

    /// Decodes a raw oracle platform, mapping untracked values to [`Self::Error`].
    #[must_use]
    pub fn from_raw_lenient(raw: U256) -> Self {
        Self::try_from_raw(raw).unwrap_or_else(|e| {
            tracing::warn!("{e}, source recorded as untracked");
            Self::Error
        })
    }
}

/// The role of a token contract attached to a reserve.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum TokenWrapperKind {
    /// Interest-bearing supply token.
    Supply,
    /// Variable rate debt token.
    VariableDebt,
    /// Stable rate debt token.
    StableDebt,
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
    #[case(0, BorrowRateMode::None, "None")]
    #[case(1, BorrowRateMode::Stable, "Stable")]
    #[case(2, BorrowRateMode::Variable, "Variable")]
    fn test_borrow_rate_mode_round_trip(
        #[case] raw: u64,
        #[case] expected: BorrowRateMode,
        #[case] name: &str,
    ) {
        let mode = BorrowRateMode::from_raw(U256::from(raw)).unwrap();
        assert_eq!(mode, expected);
        assert_eq!(mode.to_string(), name);
        assert_eq!(BorrowRateMode::from_name(name).unwrap(), mode);
        assert_eq!(mode.as_raw(), U256::from(raw));
    }

    #[rstest]
    #[case(U256::from(3))]
    #[case(U256::from(u64::MAX))]
    #[case(U256::MAX)]
    fn test_borrow_rate_mode_invalid(#[case] raw: U256) {
        assert!(matches!(
            BorrowRateMode::from_raw(raw),
            Err(LendingError::InvalidBorrowMode(_))
        ));
    }

    #[rstest]
    fn test_borrow_rate_mode_invalid_name() {
        assert_eq!(
            BorrowRateMode::from_name("Fixed"),
            Err(LendingError::InvalidBorrowMode("Fixed".to_string()))
        );
    }

    #[rstest]
    fn test_borrow_rate_mode_all_variants_round_trip() {
        for mode in BorrowRateMode::iter() {
            assert_eq!(BorrowRateMode::from_raw(mode.as_raw()).unwrap(), mode);
        }
    }

    #[rstest]
    fn test_oracle_asset_type() {
        assert_eq!(
            PriceOracleAssetType::from_raw(U256::from(1)).unwrap(),
            PriceOracleAssetType::Simple
        );
        assert_eq!(
            PriceOracleAssetType::from_raw(U256::from(2)).unwrap(),
            PriceOracleAssetType::Composite
        );
        assert_eq!(
            PriceOracleAssetType::from_raw(U256::ZERO),
            Err(LendingError::InvalidOracleAssetType("0".to_string()))
        );
    }

    #[rstest]
    #[case(1, PriceOracleAssetPlatform::Simple)]
    #[case(2, PriceOracleAssetPlatform::Uniswap)]
    #[case(3, PriceOracleAssetPlatform::Balancer)]
    #[case(4, PriceOracleAssetPlatform::Gelato)]
    fn test_oracle_platform(#[case] raw: u64, #[case] expected: PriceOracleAssetPlatform) {
        assert_eq!(
            PriceOracleAssetPlatform::try_from_raw(U256::from(raw)).unwrap(),
            expected
        );
        assert_eq!(
            PriceOracleAssetPlatform::from_raw_lenient(U256::from(raw)),
            expected
        );
    }

    #[rstest]
    fn test_oracle_errors_keep_wide_raw_values() {
        let raw = U256::from(u64::MAX) + U256::from(1);
        assert_eq!(
            PriceOracleAssetType::from_raw(raw),
            Err(LendingError::InvalidOracleAssetType(
                "18446744073709551616".to_string()
            ))
        );
        assert_eq!(
            PriceOracleAssetPlatform::try_from_raw(raw),
            Err(LendingError::InvalidOraclePlatform(
                "18446744073709551616".to_string()
            ))
        );
        assert_eq!(
            BorrowRateMode::from_raw(raw),
            Err(LendingError::InvalidBorrowMode("18446744073709551616".to_string()))
        );
    }

    #[rstest]
    fn test_oracle_platform_untracked() {
        assert_eq!(
            PriceOracleAssetPlatform::try_from_raw(U256::from(9)),
            Err(LendingError::InvalidOraclePlatform("9".to_string()))
        );
        assert_eq!(
            PriceOracleAssetPlatform::from_raw_lenient(U256::from(9)),
            PriceOracleAssetPlatform::Error
        );
    }
}
