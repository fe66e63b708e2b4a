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

//! The reserve record, one asset market within a pool.
//!
//! All rates and indices are raw ray values, all amounts raw token units. Sections of
//! optional features are `None` unless the [`SchemaConfig`] enables them.

use std::fmt::Display;

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{LendingError, LendingResult},
    identifiers::address_to_hex,
    math::calculate_growth,
    schema::SchemaConfig,
};

pub(crate) fn checked_add(field: &str, current: U256, delta: U256) -> LendingResult<U256> {
    current
        .checked_add(delta)
        .ok_or_else(|| LendingError::ArithmeticOverflow(format!("{field} + {delta}")))
}

/// Stable rate debt state of a reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveStableDebt {
    /// Whether stable rate borrowing is enabled.
    pub stable_borrow_rate_enabled: bool,
    /// Stable rate slope below optimal utilisation.
    pub stable_rate_slope1: U256,
    /// Stable rate slope above optimal utilisation.
    pub stable_rate_slope2: U256,
    /// Current stable borrow rate.
    pub stable_borrow_rate: U256,
    /// Average rate across open stable positions.
    pub average_stable_rate: U256,
    /// The stable debt token id.
    pub s_token: String,
    /// Outstanding stable debt principal.
    pub total_principal_stable_debt: U256,
    /// Stable debt principal ever issued.
    pub lifetime_principal_stable_debt: U256,
    /// Timestamp of the last stable debt update.
    pub stable_debt_last_update_timestamp: u64,
}

impl Default for ReserveStableDebt {
    fn default() -> Self {
        Self {
            stable_borrow_rate_enabled: false,
            stable_rate_slope1: U256::ZERO,
            stable_rate_slope2: U256::ZERO,
            stable_borrow_rate: U256::ZERO,
            average_stable_rate: U256::ZERO,
            s_token: address_to_hex(&Address::ZERO),
            total_principal_stable_debt: U256::ZERO,
            lifetime_principal_stable_debt: U256::ZERO,
            stable_debt_last_update_timestamp: 0,
        }
    }
}

/// Lifetime flash loan accumulators of a reserve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveFlashLoans {
    /// Sum of flash loan amounts.
    pub lifetime_flash_loans: U256,
    /// Sum of flash loan premiums.
    pub lifetime_flash_loan_premium: U256,
    /// Premium share paid to liquidity providers.
    pub lifetime_flash_loan_lp_premium: U256,
    /// Premium share paid to the protocol.
    pub lifetime_flash_loan_protocol_premium: U256,
    /// Portal fees paid to liquidity providers.
    pub lifetime_portal_lp_fee: U256,
    /// Portal fees paid to the protocol.
    pub lifetime_portal_protocol_fee: U256,
}

/// Incentive emission state of a reserve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveIncentives {
    /// Supply token emission per second.
    pub a_emission_per_second: U256,
    /// Variable debt token emission per second.
    pub v_emission_per_second: U256,
    /// Stable debt token emission per second.
    pub s_emission_per_second: U256,
    /// Supply token incentives index.
    pub a_token_incentives_index: U256,
    /// Variable debt token incentives index.
    pub v_token_incentives_index: U256,
    /// Stable debt token incentives index.
    pub s_token_incentives_index: U256,
    /// Timestamp of the last supply incentives update.
    pub a_incentives_last_update_timestamp: u64,
    /// Timestamp of the last variable debt incentives update.
    pub v_incentives_last_update_timestamp: u64,
    /// Timestamp of the last stable debt incentives update.
    pub s_incentives_last_update_timestamp: u64,
}

/// One asset market within a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reserve {
    /// `underlyingAsset ++ poolId`.
    pub id: String,
    /// The underlying asset.
    pub underlying_asset: Address,
    /// The pool id.
    pub pool: String,
    /// Token symbol, empty until known.
    pub symbol: String,
    /// Token name, empty until known.
    pub name: String,
    /// Token decimals, zero until known.
    pub decimals: u8,
    /// Whether the asset can be used as collateral.
    pub usage_as_collateral_enabled: bool,
    /// Whether borrowing is enabled.
    pub borrowing_enabled: bool,
    /// Whether the reserve is active.
    pub is_active: bool,
    /// Whether the reserve is frozen.
    pub is_frozen: bool,
    /// Loan to value (basis points).
    pub base_ltv_as_collateral: U256,
    /// Liquidation threshold (basis points).
    pub reserve_liquidation_threshold: U256,
    /// Liquidation bonus (basis points).
    pub reserve_liquidation_bonus: U256,
    /// The interest rate strategy contract.
    pub reserve_interest_rate_strategy: Address,
    /// Base variable borrow rate.
    pub base_variable_borrow_rate: U256,
    /// Optimal utilisation rate.
    pub optimal_utilisation_rate: U256,
    /// Variable rate slope below optimal utilisation.
    pub variable_rate_slope1: U256,
    /// Variable rate slope above optimal utilisation.
    pub variable_rate_slope2: U256,
    /// Borrowed share of total liquidity.
    pub utilization_rate: Decimal,
    /// Total liquidity.
    pub total_liquidity: U256,
    /// Total supply token balance, grown by accrued interest.
    pub total_a_token_supply: U256,
    /// Liquidity used as collateral.
    pub total_liquidity_as_collateral: U256,
    /// Liquidity available to borrow.
    pub available_liquidity: U256,
    /// Current liquidity rate.
    pub liquidity_rate: U256,
    /// Current variable borrow rate.
    pub variable_borrow_rate: U256,
    /// Cumulative liquidity index.
    pub liquidity_index: U256,
    /// Cumulative variable borrow index.
    pub variable_borrow_index: U256,
    /// Reserve factor (basis points).
    pub reserve_factor: U256,
    /// The supply token id.
    pub a_token: String,
    /// The variable debt token id.
    pub v_token: String,
    /// Outstanding scaled variable debt.
    pub total_scaled_variable_debt: U256,
    /// Outstanding variable debt.
    pub total_current_variable_debt: U256,
    /// Total deposits.
    pub total_deposits: U256,
    /// Scaled variable debt ever issued.
    pub lifetime_scaled_variable_debt: U256,
    /// Variable debt ever issued.
    pub lifetime_current_variable_debt: U256,
    /// Liquidity ever supplied.
    pub lifetime_liquidity: U256,
    /// Amount ever borrowed.
    pub lifetime_borrows: U256,
    /// Amount ever repaid.
    pub lifetime_repayments: U256,
    /// Amount ever withdrawn.
    pub lifetime_withdrawals: U256,
    /// Collateral ever liquidated.
    pub lifetime_liquidated: U256,
    /// Reserve factor ever accrued.
    pub lifetime_reserve_factor_accrued: U256,
    /// Interest ever earned by depositors.
    pub lifetime_depositors_interest_earned: U256,
    /// Timestamp of the last rate update.
    pub last_update_timestamp: u64,
    /// The oracle asset id.
    pub price: String,
    /// Stable debt section.
    pub stable_debt: Option<ReserveStableDebt>,
    /// Flash loan section.
    pub flash_loans: Option<ReserveFlashLoans>,
    /// Incentives section.
    pub incentives: Option<ReserveIncentives>,
}

impl Reserve {
    /// Creates a new [`Reserve`] with zero/false defaults.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        underlying_asset: Address,
        pool: impl Into<String>,
        price: impl Into<String>,
        schema: &SchemaConfig,
    ) -> Self {
        let zero_token = address_to_hex(&Address::ZERO);
        Self {
            id: id.into(),
            underlying_asset,
            pool: pool.into(),
            symbol: String::new(),
            name: String::new(),
            decimals: 0,
            usage_as_collateral_enabled: false,
            borrowing_enabled: false,
            is_active: false,
            is_frozen: false,
            base_ltv_as_collateral: U256::ZERO,
            reserve_liquidation_threshold: U256::ZERO,
            reserve_liquidation_bonus: U256::ZERO,
            reserve_interest_rate_strategy: Address::ZERO,
            base_variable_borrow_rate: U256::ZERO,
            optimal_utilisation_rate: U256::ZERO,
            variable_rate_slope1: U256::ZERO,
            variable_rate_slope2: U256::ZERO,
            utilization_rate: Decimal::ZERO,
            total_liquidity: U256::ZERO,
            total_a_token_supply: U256::ZERO,
            total_liquidity_as_collateral: U256::ZERO,
            available_liquidity: U256::ZERO,
            liquidity_rate: U256::ZERO,
            variable_borrow_rate: U256::ZERO,
            liquidity_index: U256::ZERO,
            variable_borrow_index: U256::ZERO,
            reserve_factor: U256::ZERO,
            a_token: zero_token.clone(),
            v_token: zero_token,
            total_scaled_variable_debt: U256::ZERO,
            total_current_variable_debt: U256::ZERO,
            total_deposits: U256::ZERO,
            lifetime_scaled_variable_debt: U256::ZERO,
            lifetime_current_variable_debt: U256::ZERO,
            lifetime_liquidity: U256::ZERO,
            lifetime_borrows: U256::ZERO,
            lifetime_repayments: U256::ZERO,
            lifetime_withdrawals: U256::ZERO,
            lifetime_liquidated: U256::ZERO,
            lifetime_reserve_factor_accrued: U256::ZERO,
            lifetime_depositors_interest_earned: U256::ZERO,
            last_update_timestamp: 0,
            price: price.into(),
            stable_debt: schema.stable_debt.then(ReserveStableDebt::default),
            flash_loans: schema.flash_loans.then(ReserveFlashLoans::default),
            incentives: schema.incentives.then(ReserveIncentives::default),
        }
    }

    /// Accrues depositors interest at the stored liquidity rate up to `now`.
    ///
    /// The growth is added to `total_a_token_supply` and
    /// `lifetime_depositors_interest_earned`. Nothing accrues unless `now` is strictly after
    /// `last_update_timestamp`. Returns the accrued amount.
    ///
    /// # Errors
    ///
    /// Returns an error if fixed-point arithmetic overflows.
    pub fn accrue_depositors_interest(&mut self, now: u64) -> LendingResult<U256> {
        if now <= self.last_update_timestamp {
            return Ok(U256::ZERO);
        }
        let growth = calculate_growth(
            self.total_a_token_supply,
            self.liquidity_rate,
            self.last_update_timestamp,
            now,
        )?;
        self.total_a_token_supply =
            checked_add("total_a_token_supply", self.total_a_token_supply, growth)?;
        self.lifetime_depositors_interest_earned = checked_add(
            "lifetime_depositors_interest_earned",
            self.lifetime_depositors_interest_earned,
            growth,
        )?;
        Ok(growth)
    }

    /// Adds `amount` of seized collateral to the lifetime liquidated counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter overflows.
    pub fn record_liquidation(&mut self, amount: U256) -> LendingResult<()> {
        self.lifetime_liquidated =
            checked_add("lifetime_liquidated", self.lifetime_liquidated, amount)?;
        Ok(())
    }

    /// Adds a flash loan to the lifetime flash loan accumulators, if tracked.
    ///
    /// The whole premium is attributed to liquidity providers.
    ///
    /// # Errors
    ///
    /// Returns an error if a counter overflows.
    pub fn record_flash_loan(&mut self, amount: U256, premium: U256) -> LendingResult<()> {
        if let Some(flash) = self.flash_loans.as_mut() {
            flash.lifetime_flash_loans =
                checked_add("lifetime_flash_loans", flash.lifetime_flash_loans, amount)?;
            flash.lifetime_flash_loan_premium = checked_add(
                "lifetime_flash_loan_premium",
                flash.lifetime_flash_loan_premium,
                premium,
            )?;
            flash.lifetime_flash_loan_lp_premium = checked_add(
                "lifetime_flash_loan_lp_premium",
                flash.lifetime_flash_loan_lp_premium,
                premium,
            )?;
        }
        Ok(())
    }

    /// Returns whether stable rate borrowing is enabled (false when untracked).
    #[must_use]
    pub fn stable_borrow_rate_enabled(&self) -> bool {
        self.stable_debt
            .as_ref()
            .is_some_and(|stable| stable.stable_borrow_rate_enabled)
    }
}

impl Display for Reserve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reserve(id={}, pool={}, underlying={})",
            self.id, self.pool, self.underlying_asset
        )
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::{
        math::{RAY, SECONDS_PER_YEAR, WAD},
        stubs::reserve,
    };

    #[rstest]
    fn test_new_reserve_defaults(reserve: Reserve) {
        assert_eq!(reserve.total_a_token_supply, U256::ZERO);
        assert_eq!(reserve.lifetime_liquidated, U256::ZERO);
        assert_eq!(reserve.utilization_rate, Decimal::ZERO);
        assert!(!reserve.is_active);
        assert!(!reserve.usage_as_collateral_enabled);
        assert_eq!(reserve.a_token, address_to_hex(&Address::ZERO));
        assert!(reserve.stable_debt.is_some());
        assert!(reserve.flash_loans.is_some());
        assert!(reserve.incentives.is_some());
    }

    #[rstest]
    fn test_reduced_schema_has_no_sections() {
        let reserve = Reserve::new("r", Address::ZERO, "p", "o", &SchemaConfig::reduced());
        assert!(reserve.stable_debt.is_none());
        assert!(reserve.flash_loans.is_none());
        assert!(reserve.incentives.is_none());
        assert!(!reserve.stable_borrow_rate_enabled());
    }

    #[rstest]
    fn test_accrue_depositors_interest(mut reserve: Reserve) {
        reserve.total_a_token_supply = U256::from(1000) * WAD;
        reserve.liquidity_rate = RAY / U256::from(20);
        reserve.last_update_timestamp = 100;

        let growth = reserve
            .accrue_depositors_interest(100 + SECONDS_PER_YEAR)
            .unwrap();

        assert_eq!(growth, U256::from(50) * WAD);
        assert_eq!(reserve.total_a_token_supply, U256::from(1050) * WAD);
        assert_eq!(reserve.lifetime_depositors_interest_earned, U256::from(50) * WAD);
    }

    #[rstest]
    fn test_accrue_skips_stale_timestamp(mut reserve: Reserve) {
        reserve.total_a_token_supply = U256::from(1000) * WAD;
        reserve.liquidity_rate = RAY;
        reserve.last_update_timestamp = 500;

        assert_eq!(reserve.accrue_depositors_interest(500).unwrap(), U256::ZERO);
        assert_eq!(reserve.accrue_depositors_interest(400).unwrap(), U256::ZERO);
        assert_eq!(reserve.total_a_token_supply, U256::from(1000) * WAD);
    }

    #[rstest]
    fn test_record_flash_loan(mut reserve: Reserve) {
        reserve
            .record_flash_loan(U256::from(1_000), U256::from(9))
            .unwrap();
        reserve
            .record_flash_loan(U256::from(500), U256::from(4))
            .unwrap();
        let flash = reserve.flash_loans.unwrap();
        assert_eq!(flash.lifetime_flash_loans, U256::from(1_500));
        assert_eq!(flash.lifetime_flash_loan_premium, U256::from(13));
        assert_eq!(flash.lifetime_flash_loan_lp_premium, U256::from(13));
        assert_eq!(flash.lifetime_flash_loan_protocol_premium, U256::ZERO);
    }

    #[rstest]
    fn test_record_liquidation_overflow(mut reserve: Reserve) {
        reserve.lifetime_liquidated = U256::MAX;
        assert!(matches!(
            reserve.record_liquidation(U256::from(1)),
            Err(LendingError::ArithmeticOverflow(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_lifetime_liquidated_is_sum(amounts in proptest::collection::vec(0u128..u128::MAX, 0..32)) {
            let mut reserve = Reserve::new("r", Address::ZERO, "p", "o", &SchemaConfig::default());
            let mut expected = U256::ZERO;
            let mut previous = U256::ZERO;
            for amount in amounts {
                reserve.record_liquidation(U256::from(amount)).unwrap();
                expected += U256::from(amount);
                prop_assert!(reserve.lifetime_liquidated >= previous);
                previous = reserve.lifetime_liquidated;
            }
            prop_assert_eq!(reserve.lifetime_liquidated, expected);
        }
    }
}
