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

//! Fixed-point math for lending-pool values.
//!
//! This module provides the ray (27 decimals) and wad (18 decimals) arithmetic used by the
//! lending pool contracts, linear interest accrual, and conversions from raw token units
//! into decimals.
//!
//! The implementation replicates the contracts rather than approximating them:
//! - All arithmetic is performed on `U256` with half-up rounding exactly as the on-chain
//!   `rayMul`, `rayDiv` and `rayToWad` helpers round.
//! - Overflow is detected and reported, never wrapped.
//! - Floating point is never used; decimal conversion splits integer and fraction exactly.

use alloy_primitives::U256;
use rust_decimal::Decimal;

use crate::error::{LendingError, LendingResult};

/// 10^27, the ray unit.
pub const RAY: U256 = U256::from_limbs([0x9fd0_803c_e800_0000, 0x033b_2e3c, 0, 0]);

/// 10^27 / 2.
pub const HALF_RAY: U256 = U256::from_limbs([0x4fe8_401e_7400_0000, 0x019d_971e, 0, 0]);

/// 10^18, the wad unit.
pub const WAD: U256 = U256::from_limbs([0x0de0_b6b3_a764_0000, 0, 0, 0]);

/// 10^18 / 2.
pub const HALF_WAD: U256 = U256::from_limbs([0x06f0_5b59_d3b2_0000, 0, 0, 0]);

/// 10^9, the ratio between ray and wad.
pub const WAD_RAY_RATIO: U256 = U256::from_limbs([1_000_000_000, 0, 0, 0]);

/// Seconds per year used by the interest rate model (365.2425 days).
pub const SECONDS_PER_YEAR: u64 = 31_556_952;

/// Decimals of a ray value.
pub const RAY_DECIMALS: u32 = 27;

/// Decimals of a wad value.
pub const WAD_DECIMALS: u32 = 18;

/// Maximum decimals s.t. 10^decimals fits in 256 bits.
/// floor(log10(2^256-1)) = 77
const MAX_DECIMALS_FIT: u32 = 77;

/// Significant digits always representable by a `Decimal` mantissa.
const MAX_DECIMAL_DIGITS: usize = 28;

fn overflow(operation: &str, a: U256, b: U256) -> LendingError {
    LendingError::ArithmeticOverflow(format!("{operation}({a}, {b})"))
}

/// Compute 10^d as U256 (d <= 77).
///
/// # Errors
///
/// Returns an error if `d` exceeds the 256-bit capacity.
pub fn exponent_to_u256(d: u32) -> LendingResult<U256> {
    if d > MAX_DECIMALS_FIT {
        return Err(LendingError::ArithmeticOverflow(format!(
            "decimals={d} exceeds 10^d capacity for U256"
        )));
    }
    let ten = U256::from(10u8);
    let mut p = U256::from(1u8);
    for _ in 0..d {
        p *= ten;
    }
    Ok(p)
}

/// Multiplies two ray values, rounding half up.
///
/// # Errors
///
/// Returns an error if the intermediate product overflows 256 bits.
pub fn ray_mul(a: U256, b: U256) -> LendingResult<U256> {
    a.checked_mul(b)
        .and_then(|product| product.checked_add(HALF_RAY))
        .map(|rounded| rounded / RAY)
        .ok_or_else(|| overflow("ray_mul", a, b))
}

/// Divides two ray values, rounding half up.
///
/// # Errors
///
/// Returns an error if `b` is zero or the scaled numerator overflows 256 bits.
pub fn ray_div(a: U256, b: U256) -> LendingResult<U256> {
    if b.is_zero() {
        return Err(overflow("ray_div", a, b));
    }
    let half_b = b / U256::from(2u8);
    a.checked_mul(RAY)
        .and_then(|scaled| scaled.checked_add(half_b))
        .map(|rounded| rounded / b)
        .ok_or_else(|| overflow("ray_div", a, b))
}

/// Converts a wad value to a ray value.
///
/// # Errors
///
/// Returns an error if the result overflows 256 bits.
pub fn wad_to_ray(a: U256) -> LendingResult<U256> {
    a.checked_mul(WAD_RAY_RATIO)
        .ok_or_else(|| overflow("wad_to_ray", a, WAD_RAY_RATIO))
}

/// Converts a ray value to a wad value, rounding half up.
///
/// # Errors
///
/// Returns an error if the rounding addition overflows 256 bits.
pub fn ray_to_wad(a: U256) -> LendingResult<U256> {
    let half_ratio = WAD_RAY_RATIO / U256::from(2u8);
    a.checked_add(half_ratio)
        .map(|rounded| rounded / WAD_RAY_RATIO)
        .ok_or_else(|| overflow("ray_to_wad", a, WAD_RAY_RATIO))
}

/// Returns the interest (ray) accrued at `rate` between two timestamps, without the unit
/// principal.
///
/// Accrual is linear: `rate * elapsed / SECONDS_PER_YEAR`. Returns zero when `now` does not
/// exceed `last_update_timestamp`.
///
/// # Errors
///
/// Returns an error if fixed-point arithmetic overflows.
pub fn calculate_linear_interest(
    rate: U256,
    last_update_timestamp: u64,
    now: u64,
) -> LendingResult<U256> {
    if now <= last_update_timestamp {
        return Ok(U256::ZERO);
    }
    let time_difference = U256::from(now - last_update_timestamp);
    let time_delta = ray_div(
        wad_to_ray(time_difference)?,
        wad_to_ray(U256::from(SECONDS_PER_YEAR))?,
    )?;
    ray_mul(rate, time_delta)
}

/// Returns the growth of `amount` (wad) accrued at `rate` (ray) between two timestamps.
///
/// `growth = rayToWad(rayMul(wadToRay(amount), linearInterest(rate, last, now)))`.
///
/// Callers must only apply the result when `now > last_update_timestamp`; for any other
/// ordering the growth is zero.
///
/// # Errors
///
/// Returns an error if fixed-point arithmetic overflows.
pub fn calculate_growth(
    amount: U256,
    rate: U256,
    last_update_timestamp: u64,
    now: u64,
) -> LendingResult<U256> {
    if now <= last_update_timestamp {
        return Ok(U256::ZERO);
    }
    let growth_rate = calculate_linear_interest(rate, last_update_timestamp, now)?;
    let growth = ray_mul(wad_to_ray(amount)?, growth_rate)?;
    ray_to_wad(growth)
}

/// Split `amount / 10^decimals` into (integer_part, fractional_digits_string with length==decimals).
/// This is exact and uses only integer arithmetic + zero-padding.
fn u256_scaled_parts(amount: U256, decimals: u32) -> LendingResult<(U256, String)> {
    if decimals == 0 {
        return Ok((amount, String::new()));
    }
    let denom = exponent_to_u256(decimals)?;
    let int_part = amount / denom;
    let frac = amount % denom;

    let frac_str = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    debug_assert_eq!(frac_str.len(), decimals as usize);
    Ok((int_part, frac_str))
}

/// Exact, human-friendly decimal string without floating point.
///
/// # Examples
/// - amount=1_000_000_000_000_000_000, decimals=18 -> "1"
/// - amount=12345, decimals=6 -> "0.012345"
///
/// # Errors
///
/// Returns an error if the decimals parameter exceeds the maximum supported value.
pub fn u256_to_decimal_string(amount: U256, decimals: u32) -> LendingResult<String> {
    let (int_part, frac_str) = u256_scaled_parts(amount, decimals)?;
    let frac_str = frac_str.trim_end_matches('0');
    if frac_str.is_empty() {
        Ok(int_part.to_string())
    } else {
        Ok(format!("{int_part}.{frac_str}"))
    }
}

/// Converts a raw token amount into a `Decimal` using the token's `decimals`.
///
/// The integer part must fit into 28 digits. Fractional digits beyond what a `Decimal` can
/// hold next to the integer part are truncated.
///
/// # Errors
///
/// Returns an error if the integer part does not fit into a `Decimal`.
pub fn convert_token_amount_to_decimals(amount: U256, decimals: u32) -> LendingResult<Decimal> {
    let (int_part, frac_str) = u256_scaled_parts(amount, decimals)?;
    let int_str = if int_part.is_zero() {
        String::new()
    } else {
        int_part.to_string()
    };
    if int_str.len() > MAX_DECIMAL_DIGITS {
        return Err(LendingError::ArithmeticOverflow(format!(
            "{amount} with {decimals} decimals exceeds Decimal range"
        )));
    }

    let keep_frac = frac_str.len().min(MAX_DECIMAL_DIGITS - int_str.len());
    let mantissa_str = format!("{int_str}{}", &frac_str[..keep_frac]);
    if mantissa_str.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let mantissa: i128 = mantissa_str
        .parse()
        .map_err(|e| LendingError::ArithmeticOverflow(format!("{mantissa_str}: {e}")))?;
    Ok(Decimal::from_i128_with_scale(mantissa, keep_frac as u32).normalize())
}

/// Converts a raw ray value into a `Decimal`.
///
/// # Errors
///
/// Returns an error if the value does not fit into a `Decimal`.
pub fn convert_value_from_ray(value: U256) -> LendingResult<Decimal> {
    convert_token_amount_to_decimals(value, RAY_DECIMALS)
}

/// Inverts an 18 decimals price (`10^18 / price`).
///
/// A zero price is returned unchanged.
#[must_use]
pub fn format18(price: U256) -> U256 {
    if price.is_zero() {
        return price;
    }
    WAD / price
}

/// Inverts an 8 decimals USD/ETH price into an 18 decimals ETH/USD price (`10^26 / price`).
///
/// A zero price is returned unchanged.
#[must_use]
pub fn format_usd_eth_chainlink_price(price: U256) -> U256 {
    if price.is_zero() {
        return price;
    }
    // 10^(18 + 8)
    let numerator = U256::from_limbs([0xdcc8_0cd2_e400_0000, 0x0052_b7d2, 0, 0]);
    numerator / price
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    fn tokens(n: u64) -> U256 {
        U256::from(n) * WAD
    }

    #[rstest]
    fn test_constants() {
        assert_eq!(RAY, exponent_to_u256(27).unwrap());
        assert_eq!(HALF_RAY, RAY / U256::from(2));
        assert_eq!(WAD, exponent_to_u256(18).unwrap());
        assert_eq!(HALF_WAD, WAD / U256::from(2));
        assert_eq!(WAD_RAY_RATIO, exponent_to_u256(9).unwrap());
        assert_eq!(
            format_usd_eth_chainlink_price(U256::from(1)),
            exponent_to_u256(26).unwrap()
        );
    }

    #[rstest]
    fn test_exponent_capacity() {
        assert!(exponent_to_u256(77).is_ok());
        assert!(matches!(
            exponent_to_u256(78),
            Err(LendingError::ArithmeticOverflow(_))
        ));
    }

    #[rstest]
    #[case(U256::from(1), HALF_RAY, U256::from(1))]
    #[case(U256::from(1), HALF_RAY - U256::from(1), U256::ZERO)]
    #[case(RAY, RAY, RAY)]
    fn test_ray_mul_rounds_half_up(#[case] a: U256, #[case] b: U256, #[case] expected: U256) {
        assert_eq!(ray_mul(a, b).unwrap(), expected);
    }

    #[rstest]
    fn test_ray_mul_overflow() {
        assert!(matches!(
            ray_mul(U256::MAX, U256::from(2)),
            Err(LendingError::ArithmeticOverflow(_))
        ));
    }

    #[rstest]
    fn test_ray_div() {
        assert_eq!(ray_div(U256::from(1), U256::from(2)).unwrap(), HALF_RAY);
        assert_eq!(ray_div(RAY, RAY).unwrap(), RAY);
        assert!(ray_div(RAY, U256::ZERO).is_err());
    }

    #[rstest]
    fn test_wad_ray_conversions() {
        assert_eq!(wad_to_ray(WAD).unwrap(), RAY);
        assert_eq!(ray_to_wad(RAY).unwrap(), WAD);
        // 0.5e-9 wad rounds up
        assert_eq!(ray_to_wad(U256::from(500_000_000u64)).unwrap(), U256::from(1));
        assert_eq!(ray_to_wad(U256::from(499_999_999u64)).unwrap(), U256::ZERO);
    }

    #[rstest]
    fn test_growth_one_year_at_five_percent() {
        let rate = RAY / U256::from(20); // 5%
        let growth = calculate_growth(tokens(1000), rate, 0, SECONDS_PER_YEAR).unwrap();
        assert_eq!(growth, tokens(50));
    }

    #[rstest]
    fn test_growth_half_year_at_five_percent() {
        let rate = RAY / U256::from(20);
        let growth = calculate_growth(tokens(1000), rate, 1_000, 1_000 + SECONDS_PER_YEAR / 2)
            .unwrap();
        assert_eq!(growth, tokens(25));
    }

    #[rstest]
    fn test_growth_is_linear_not_compounded() {
        let rate = RAY; // 100%
        let growth = calculate_growth(tokens(1), rate, 0, 2 * SECONDS_PER_YEAR).unwrap();
        assert_eq!(growth, tokens(2));
    }

    #[rstest]
    #[case(100, 100)]
    #[case(100, 50)]
    fn test_growth_guard_non_positive_elapsed(#[case] last: u64, #[case] now: u64) {
        let growth = calculate_growth(tokens(1000), RAY, last, now).unwrap();
        assert_eq!(growth, U256::ZERO);
        assert_eq!(
            calculate_linear_interest(RAY, last, now).unwrap(),
            U256::ZERO
        );
    }

    #[rstest]
    fn test_growth_zero_rate() {
        let growth = calculate_growth(tokens(1000), U256::ZERO, 0, 10_000).unwrap();
        assert_eq!(growth, U256::ZERO);
    }

    #[rstest]
    #[case(U256::from(1_000_000_000_000_000_000u128), 18, "1")]
    #[case(U256::from(12345u64), 6, "0.012345")]
    #[case(U256::from(1_500_000u64), 6, "1.5")]
    #[case(U256::from(42u64), 0, "42")]
    fn test_u256_to_decimal_string(
        #[case] amount: U256,
        #[case] decimals: u32,
        #[case] expected: &str,
    ) {
        assert_eq!(u256_to_decimal_string(amount, decimals).unwrap(), expected);
    }

    #[rstest]
    fn test_convert_token_amount_to_decimals() {
        assert_eq!(
            convert_token_amount_to_decimals(U256::from(1_234_500u64), 6).unwrap(),
            dec!(1.2345)
        );
        assert_eq!(
            convert_token_amount_to_decimals(U256::ZERO, 18).unwrap(),
            Decimal::ZERO
        );
    }

    #[rstest]
    fn test_convert_value_from_ray() {
        // 1.03 ray
        let value = RAY + RAY * U256::from(3) / U256::from(100);
        assert_eq!(convert_value_from_ray(value).unwrap(), dec!(1.03));
    }

    #[rstest]
    fn test_convert_truncates_excess_fraction() {
        // 10^30 + 1 with 27 decimals -> 1000.000000000000000000000000001
        let value = exponent_to_u256(30).unwrap() + U256::from(1);
        let converted = convert_value_from_ray(value).unwrap();
        assert_eq!(converted, dec!(1000));
    }

    #[rstest]
    fn test_convert_rejects_out_of_range_integer() {
        let value = exponent_to_u256(40).unwrap();
        assert!(matches!(
            convert_token_amount_to_decimals(value, 0),
            Err(LendingError::ArithmeticOverflow(_))
        ));
    }

    #[rstest]
    fn test_format18() {
        assert_eq!(format18(U256::ZERO), U256::ZERO);
        assert_eq!(format18(WAD), U256::from(1));
        assert_eq!(format18(U256::from(2)), WAD / U256::from(2));
    }

    #[rstest]
    fn test_format_usd_eth_chainlink_price_zero_short_circuits() {
        assert_eq!(format_usd_eth_chainlink_price(U256::ZERO), U256::ZERO);
    }

    proptest! {
        #[test]
        fn prop_growth_zero_when_time_does_not_advance(
            amount in 0u128..u128::MAX,
            rate in 0u128..u128::MAX,
            last in 0u64..u64::MAX,
            back in 0u64..1_000_000,
        ) {
            let now = last.saturating_sub(back);
            let growth = calculate_growth(U256::from(amount), U256::from(rate), last, now).unwrap();
            prop_assert_eq!(growth, U256::ZERO);
        }

        #[test]
        fn prop_growth_monotonic_in_elapsed_time(
            amount in 0u64..u64::MAX,
            rate in 0u64..u64::MAX,
            elapsed in 1u64..(10 * SECONDS_PER_YEAR),
        ) {
            let amount = U256::from(amount);
            let rate = U256::from(rate) * WAD_RAY_RATIO;
            let shorter = calculate_growth(amount, rate, 0, elapsed).unwrap();
            let longer = calculate_growth(amount, rate, 0, elapsed + 1).unwrap();
            prop_assert!(shorter <= longer);
        }
    }
}
