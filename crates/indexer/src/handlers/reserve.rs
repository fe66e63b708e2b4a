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

use nautilus_lending_model::{
    LendingResult,
    events::ReserveDataUpdatedEvent,
    history::ReserveParamsHistoryItem,
    identifiers::{reserve_id, reserve_params_history_item_id},
};

use crate::{registry::EntityRegistry, store::EntityStore};

/// Handles a `ReserveDataUpdated` event.
///
/// Depositors interest accrues at the stored liquidity rate over the elapsed interval, and only
/// when the event is strictly newer than the last update. The liquidity rate, index and
/// timestamp are then replaced unconditionally and the reserve parameters are snapshotted.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved or fixed-point arithmetic overflows.
pub fn handle_reserve_data_updated<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &ReserveDataUpdatedEvent,
) -> LendingResult<()> {
    let meta = &event.meta;
    let pool_id = registry.get_pool_by_contract(&meta.contract)?;
    let reserve_key = reserve_id(&event.reserve, &pool_id);
    let snapshot_id = reserve_params_history_item_id(meta, &reserve_key);
    if registry.already_recorded::<ReserveParamsHistoryItem>(&snapshot_id) {
        return Ok(());
    }

    let mut reserve = registry.get_or_init_reserve_in_pool(&event.reserve, &pool_id)?;
    let now = meta.block_timestamp;

    if let Some(stable) = reserve.stable_debt.as_mut() {
        stable.stable_borrow_rate = event.stable_borrow_rate;
    }
    reserve.variable_borrow_rate = event.variable_borrow_rate;
    reserve.variable_borrow_index = event.variable_borrow_index;

    let growth = reserve.accrue_depositors_interest(now)?;
    if !growth.is_zero() {
        tracing::debug!("Accrued {growth} depositors interest on {}", reserve.id);
    }

    reserve.liquidity_rate = event.liquidity_rate;
    reserve.liquidity_index = event.liquidity_index;
    reserve.last_update_timestamp = now;
    registry.save(reserve.clone());

    registry.record_reserve_params(meta, &reserve)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use nautilus_lending_model::{
        SchemaConfig,
        entities::{EntityKind, Reserve},
        history::ReserveParamsHistoryItem,
        identifiers::{reserve_id, reserve_params_history_item_id},
        math::{RAY, SECONDS_PER_YEAR},
        stubs::{self, STUB_POOL_ID, STUB_TIMESTAMP, dai, lending_pool_address},
    };
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{config::PoolRegistration, store::InMemoryStore};

    #[fixture]
    fn registry() -> EntityRegistry<InMemoryStore> {
        let mut registry = EntityRegistry::new(InMemoryStore::new(), SchemaConfig::default());
        registry
            .register_pool(&PoolRegistration::new(
                STUB_POOL_ID,
                lending_pool_address(),
                None,
                vec![],
            ))
            .unwrap();
        registry
    }

    fn update_at(timestamp: u64, log_index: u32, rate: U256) -> ReserveDataUpdatedEvent {
        let meta = stubs::stub_meta(lending_pool_address(), 18_000_000, 1, log_index, timestamp);
        stubs::reserve_data_updated(meta, dai(), rate)
    }

    fn seed_supply(registry: &mut EntityRegistry<InMemoryStore>, supply: U256) {
        let id = reserve_id(&dai(), STUB_POOL_ID);
        let mut reserve = registry.load::<Reserve>(&id).unwrap();
        reserve.total_a_token_supply = supply;
        registry.save(reserve);
    }

    #[rstest]
    fn test_rates_and_snapshot(mut registry: EntityRegistry<InMemoryStore>) {
        let event = update_at(STUB_TIMESTAMP, 1, U256::from(7));
        handle_reserve_data_updated(&mut registry, &event).unwrap();

        let reserve = registry
            .load::<Reserve>(&reserve_id(&dai(), STUB_POOL_ID))
            .unwrap();
        assert_eq!(reserve.liquidity_rate, U256::from(7));
        assert_eq!(reserve.variable_borrow_rate, U256::from(2));
        assert_eq!(reserve.stable_debt.unwrap().stable_borrow_rate, U256::from(3));
        assert_eq!(reserve.liquidity_index, RAY);
        assert_eq!(reserve.last_update_timestamp, STUB_TIMESTAMP);

        let snapshot_id = reserve_params_history_item_id(&event.meta, &reserve.id);
        let snapshot = registry
            .load::<ReserveParamsHistoryItem>(&snapshot_id)
            .unwrap();
        assert_eq!(snapshot.liquidity_rate, U256::from(7));
        assert_eq!(snapshot.timestamp, STUB_TIMESTAMP);
    }

    #[rstest]
    fn test_growth_uses_previous_rate(mut registry: EntityRegistry<InMemoryStore>) {
        let rate = RAY / U256::from(20);
        handle_reserve_data_updated(&mut registry, &update_at(STUB_TIMESTAMP, 1, rate)).unwrap();
        let supply = U256::from(1_000u64) * U256::from(10u64).pow(U256::from(18));
        seed_supply(&mut registry, supply);

        let one_year_later = STUB_TIMESTAMP + SECONDS_PER_YEAR;
        handle_reserve_data_updated(&mut registry, &update_at(one_year_later, 2, U256::ZERO))
            .unwrap();

        let reserve = registry
            .load::<Reserve>(&reserve_id(&dai(), STUB_POOL_ID))
            .unwrap();
        let expected_growth = U256::from(50u64) * U256::from(10u64).pow(U256::from(18));
        assert_eq!(reserve.lifetime_depositors_interest_earned, expected_growth);
        assert_eq!(reserve.total_a_token_supply, supply + expected_growth);
        assert_eq!(reserve.liquidity_rate, U256::ZERO);
    }

    #[rstest]
    fn test_no_growth_when_not_newer(mut registry: EntityRegistry<InMemoryStore>) {
        let rate = RAY / U256::from(20);
        handle_reserve_data_updated(&mut registry, &update_at(STUB_TIMESTAMP, 1, rate)).unwrap();
        seed_supply(&mut registry, U256::from(1_000_000u64));

        handle_reserve_data_updated(&mut registry, &update_at(STUB_TIMESTAMP, 2, rate)).unwrap();
        handle_reserve_data_updated(&mut registry, &update_at(STUB_TIMESTAMP - 10, 3, rate))
            .unwrap();

        let reserve = registry
            .load::<Reserve>(&reserve_id(&dai(), STUB_POOL_ID))
            .unwrap();
        assert_eq!(reserve.lifetime_depositors_interest_earned, U256::ZERO);
        assert_eq!(reserve.total_a_token_supply, U256::from(1_000_000u64));
        assert_eq!(reserve.last_update_timestamp, STUB_TIMESTAMP - 10);
        assert_eq!(
            registry.store().count(EntityKind::ReserveParamsHistoryItem),
            3
        );
    }

    #[rstest]
    fn test_reapplied_update_is_ignored(mut registry: EntityRegistry<InMemoryStore>) {
        let first = update_at(STUB_TIMESTAMP, 1, U256::from(7));
        handle_reserve_data_updated(&mut registry, &first).unwrap();
        let second = update_at(STUB_TIMESTAMP + 60, 2, U256::from(9));
        handle_reserve_data_updated(&mut registry, &second).unwrap();
        let writes = registry.store().writes();

        handle_reserve_data_updated(&mut registry, &first).unwrap();

        let reserve = registry
            .load::<Reserve>(&reserve_id(&dai(), STUB_POOL_ID))
            .unwrap();
        assert_eq!(reserve.liquidity_rate, U256::from(9));
        assert_eq!(reserve.last_update_timestamp, STUB_TIMESTAMP + 60);
        assert_eq!(registry.store().writes(), writes);
    }

    #[rstest]
    fn test_reduced_schema_has_no_stable_rate() {
        let mut registry = EntityRegistry::new(InMemoryStore::new(), SchemaConfig::reduced());
        registry
            .register_pool(&PoolRegistration::new(
                STUB_POOL_ID,
                lending_pool_address(),
                None,
                vec![],
            ))
            .unwrap();

        let event = update_at(STUB_TIMESTAMP, 1, U256::from(7));
        handle_reserve_data_updated(&mut registry, &event).unwrap();

        let reserve = registry
            .load::<Reserve>(&reserve_id(&dai(), STUB_POOL_ID))
            .unwrap();
        assert!(reserve.stable_debt.is_none());
        let snapshot = registry
            .load::<ReserveParamsHistoryItem>(&reserve_params_history_item_id(
                &event.meta,
                &reserve.id,
            ))
            .unwrap();
        assert!(snapshot.stable_debt.is_none());
        assert!(snapshot.flash_loans.is_none());
    }
}
