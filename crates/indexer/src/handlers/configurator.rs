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

//! Handlers for reserve listing and configuration events of the pool configurator.
//!
//! Every change is followed by a configuration history snapshot of the reserve.

use alloy_primitives::Address;
use nautilus_lending_model::{
    EventMeta, LendingResult,
    entities::Reserve,
    enums::TokenWrapperKind,
    events::{
        BorrowingDisabledOnReserveEvent, BorrowingEnabledOnReserveEvent,
        CollateralConfigurationChangedEvent, ReserveFactorChangedEvent, ReserveInitializedEvent,
        ReserveInterestRateStrategyChangedEvent, ReserveStatusChange, ReserveStatusChangedEvent,
    },
    history::ReserveConfigurationHistoryItem,
    identifiers::reserve_configuration_history_item_id,
};

use crate::{registry::EntityRegistry, store::EntityStore};

fn update_reserve_configuration<S, F>(
    registry: &mut EntityRegistry<S>,
    meta: &EventMeta,
    asset: &Address,
    update: F,
) -> LendingResult<()>
where
    S: EntityStore,
    F: FnOnce(&mut EntityRegistry<S>, &mut Reserve),
{
    let snapshot_id = reserve_configuration_history_item_id(meta);
    if registry.already_recorded::<ReserveConfigurationHistoryItem>(&snapshot_id) {
        return Ok(());
    }

    let pool_id = registry.get_pool_by_contract(&meta.contract)?;
    let mut reserve = registry.get_or_init_reserve_in_pool(asset, &pool_id)?;
    update(registry, &mut reserve);
    registry.save(reserve.clone());
    registry.record_reserve_configuration(meta, &reserve)
}

/// Handles a `ReserveInitialized` event: activates the reserve and links its tokens.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved.
pub fn handle_reserve_initialized<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &ReserveInitializedEvent,
) -> LendingResult<()> {
    update_reserve_configuration(registry, &event.meta, &event.asset, |registry, reserve| {
        reserve.is_active = true;
        reserve.reserve_interest_rate_strategy = event.interest_rate_strategy_address;

        let a_token = registry.link_token_wrapper(TokenWrapperKind::Supply, &event.a_token, reserve);
        let v_token = registry.link_token_wrapper(
            TokenWrapperKind::VariableDebt,
            &event.variable_debt_token,
            reserve,
        );
        reserve.a_token = a_token;
        reserve.v_token = v_token;

        if reserve.stable_debt.is_some() {
            let s_token = registry.link_token_wrapper(
                TokenWrapperKind::StableDebt,
                &event.stable_debt_token,
                reserve,
            );
            if let Some(stable) = reserve.stable_debt.as_mut() {
                stable.s_token = s_token;
            }
        }
        tracing::info!("Initialized {reserve}");
    })
}

/// Handles a `CollateralConfigurationChanged` event.
///
/// Collateral usage is enabled iff the liquidation threshold is non-zero.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved.
pub fn handle_collateral_configuration_changed<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &CollateralConfigurationChangedEvent,
) -> LendingResult<()> {
    update_reserve_configuration(registry, &event.meta, &event.asset, |_, reserve| {
        reserve.base_ltv_as_collateral = event.ltv;
        reserve.reserve_liquidation_threshold = event.liquidation_threshold;
        reserve.reserve_liquidation_bonus = event.liquidation_bonus;
        reserve.usage_as_collateral_enabled = !event.liquidation_threshold.is_zero();
    })
}

/// Handles a `BorrowingEnabledOnReserve` event.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved.
pub fn handle_borrowing_enabled<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &BorrowingEnabledOnReserveEvent,
) -> LendingResult<()> {
    update_reserve_configuration(registry, &event.meta, &event.asset, |_, reserve| {
        reserve.borrowing_enabled = true;
        if let Some(stable) = reserve.stable_debt.as_mut() {
            stable.stable_borrow_rate_enabled = event.stable_rate_enabled;
        }
    })
}

/// Handles a `BorrowingDisabledOnReserve` event.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved.
pub fn handle_borrowing_disabled<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &BorrowingDisabledOnReserveEvent,
) -> LendingResult<()> {
    update_reserve_configuration(registry, &event.meta, &event.asset, |_, reserve| {
        reserve.borrowing_enabled = false;
    })
}

/// Handles the activation and freezing status events of a reserve.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved.
pub fn handle_reserve_status_changed<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &ReserveStatusChangedEvent,
) -> LendingResult<()> {
    update_reserve_configuration(registry, &event.meta, &event.asset, |_, reserve| {
        match event.change {
            ReserveStatusChange::Activated => reserve.is_active = true,
            ReserveStatusChange::Deactivated => reserve.is_active = false,
            ReserveStatusChange::Frozen => reserve.is_frozen = true,
            ReserveStatusChange::Unfrozen => reserve.is_frozen = false,
        }
    })
}

/// Handles a `ReserveInterestRateStrategyChanged` event.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved.
pub fn handle_interest_rate_strategy_changed<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &ReserveInterestRateStrategyChangedEvent,
) -> LendingResult<()> {
    update_reserve_configuration(registry, &event.meta, &event.asset, |_, reserve| {
        reserve.reserve_interest_rate_strategy = event.strategy;
    })
}

/// Handles a `ReserveFactorChanged` event.
///
/// # Errors
///
/// Returns an error if the pool cannot be resolved.
pub fn handle_reserve_factor_changed<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &ReserveFactorChangedEvent,
) -> LendingResult<()> {
    update_reserve_configuration(registry, &event.meta, &event.asset, |_, reserve| {
        reserve.reserve_factor = event.factor;
    })
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use nautilus_lending_model::{
        SchemaConfig,
        entities::{EntityKind, TokenWrapper},
        history::ReserveConfigurationHistoryItem,
        identifiers::{
            address_to_hex, reserve_configuration_history_item_id, reserve_id, token_wrapper_id,
        },
        stubs::{self, STUB_POOL_ID, configurator_address, dai, lending_pool_address},
    };
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{config::PoolRegistration, store::InMemoryStore};

    fn registry_with(schema: SchemaConfig) -> EntityRegistry<InMemoryStore> {
        let mut registry = EntityRegistry::new(InMemoryStore::new(), schema);
        registry
            .register_pool(&PoolRegistration::new(
                STUB_POOL_ID,
                lending_pool_address(),
                Some(configurator_address()),
                vec![],
            ))
            .unwrap();
        registry
    }

    #[fixture]
    fn registry() -> EntityRegistry<InMemoryStore> {
        registry_with(SchemaConfig::default())
    }

    fn meta_at(log_index: u32) -> EventMeta {
        stubs::stub_meta(
            configurator_address(),
            17_000_000,
            2,
            log_index,
            stubs::STUB_TIMESTAMP,
        )
    }

    fn load_reserve(registry: &EntityRegistry<InMemoryStore>) -> Reserve {
        registry
            .load::<Reserve>(&reserve_id(&dai(), STUB_POOL_ID))
            .unwrap()
    }

    #[rstest]
    fn test_reserve_initialized_links_tokens(mut registry: EntityRegistry<InMemoryStore>) {
        let event = stubs::reserve_initialized(meta_at(1), dai());
        handle_reserve_initialized(&mut registry, &event).unwrap();

        let reserve = load_reserve(&registry);
        assert!(reserve.is_active);
        assert_eq!(reserve.a_token, token_wrapper_id(&event.a_token));
        assert_eq!(reserve.v_token, token_wrapper_id(&event.variable_debt_token));
        assert_eq!(
            reserve.stable_debt.as_ref().unwrap().s_token,
            token_wrapper_id(&event.stable_debt_token)
        );
        assert_eq!(
            reserve.reserve_interest_rate_strategy,
            event.interest_rate_strategy_address
        );

        let a_token = registry.load::<TokenWrapper>(&reserve.a_token).unwrap();
        assert_eq!(a_token.kind, TokenWrapperKind::Supply);
        assert_eq!(a_token.underlying_asset_address, dai());
        assert_eq!(a_token.pool, STUB_POOL_ID);
        assert_eq!(registry.store().count(EntityKind::TokenWrapper), 3);

        let snapshot = registry
            .load::<ReserveConfigurationHistoryItem>(&reserve_configuration_history_item_id(
                &event.meta,
            ))
            .unwrap();
        assert!(snapshot.is_active);
        assert_eq!(snapshot.stable_borrow_rate_enabled, Some(false));
    }

    #[rstest]
    fn test_reserve_initialized_reduced_schema_skips_stable_token() {
        let mut registry = registry_with(SchemaConfig::reduced());
        let event = stubs::reserve_initialized(meta_at(1), dai());
        handle_reserve_initialized(&mut registry, &event).unwrap();

        let reserve = load_reserve(&registry);
        assert!(reserve.stable_debt.is_none());
        assert_eq!(registry.store().count(EntityKind::TokenWrapper), 2);
        assert!(
            registry
                .load::<TokenWrapper>(&address_to_hex(&event.stable_debt_token))
                .is_none()
        );
    }

    #[rstest]
    #[case(U256::from(8_000), true)]
    #[case(U256::ZERO, false)]
    fn test_collateral_configuration(
        mut registry: EntityRegistry<InMemoryStore>,
        #[case] threshold: U256,
        #[case] expected_enabled: bool,
    ) {
        let event = CollateralConfigurationChangedEvent {
            meta: meta_at(1),
            asset: dai(),
            ltv: U256::from(7_500),
            liquidation_threshold: threshold,
            liquidation_bonus: U256::from(10_500),
        };
        handle_collateral_configuration_changed(&mut registry, &event).unwrap();

        let reserve = load_reserve(&registry);
        assert_eq!(reserve.base_ltv_as_collateral, U256::from(7_500));
        assert_eq!(reserve.reserve_liquidation_threshold, threshold);
        assert_eq!(reserve.reserve_liquidation_bonus, U256::from(10_500));
        assert_eq!(reserve.usage_as_collateral_enabled, expected_enabled);
    }

    #[rstest]
    fn test_borrowing_flags(mut registry: EntityRegistry<InMemoryStore>) {
        let enabled = BorrowingEnabledOnReserveEvent {
            meta: meta_at(1),
            asset: dai(),
            stable_rate_enabled: true,
        };
        handle_borrowing_enabled(&mut registry, &enabled).unwrap();
        let reserve = load_reserve(&registry);
        assert!(reserve.borrowing_enabled);
        assert!(reserve.stable_borrow_rate_enabled());

        let disabled = BorrowingDisabledOnReserveEvent {
            meta: meta_at(2),
            asset: dai(),
        };
        handle_borrowing_disabled(&mut registry, &disabled).unwrap();
        assert!(!load_reserve(&registry).borrowing_enabled);
        assert_eq!(
            registry
                .store()
                .count(EntityKind::ReserveConfigurationHistoryItem),
            2
        );
    }

    #[rstest]
    fn test_status_changes(mut registry: EntityRegistry<InMemoryStore>) {
        let changes = [
            ReserveStatusChange::Activated,
            ReserveStatusChange::Frozen,
            ReserveStatusChange::Deactivated,
        ];
        for (log_index, change) in (1..).zip(changes) {
            let event = ReserveStatusChangedEvent {
                meta: meta_at(log_index),
                asset: dai(),
                change,
            };
            handle_reserve_status_changed(&mut registry, &event).unwrap();
        }

        let reserve = load_reserve(&registry);
        assert!(!reserve.is_active);
        assert!(reserve.is_frozen);
    }

    #[rstest]
    fn test_strategy_and_factor(mut registry: EntityRegistry<InMemoryStore>) {
        let strategy = Address::with_last_byte(0x42);
        handle_interest_rate_strategy_changed(
            &mut registry,
            &ReserveInterestRateStrategyChangedEvent {
                meta: meta_at(1),
                asset: dai(),
                strategy,
            },
        )
        .unwrap();
        handle_reserve_factor_changed(
            &mut registry,
            &ReserveFactorChangedEvent {
                meta: meta_at(2),
                asset: dai(),
                factor: U256::from(1_000),
            },
        )
        .unwrap();

        let reserve = load_reserve(&registry);
        assert_eq!(reserve.reserve_interest_rate_strategy, strategy);
        assert_eq!(reserve.reserve_factor, U256::from(1_000));

        let snapshot = registry
            .load::<ReserveConfigurationHistoryItem>(&reserve_configuration_history_item_id(
                &meta_at(2),
            ))
            .unwrap();
        assert_eq!(snapshot.reserve_factor, U256::from(1_000));
        assert_eq!(snapshot.reserve_interest_rate_strategy, strategy);
    }

    #[rstest]
    fn test_reapplied_configuration_event_is_ignored(
        mut registry: EntityRegistry<InMemoryStore>,
    ) {
        let factor_at = |log_index: u32, factor: u64| ReserveFactorChangedEvent {
            meta: meta_at(log_index),
            asset: dai(),
            factor: U256::from(factor),
        };
        let first = factor_at(1, 10);
        handle_reserve_factor_changed(&mut registry, &first).unwrap();
        handle_reserve_factor_changed(&mut registry, &factor_at(2, 20)).unwrap();
        let writes = registry.store().writes();

        handle_reserve_factor_changed(&mut registry, &first).unwrap();

        assert_eq!(load_reserve(&registry).reserve_factor, U256::from(20));
        assert_eq!(registry.store().writes(), writes);
    }
}
