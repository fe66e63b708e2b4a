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

use alloy_primitives::Address;
use nautilus_lending_model::{
    LendingError, LendingResult,
    entities::{Pool, Record, Reserve, UserReserve},
    identifiers::{reserve_id, user_reserve_id},
};

use crate::{registry::EntityRegistry, store::EntityStore};

impl<S: EntityStore> EntityRegistry<S> {
    /// Returns the reserve of `asset` in the pool owning `contract`, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if `contract` is unmapped or the pool record does not exist.
    pub fn get_or_init_reserve(
        &mut self,
        asset: &Address,
        contract: &Address,
    ) -> LendingResult<Reserve> {
        let pool_id = self.get_pool_by_contract(contract)?;
        self.get_or_init_reserve_in_pool(asset, &pool_id)
    }

    /// Returns the reserve of `asset` in `pool_id`, creating it if absent.
    ///
    /// Creating a reserve also creates the oracle metadata of its asset.
    ///
    /// # Errors
    ///
    /// Returns [`LendingError::MissingDependency`] if the pool record does not exist.
    pub fn get_or_init_reserve_in_pool(
        &mut self,
        asset: &Address,
        pool_id: &str,
    ) -> LendingResult<Reserve> {
        let id = reserve_id(asset, pool_id);
        if let Some(reserve) = self.load::<Reserve>(&id) {
            return Ok(reserve);
        }
        if !self.store.contains(Pool::KIND, pool_id) {
            return Err(LendingError::missing("Pool", pool_id));
        }

        let price = self.get_or_init_price_oracle_asset(asset);
        let reserve = Reserve::new(id, *asset, pool_id, price.id, &self.schema);
        self.save(reserve.clone());
        tracing::debug!("Created {reserve}");
        Ok(reserve)
    }

    /// Returns the position of `user` in the reserve of `asset` in the pool owning `contract`,
    /// creating the reserve, the user and the position as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if `contract` is unmapped or the pool record does not exist.
    pub fn get_or_init_user_reserve(
        &mut self,
        user: &Address,
        asset: &Address,
        contract: &Address,
    ) -> LendingResult<UserReserve> {
        let pool_id = self.get_pool_by_contract(contract)?;
        self.get_or_init_reserve_in_pool(asset, &pool_id)?;
        self.get_or_init_user_reserve_with_ids(user, asset, &pool_id)
    }

    /// Returns the position of `user` in the existing reserve of `asset` in `pool_id`,
    /// creating the user and the position as needed.
    ///
    /// # Errors
    ///
    /// Returns [`LendingError::MissingDependency`] if the reserve does not exist.
    pub fn get_or_init_user_reserve_with_ids(
        &mut self,
        user: &Address,
        asset: &Address,
        pool_id: &str,
    ) -> LendingResult<UserReserve> {
        let id = user_reserve_id(user, asset, pool_id);
        if let Some(user_reserve) = self.load::<UserReserve>(&id) {
            return Ok(user_reserve);
        }
        let reserve = reserve_id(asset, pool_id);
        if !self.store.contains(Reserve::KIND, &reserve) {
            return Err(LendingError::missing("Reserve", reserve));
        }

        let owner = self.get_or_init_user(user);
        let user_reserve = UserReserve::new(id, pool_id, owner.id, reserve, &self.schema);
        self.save(user_reserve.clone());
        tracing::debug!("Created {user_reserve}");
        Ok(user_reserve)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use nautilus_lending_model::{
        SchemaConfig,
        entities::{EntityKind, PriceOracleAsset, User},
        identifiers::{address_to_hex, price_oracle_asset_id},
        stubs::{STUB_POOL_ID, alice, dai, lending_pool_address},
    };
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

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

    #[rstest]
    fn test_get_or_init_reserve_creates_defaults(mut registry: EntityRegistry<InMemoryStore>) {
        let reserve = registry
            .get_or_init_reserve(&dai(), &lending_pool_address())
            .unwrap();

        assert_eq!(reserve.id, reserve_id(&dai(), STUB_POOL_ID));
        assert_eq!(reserve.pool, STUB_POOL_ID);
        assert_eq!(reserve.price, price_oracle_asset_id(&dai()));
        assert_eq!(reserve.total_a_token_supply, U256::ZERO);
        assert_eq!(reserve.utilization_rate, Decimal::ZERO);
        assert!(!reserve.borrowing_enabled);
        assert!(
            registry
                .load::<PriceOracleAsset>(&address_to_hex(&dai()))
                .is_some()
        );
    }

    #[rstest]
    fn test_get_or_init_reserve_is_idempotent(mut registry: EntityRegistry<InMemoryStore>) {
        let first = registry
            .get_or_init_reserve(&dai(), &lending_pool_address())
            .unwrap();
        let writes = registry.store().writes();
        let second = registry
            .get_or_init_reserve(&dai(), &lending_pool_address())
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(registry.store().writes(), writes);
    }

    #[rstest]
    fn test_get_or_init_reserve_requires_pool_record() {
        let mut registry = EntityRegistry::new(InMemoryStore::new(), SchemaConfig::default());
        registry
            .create_map_contract_to_pool(&lending_pool_address(), STUB_POOL_ID)
            .unwrap();
        let writes = registry.store().writes();

        let result = registry.get_or_init_reserve(&dai(), &lending_pool_address());

        assert_eq!(result, Err(LendingError::missing("Pool", STUB_POOL_ID)));
        assert_eq!(registry.store().writes(), writes);
    }

    #[rstest]
    fn test_get_or_init_user_reserve_creates_user(mut registry: EntityRegistry<InMemoryStore>) {
        let position = registry
            .get_or_init_user_reserve(&alice(), &dai(), &lending_pool_address())
            .unwrap();

        assert_eq!(position.id, user_reserve_id(&alice(), &dai(), STUB_POOL_ID));
        assert_eq!(position.user, address_to_hex(&alice()));
        assert_eq!(position.reserve, reserve_id(&dai(), STUB_POOL_ID));
        assert!(!position.usage_as_collateral_enabled_on_user);
        assert!(registry.load::<User>(&position.user).is_some());

        let store = registry.into_store();
        assert_eq!(store.count(EntityKind::User), 1);
        assert_eq!(store.count(EntityKind::Reserve), 1);
        assert_eq!(store.count(EntityKind::UserReserve), 1);
    }

    #[rstest]
    fn test_with_ids_requires_reserve(mut registry: EntityRegistry<InMemoryStore>) {
        let result = registry.get_or_init_user_reserve_with_ids(&alice(), &dai(), STUB_POOL_ID);
        assert_eq!(
            result,
            Err(LendingError::missing(
                "Reserve",
                reserve_id(&dai(), STUB_POOL_ID)
            ))
        );
        assert!(registry.load::<User>(&address_to_hex(&alice())).is_none());
    }
}
