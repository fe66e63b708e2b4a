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
    entities::{PriceOracle, PriceOracleAsset},
    identifiers::{PRICE_ORACLE_ID, price_oracle_asset_id},
};

use crate::{registry::EntityRegistry, store::EntityStore};

impl<S: EntityStore> EntityRegistry<S> {
    /// Returns the price oracle singleton, creating it if absent.
    pub fn get_or_init_price_oracle(&mut self) -> PriceOracle {
        if let Some(oracle) = self.load::<PriceOracle>(PRICE_ORACLE_ID) {
            return oracle;
        }
        let oracle = PriceOracle::new();
        self.save(oracle.clone());
        oracle
    }

    /// Returns the oracle metadata of `asset`, creating it (and the oracle) if absent.
    pub fn get_or_init_price_oracle_asset(&mut self, asset: &Address) -> PriceOracleAsset {
        let id = price_oracle_asset_id(asset);
        if let Some(oracle_asset) = self.load::<PriceOracleAsset>(&id) {
            return oracle_asset;
        }
        let oracle = self.get_or_init_price_oracle();
        let oracle_asset = PriceOracleAsset::new(id, oracle.id);
        self.save(oracle_asset.clone());
        oracle_asset
    }
}

#[cfg(test)]
mod tests {
    use nautilus_lending_model::{
        SchemaConfig,
        entities::EntityKind,
        enums::{PriceOracleAssetPlatform, PriceOracleAssetType},
        stubs::{dai, weth},
    };
    use rstest::rstest;

    use super::*;
    use crate::store::InMemoryStore;

    #[rstest]
    fn test_oracle_asset_creates_singleton_once() {
        let mut registry = EntityRegistry::new(InMemoryStore::new(), SchemaConfig::default());
        let dai_asset = registry.get_or_init_price_oracle_asset(&dai());
        registry.get_or_init_price_oracle_asset(&weth());
        registry.get_or_init_price_oracle_asset(&dai());

        assert_eq!(dai_asset.oracle, PRICE_ORACLE_ID);
        assert_eq!(dai_asset.asset_type, PriceOracleAssetType::Simple);
        assert_eq!(dai_asset.platform, PriceOracleAssetPlatform::Simple);

        let store = registry.into_store();
        assert_eq!(store.count(EntityKind::PriceOracle), 1);
        assert_eq!(store.count(EntityKind::PriceOracleAsset), 2);
        assert_eq!(store.writes(), 3);
    }

    #[rstest]
    fn test_price_oracle_defaults() {
        let mut registry = EntityRegistry::new(InMemoryStore::new(), SchemaConfig::default());
        let oracle = registry.get_or_init_price_oracle();
        assert_eq!(oracle.version, 1);
        assert!(oracle.tokens_with_fallback.is_empty());
        assert_eq!(oracle.proxy_price_provider, Address::ZERO);
    }
}
