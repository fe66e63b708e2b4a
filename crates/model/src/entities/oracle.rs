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

//! Price oracle metadata records.
//!
//! Only metadata is projected here. `price_in_eth` and `usd_price_eth` stay at their defaults
//! unless a price feed writes them.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{
    enums::{PriceOracleAssetPlatform, PriceOracleAssetType},
    events::EventPosition,
    identifiers::PRICE_ORACLE_ID,
};

/// Version of the oracle record layout.
pub const PRICE_ORACLE_VERSION: u32 = 1;

/// The price oracle singleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceOracle {
    /// Always [`PRICE_ORACLE_ID`].
    pub id: String,
    /// The proxy price provider contract.
    pub proxy_price_provider: Address,
    /// USD price of ETH (18 decimals).
    pub usd_price_eth: U256,
    /// The main source of the USD/ETH price.
    pub usd_price_eth_main_source: Address,
    /// Whether the USD/ETH price requires the fallback oracle.
    pub usd_price_eth_fallback_required: bool,
    /// The fallback oracle contract.
    pub fallback_price_oracle: Address,
    /// Ids of assets currently priced through the fallback oracle.
    pub tokens_with_fallback: Vec<String>,
    /// Timestamp of the last oracle update.
    pub last_update_timestamp: u64,
    /// Ids of assets whose price depends on the USD/ETH price.
    pub usd_dependent_assets: Vec<String>,
    /// Layout version.
    pub version: u32,
    /// The base currency of quoted prices.
    pub base_currency: Address,
    /// One unit of the base currency.
    pub base_currency_unit: U256,
}

impl PriceOracle {
    /// Creates the oracle singleton with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: PRICE_ORACLE_ID.to_string(),
            proxy_price_provider: Address::ZERO,
            usd_price_eth: U256::ZERO,
            usd_price_eth_main_source: Address::ZERO,
            usd_price_eth_fallback_required: false,
            fallback_price_oracle: Address::ZERO,
            tokens_with_fallback: Vec::new(),
            last_update_timestamp: 0,
            usd_dependent_assets: Vec::new(),
            version: PRICE_ORACLE_VERSION,
            base_currency: Address::ZERO,
            base_currency_unit: U256::ZERO,
        }
    }
}

impl Default for PriceOracle {
    fn default() -> Self {
        Self::new()
    }
}

/// Oracle metadata of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceOracleAsset {
    /// The lowercase hex address of the asset.
    pub id: String,
    /// The oracle id.
    pub oracle: String,
    /// The price source contract.
    pub price_source: Address,
    /// Ids of assets priced from this one.
    pub dependent_assets: Vec<String>,
    /// How the asset is priced.
    #[serde(rename = "type")]
    pub asset_type: PriceOracleAssetType,
    /// The platform of the price source.
    pub platform: PriceOracleAssetPlatform,
    /// Price in ETH (18 decimals).
    pub price_in_eth: U256,
    /// Whether the asset is priced through the fallback oracle.
    pub is_fallback_required: bool,
    /// Timestamp of the last price update.
    pub last_update_timestamp: u64,
    /// Whether the source was set by the Chainlink sources registry.
    pub from_chainlink_sources_registry: bool,
    /// The position of the last applied source update.
    #[serde(default)]
    pub source_updated_at: Option<EventPosition>,
}

impl PriceOracleAsset {
    /// Creates a new [`PriceOracleAsset`] with default values, attached to `oracle`.
    #[must_use]
    pub fn new(id: impl Into<String>, oracle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            oracle: oracle.into(),
            price_source: Address::ZERO,
            dependent_assets: Vec::new(),
            asset_type: PriceOracleAssetType::Simple,
            platform: PriceOracleAssetPlatform::Simple,
            price_in_eth: U256::ZERO,
            is_fallback_required: false,
            last_update_timestamp: 0,
            from_chainlink_sources_registry: false,
            source_updated_at: None,
        }
    }
}
