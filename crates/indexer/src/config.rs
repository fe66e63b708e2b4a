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

use std::path::Path;

use alloy_primitives::Address;
use anyhow::Context;
use nautilus_lending_model::SchemaConfig;
use serde::{Deserialize, Serialize};

/// Registration of one lending pool deployment and the contracts whose events it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRegistration {
    /// The externally assigned pool id.
    pub pool_id: String,
    /// The lending pool contract.
    pub lending_pool: Address,
    /// The pool configurator contract.
    #[serde(default)]
    pub configurator: Option<Address>,
    /// Further contracts emitting events for this pool.
    #[serde(default)]
    pub contracts: Vec<Address>,
}

impl PoolRegistration {
    /// Creates a new [`PoolRegistration`] instance.
    #[must_use]
    pub fn new(
        pool_id: impl Into<String>,
        lending_pool: Address,
        configurator: Option<Address>,
        contracts: Vec<Address>,
    ) -> Self {
        Self {
            pool_id: pool_id.into(),
            lending_pool,
            configurator,
            contracts,
        }
    }

    /// Returns every contract to route to the pool, lending pool first.
    #[must_use]
    pub fn mapped_contracts(&self) -> Vec<Address> {
        std::iter::once(self.lending_pool)
            .chain(self.configurator)
            .chain(self.contracts.iter().copied())
            .collect()
    }
}

/// Configuration for the lending pool indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// The optional entity sections to maintain.
    pub schema: SchemaConfig,
    /// Whether events at or before the last applied position are skipped.
    pub skip_processed_events: bool,
    /// Pools registered before any event is processed.
    pub pools: Vec<PoolRegistration>,
}

impl Default for IndexerConfig {
    /// Creates a default configuration with:
    /// - schema: extended
    /// - skip_processed_events: true
    /// - pools: none
    fn default() -> Self {
        Self {
            schema: SchemaConfig::default(),
            skip_processed_events: true,
            pools: Vec::new(),
        }
    }
}

impl IndexerConfig {
    /// Creates a new [`IndexerConfig`] instance.
    #[must_use]
    pub fn new(
        schema: SchemaConfig,
        skip_processed_events: bool,
        pools: Vec<PoolRegistration>,
    ) -> Self {
        Self {
            schema,
            skip_processed_events,
            pools,
        }
    }

    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid configuration.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse indexer configuration")
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
    }
}
