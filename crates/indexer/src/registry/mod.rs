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

//! Get-or-create access to the mutable entity state.
//!
//! The [`EntityRegistry`] is the only component which creates entities. Every `get_or_init_*`
//! operation loads a record by its derived key and, when absent, persists a fully defaulted
//! record before returning it. A second call therefore returns a value-equal record without
//! writing again.
//!
//! Creation fails only when a record it depends on is missing (an unmapped contract, a pool
//! that was never registered, a reserve that was never created). These checks run before the
//! first write of the operation.

use std::collections::HashSet;

use alloy_primitives::Address;
use nautilus_lending_model::{
    LendingError, LendingResult, SchemaConfig,
    entities::{ContractToPoolMapping, Pool, Protocol, Record},
    identifiers::{PROTOCOL_ID, address_to_hex, contract_mapping_id},
};

use crate::{config::PoolRegistration, store::EntityStore};

pub mod oracle;
pub mod reserve;
pub mod tokens;
pub mod user;

/// Get-or-create upserts over an [`EntityStore`].
#[derive(Debug)]
pub struct EntityRegistry<S: EntityStore> {
    pub(crate) store: S,
    pub(crate) schema: SchemaConfig,
}

impl<S: EntityStore> EntityRegistry<S> {
    /// Creates a new [`EntityRegistry`] instance.
    pub const fn new(store: S, schema: SchemaConfig) -> Self {
        Self { store, schema }
    }

    /// Returns the schema configuration.
    #[must_use]
    pub const fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// Returns a reference to the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the registry, returning the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Loads a typed record.
    #[must_use]
    pub fn load<R: Record>(&self, id: &str) -> Option<R> {
        self.store.load_record(id)
    }

    /// Saves a typed record.
    pub fn save<R: Record>(&mut self, record: R) {
        self.store.save_record(record);
    }

    /// Returns the protocol singleton, creating it if absent.
    pub fn get_or_init_protocol(&mut self) -> Protocol {
        if let Some(protocol) = self.load::<Protocol>(PROTOCOL_ID) {
            return protocol;
        }
        let protocol = Protocol::new();
        self.save(protocol.clone());
        protocol
    }

    /// Resolves the pool id owning events emitted by `contract`.
    ///
    /// # Errors
    ///
    /// Returns [`LendingError::UnregisteredContract`] if the contract has no mapping.
    pub fn get_pool_by_contract(&self, contract: &Address) -> LendingResult<String> {
        let id = contract_mapping_id(contract);
        self.load::<ContractToPoolMapping>(&id)
            .map(|mapping| mapping.pool)
            .ok_or(LendingError::UnregisteredContract(id))
    }

    /// Routes events of `contract` to `pool`.
    ///
    /// The pool record itself is not required to exist.
    ///
    /// # Errors
    ///
    /// Returns [`LendingError::DuplicateRegistration`] if the contract is already mapped.
    pub fn create_map_contract_to_pool(
        &mut self,
        contract: &Address,
        pool: &str,
    ) -> LendingResult<()> {
        let id = contract_mapping_id(contract);
        if self.store.contains(ContractToPoolMapping::KIND, &id) {
            tracing::error!("Contract {id} is already registered in the protocol");
            return Err(LendingError::DuplicateRegistration(id));
        }
        self.save(ContractToPoolMapping::new(id, pool));
        Ok(())
    }

    /// Registers a pool: the protocol singleton, the unpaused pool record and the routing of
    /// each of its contracts.
    ///
    /// # Errors
    ///
    /// Returns [`LendingError::DuplicateRegistration`] if the pool or one of its contracts is
    /// already registered. Nothing is written in that case.
    pub fn register_pool(&mut self, registration: &PoolRegistration) -> LendingResult<Pool> {
        let pool_id = registration.pool_id.as_str();
        if self.store.contains(Pool::KIND, pool_id) {
            return Err(LendingError::DuplicateRegistration(pool_id.to_string()));
        }

        let contracts = registration.mapped_contracts();
        let mut seen = HashSet::with_capacity(contracts.len());
        for contract in &contracts {
            let id = contract_mapping_id(contract);
            if !seen.insert(*contract) || self.store.contains(ContractToPoolMapping::KIND, &id) {
                return Err(LendingError::DuplicateRegistration(id));
            }
        }

        let protocol = self.get_or_init_protocol();
        let mut pool = Pool::new(
            pool_id,
            registration.lending_pool,
            registration.configurator,
        );
        pool.protocol = protocol.id;
        self.save(pool.clone());

        for contract in &contracts {
            self.create_map_contract_to_pool(contract, pool_id)?;
        }

        tracing::info!(
            "Registered pool {pool_id} (lending_pool={}, contracts={})",
            address_to_hex(&registration.lending_pool),
            contracts.len()
        );
        Ok(pool)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
