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

//! Sequential event dispatcher.
//!
//! Each event is one logical transaction: the handler runs against a [`StoreTransaction`]
//! which is committed when the handler succeeds and dropped when it fails, so a failed event
//! leaves the store untouched.

use std::fmt::Display;

use nautilus_lending_model::{
    EventPosition, LendingError, LendingPoolEvent, LendingResult, entities::Pool,
};

use crate::{
    config::{IndexerConfig, PoolRegistration},
    handlers::handle_event,
    registry::EntityRegistry,
    store::{EntityStore, InMemoryStore, StoreTransaction},
};

/// The result of submitting an event to [`LendingPoolIndexer::process`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The event was applied and its writes committed.
    Applied,
    /// The event is at or before the last applied position and was not applied again.
    Skipped,
}

/// Counters of processed events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexerStats {
    /// Events applied.
    pub applied: u64,
    /// Events skipped as already processed.
    pub skipped: u64,
    /// Events which failed and were discarded.
    pub failed: u64,
    /// Entity writes committed.
    pub writes: usize,
}

impl Display for IndexerStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IndexerStats(applied={}, skipped={}, failed={}, writes={})",
            self.applied, self.skipped, self.failed, self.writes
        )
    }
}

/// Projects lending pool events into entities held by an [`EntityStore`].
#[derive(Debug)]
pub struct LendingPoolIndexer<S: EntityStore = InMemoryStore> {
    store: S,
    config: IndexerConfig,
    last_processed: Option<EventPosition>,
    stats: IndexerStats,
}

impl<S: EntityStore> LendingPoolIndexer<S> {
    /// Creates a new [`LendingPoolIndexer`] instance.
    pub const fn new(store: S, config: IndexerConfig) -> Self {
        Self {
            store,
            config,
            last_processed: None,
            stats: IndexerStats {
                applied: 0,
                skipped: 0,
                failed: 0,
                writes: 0,
            },
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Returns the processing counters.
    #[must_use]
    pub const fn stats(&self) -> IndexerStats {
        self.stats
    }

    /// Returns the position of the last applied event.
    #[must_use]
    pub const fn last_processed(&self) -> Option<EventPosition> {
        self.last_processed
    }

    /// Returns a reference to the store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the indexer, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Registers every pool of the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a pool or one of its contracts is already registered. Pools
    /// registered before the failing one remain registered.
    pub fn register_pools(&mut self) -> LendingResult<Vec<Pool>> {
        let registrations = self.config.pools.clone();
        registrations
            .iter()
            .map(|registration| self.register_pool(registration))
            .collect()
    }

    /// Registers a single pool and the routing of its contracts.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool or one of its contracts is already registered.
    pub fn register_pool(&mut self, registration: &PoolRegistration) -> LendingResult<Pool> {
        let schema = self.config.schema;
        let mut tx = StoreTransaction::new(&mut self.store);
        let pool = EntityRegistry::new(&mut tx, schema).register_pool(registration)?;
        self.stats.writes += tx.commit();
        Ok(pool)
    }

    /// Applies `event` as one transaction.
    ///
    /// # Errors
    ///
    /// Returns the handler error; none of the event's writes are committed in that case.
    pub fn process(&mut self, event: &LendingPoolEvent) -> LendingResult<ProcessOutcome> {
        let position = event.position();
        if self.config.skip_processed_events
            && self.last_processed.is_some_and(|last| position <= last)
        {
            tracing::debug!("Skipping already processed {event}");
            self.stats.skipped += 1;
            return Ok(ProcessOutcome::Skipped);
        }

        let schema = self.config.schema;
        let mut tx = StoreTransaction::new(&mut self.store);
        let result = handle_event(&mut EntityRegistry::new(&mut tx, schema), event);
        if let Err(e) = result {
            tracing::debug!("Discarding {} staged writes of {event}", tx.staged_len());
            self.stats.failed += 1;
            return Err(e);
        }
        self.stats.writes += tx.commit();
        self.stats.applied += 1;

        if self.last_processed.is_none_or(|last| position > last) {
            self.last_processed = Some(position);
        }
        Ok(ProcessOutcome::Applied)
    }

    /// Applies `events` in order, returning the events which failed with their errors.
    ///
    /// A failed event does not stop the replay.
    pub fn process_all<'a, I>(
        &mut self,
        events: I,
    ) -> Vec<(&'a LendingPoolEvent, LendingError)>
    where
        I: IntoIterator<Item = &'a LendingPoolEvent>,
    {
        let failures: Vec<_> = events
            .into_iter()
            .filter_map(|event| self.process(event).err().map(|e| (event, e)))
            .collect();
        tracing::info!("Replay complete: {}", self.stats);
        failures
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use nautilus_lending_model::{
        SchemaConfig,
        stubs::{self, STUB_POOL_ID, alice, dai, lending_pool_address},
    };
    use rstest::rstest;

    use super::*;

    fn config(skip_processed_events: bool) -> IndexerConfig {
        IndexerConfig::new(
            SchemaConfig::default(),
            skip_processed_events,
            vec![PoolRegistration::new(
                STUB_POOL_ID,
                lending_pool_address(),
                None,
                vec![],
            )],
        )
    }

    fn deposit_at(log_index: u32) -> LendingPoolEvent {
        let meta = stubs::stub_meta(
            lending_pool_address(),
            18_000_000,
            1,
            log_index,
            stubs::STUB_TIMESTAMP,
        );
        LendingPoolEvent::Deposit(stubs::deposit(meta, dai(), alice(), U256::from(1)))
    }

    #[rstest]
    fn test_register_pools_counts_writes() {
        let mut indexer = LendingPoolIndexer::new(InMemoryStore::new(), config(true));
        let pools = indexer.register_pools().unwrap();

        assert_eq!(pools.len(), 1);
        assert_eq!(indexer.stats().writes, 3);
        assert_eq!(indexer.store().writes(), 3);
    }

    #[rstest]
    fn test_process_tracks_last_position() {
        let mut indexer = LendingPoolIndexer::new(InMemoryStore::new(), config(true));
        indexer.register_pools().unwrap();

        let event = deposit_at(5);
        assert_eq!(indexer.process(&event), Ok(ProcessOutcome::Applied));
        assert_eq!(indexer.last_processed(), Some(event.position()));
        assert_eq!(indexer.process(&event), Ok(ProcessOutcome::Skipped));
        assert_eq!(indexer.process(&deposit_at(4)), Ok(ProcessOutcome::Skipped));
        assert_eq!(indexer.stats().skipped, 2);
    }

    #[rstest]
    fn test_process_without_skipping_is_idempotent() {
        let mut indexer = LendingPoolIndexer::new(InMemoryStore::new(), config(false));
        indexer.register_pools().unwrap();

        let event = deposit_at(5);
        indexer.process(&event).unwrap();
        let snapshot = indexer.store().clone();
        assert_eq!(indexer.process(&event), Ok(ProcessOutcome::Applied));
        assert_eq!(indexer.store(), &snapshot);
    }

    #[rstest]
    fn test_failed_event_is_counted_and_discarded() {
        let mut indexer = LendingPoolIndexer::new(InMemoryStore::new(), config(true));

        let result = indexer.process(&deposit_at(1));

        assert!(matches!(result, Err(LendingError::UnregisteredContract(_))));
        assert_eq!(indexer.stats().failed, 1);
        assert!(indexer.store().is_empty());
        assert_eq!(indexer.last_processed(), None);
    }
}
