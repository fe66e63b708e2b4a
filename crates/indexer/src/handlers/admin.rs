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
    EventMeta, LendingResult,
    entities::Pool,
    events::{PausedEvent, UnpausedEvent},
};

use crate::{registry::EntityRegistry, store::EntityStore};

/// Handles a `Paused` event.
///
/// # Errors
///
/// Returns an error if the emitting contract is not mapped to a pool.
pub fn handle_paused<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &PausedEvent,
) -> LendingResult<()> {
    set_paused(registry, &event.meta, true)
}

/// Handles an `Unpaused` event.
///
/// # Errors
///
/// Returns an error if the emitting contract is not mapped to a pool.
pub fn handle_unpaused<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &UnpausedEvent,
) -> LendingResult<()> {
    set_paused(registry, &event.meta, false)
}

fn set_paused<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    meta: &EventMeta,
    paused: bool,
) -> LendingResult<()> {
    let pool_id = registry.get_pool_by_contract(&meta.contract)?;
    let Some(mut pool) = registry.load::<Pool>(&pool_id) else {
        tracing::warn!("Pool {pool_id} does not exist, ignoring paused={paused}");
        return Ok(());
    };
    if !pool.set_paused(paused, meta.position()) {
        tracing::debug!("Pool {pool_id} pause state is newer than {}", meta.position());
        return Ok(());
    }
    registry.save(pool);
    Ok(())
}

#[cfg(test)]
mod tests {
    use nautilus_lending_model::{
        LendingError, SchemaConfig,
        entities::EntityKind,
        identifiers::address_to_hex,
        stubs::{STUB_POOL_ID, event_meta, lending_pool_address},
    };
    use rstest::rstest;

    use super::*;
    use crate::{config::PoolRegistration, store::InMemoryStore};

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

    fn later(meta: &EventMeta) -> EventMeta {
        let mut meta = meta.clone();
        meta.log_index += 1;
        meta
    }

    #[rstest]
    fn test_paused_toggles(event_meta: EventMeta) {
        let mut registry = registry();
        let paused = PausedEvent {
            meta: event_meta.clone(),
        };

        handle_paused(&mut registry, &paused).unwrap();
        let pool = registry.load::<Pool>(STUB_POOL_ID).unwrap();
        assert!(pool.paused);
        assert_eq!(pool.pause_updated_at, Some(event_meta.position()));

        let unpaused = UnpausedEvent {
            meta: later(&event_meta),
        };
        handle_unpaused(&mut registry, &unpaused).unwrap();
        assert!(!registry.load::<Pool>(STUB_POOL_ID).unwrap().paused);
    }

    #[rstest]
    fn test_older_pause_does_not_override_newer_unpause(event_meta: EventMeta) {
        let mut registry = registry();
        let paused = PausedEvent {
            meta: event_meta.clone(),
        };
        handle_paused(&mut registry, &paused).unwrap();
        handle_unpaused(
            &mut registry,
            &UnpausedEvent {
                meta: later(&event_meta),
            },
        )
        .unwrap();
        let writes = registry.store().writes();

        handle_paused(&mut registry, &paused).unwrap();

        assert!(!registry.load::<Pool>(STUB_POOL_ID).unwrap().paused);
        assert_eq!(registry.store().writes(), writes);
    }

    #[rstest]
    fn test_paused_on_unmapped_contract_fails(event_meta: EventMeta) {
        let mut registry = EntityRegistry::new(InMemoryStore::new(), SchemaConfig::default());
        let result = handle_paused(&mut registry, &PausedEvent { meta: event_meta });

        assert_eq!(
            result,
            Err(LendingError::UnregisteredContract(address_to_hex(
                &lending_pool_address()
            )))
        );
        assert_eq!(registry.store().count(EntityKind::Pool), 0);
    }
}
