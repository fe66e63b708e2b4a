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

use std::collections::BTreeMap;

use nautilus_lending_model::entities::{Entity, EntityKind, Record};
use serde::{Deserialize, Serialize};

use crate::store::EntityStore;

/// An in-memory [`EntityStore`] ordered by (kind, id).
///
/// Iteration order is deterministic, so two stores fed the same events produce identical
/// snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryStore {
    entities: BTreeMap<EntityKind, BTreeMap<String, Entity>>,
    #[serde(skip)]
    writes: u64,
}

impl InMemoryStore {
    /// Creates a new empty [`InMemoryStore`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.values().map(BTreeMap::len).sum()
    }

    /// Returns whether the store holds no record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of records of `kind`.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.get(&kind).map_or(0, BTreeMap::len)
    }

    /// Returns the number of saves applied since creation.
    #[must_use]
    pub const fn writes(&self) -> u64 {
        self.writes
    }

    /// Returns all typed records of `R`, ordered by id.
    #[must_use]
    pub fn records<R: Record>(&self) -> Vec<R> {
        self.entities
            .get(&R::KIND)
            .map(|records| {
                records
                    .values()
                    .cloned()
                    .filter_map(R::from_entity)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns an iterator over every stored record, ordered by (kind, id).
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values().flat_map(BTreeMap::values)
    }

    /// Serializes all records to pretty JSON, grouped by kind.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entities)
    }
}

// Stores compare by content; the write counter is bookkeeping.
impl PartialEq for InMemoryStore {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities
    }
}

impl Eq for InMemoryStore {}

impl EntityStore for InMemoryStore {
    fn load(&self, kind: EntityKind, id: &str) -> Option<Entity> {
        self.entities
            .get(&kind)
            .and_then(|records| records.get(id))
            .cloned()
    }

    fn save(&mut self, entity: Entity) {
        self.writes += 1;
        self.entities
            .entry(entity.kind())
            .or_default()
            .insert(entity.id().to_string(), entity);
    }

    fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.entities
            .get(&kind)
            .is_some_and(|records| records.contains_key(id))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
