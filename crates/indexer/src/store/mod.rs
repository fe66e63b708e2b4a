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

//! Keyed entity storage.
//!
//! The projection only ever needs two primitives from its host store: load a record by
//! (kind, id), returning `None` when absent, and save a record, replacing any previous value.
//! [`EntityStore`] captures exactly that. [`InMemoryStore`] is the reference implementation
//! and [`StoreTransaction`] stages the writes of one event on top of any store.

use nautilus_lending_model::entities::{Entity, EntityKind, Record};

pub mod memory;
pub mod transaction;

// Re-exports
pub use memory::InMemoryStore;
pub use transaction::StoreTransaction;

/// A load/save keyed store of [`Entity`] records.
pub trait EntityStore {
    /// Loads the record of `kind` stored under `id`, or `None` if absent.
    fn load(&self, kind: EntityKind, id: &str) -> Option<Entity>;

    /// Saves `entity` under its kind and id, replacing any previous value.
    fn save(&mut self, entity: Entity);

    /// Returns whether a record of `kind` is stored under `id`.
    fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.load(kind, id).is_some()
    }

    /// Loads a typed record stored under `id`.
    fn load_record<R: Record>(&self, id: &str) -> Option<R>
    where
        Self: Sized,
    {
        self.load(R::KIND, id).and_then(R::from_entity)
    }

    /// Saves a typed record.
    fn save_record<R: Record>(&mut self, record: R)
    where
        Self: Sized,
    {
        self.save(record.into_entity());
    }
}

impl<T: EntityStore + ?Sized> EntityStore for &mut T {
    fn load(&self, kind: EntityKind, id: &str) -> Option<Entity> {
        (**self).load(kind, id)
    }

    fn save(&mut self, entity: Entity) {
        (**self).save(entity);
    }

    fn contains(&self, kind: EntityKind, id: &str) -> bool {
        (**self).contains(kind, id)
    }
}
