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

use indexmap::IndexMap;
use nautilus_lending_model::entities::{Entity, EntityKind};

use crate::store::EntityStore;

/// Stages the writes of one event on top of a store.
///
/// Loads see staged writes first. Staged writes reach the underlying store only through
/// [`StoreTransaction::commit`]; dropping the transaction discards them.
#[derive(Debug)]
pub struct StoreTransaction<'a, S: EntityStore + ?Sized> {
    inner: &'a mut S,
    staged: IndexMap<(EntityKind, String), Entity>,
}

impl<'a, S: EntityStore + ?Sized> StoreTransaction<'a, S> {
    /// Opens a new transaction over `inner`.
    pub fn new(inner: &'a mut S) -> Self {
        Self {
            inner,
            staged: IndexMap::new(),
        }
    }

    /// Returns the number of distinct records staged.
    #[must_use]
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Writes all staged records to the underlying store in first-write order.
    ///
    /// Returns the number of records written.
    pub fn commit(self) -> usize {
        let count = self.staged.len();
        for (_, entity) in self.staged {
            self.inner.save(entity);
        }
        count
    }
}

impl<S: EntityStore + ?Sized> EntityStore for StoreTransaction<'_, S> {
    fn load(&self, kind: EntityKind, id: &str) -> Option<Entity> {
        self.staged
            .get(&(kind, id.to_string()))
            .cloned()
            .or_else(|| self.inner.load(kind, id))
    }

    fn save(&mut self, entity: Entity) {
        self.staged
            .insert((entity.kind(), entity.id().to_string()), entity);
    }
}

#[cfg(test)]
mod tests {
    use nautilus_lending_model::entities::User;
    use rstest::rstest;

    use super::*;
    use crate::store::InMemoryStore;

    #[rstest]
    fn test_staged_writes_visible_before_commit() {
        let mut store = InMemoryStore::new();
        let mut tx = StoreTransaction::new(&mut store);
        tx.save_record(User::new("0xaa"));

        assert!(tx.load_record::<User>("0xaa").is_some());
        assert_eq!(tx.staged_len(), 1);
        assert_eq!(tx.commit(), 1);
        assert!(store.load_record::<User>("0xaa").is_some());
    }

    #[rstest]
    fn test_drop_discards_staged_writes() {
        let mut store = InMemoryStore::new();
        {
            let mut tx = StoreTransaction::new(&mut store);
            tx.save_record(User::new("0xaa"));
        }
        assert!(store.is_empty());
        assert_eq!(store.writes(), 0);
    }

    #[rstest]
    fn test_repeated_saves_commit_once() {
        let mut store = InMemoryStore::new();
        let mut tx = StoreTransaction::new(&mut store);
        tx.save_record(User::new("0xaa"));
        let mut user = User::new("0xaa");
        user.borrowed_reserves_count = 1;
        tx.save_record(user.clone());
        tx.commit();

        assert_eq!(store.writes(), 1);
        assert_eq!(store.load_record::<User>("0xaa"), Some(user));
    }
}
