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

//! Append-only history records keyed by event coordinates.

use alloy_primitives::U256;
use nautilus_lending_model::{
    EventMeta, LendingError, LendingResult,
    entities::{PriceOracleAsset, Record, Reserve},
    history::{ReserveConfigurationHistoryItem, ReserveParamsHistoryItem},
    identifiers::{reserve_configuration_history_item_id, reserve_params_history_item_id},
};

use crate::{registry::EntityRegistry, store::EntityStore};

impl<S: EntityStore> EntityRegistry<S> {
    /// Appends a history record.
    ///
    /// Appending a record whose id already exists is a no-op when the stored record is equal.
    ///
    /// # Errors
    ///
    /// Returns [`LendingError::ConflictingHistoryRecord`] if a different record exists under
    /// the same id.
    pub fn append_history<R>(&mut self, record: R) -> LendingResult<()>
    where
        R: Record + PartialEq,
    {
        match self.load::<R>(record.id()) {
            Some(existing) if existing == record => {
                tracing::debug!("{} {} already recorded", R::KIND, record.id());
                Ok(())
            }
            Some(_) => Err(LendingError::ConflictingHistoryRecord {
                kind: R::KIND.as_str(),
                id: record.id().to_string(),
            }),
            None => {
                self.save(record);
                Ok(())
            }
        }
    }

    /// Returns whether the history record `id` exists, meaning its event was already applied.
    #[must_use]
    pub fn already_recorded<R: Record>(&self, id: &str) -> bool {
        let recorded = self.store.contains(R::KIND, id);
        if recorded {
            tracing::debug!("{} {id} already applied, skipping", R::KIND);
        }
        recorded
    }

    /// Returns the params history item of `reserve` at `meta`, or a zeroed one if absent.
    #[must_use]
    pub fn get_or_init_reserve_params_history_item(
        &self,
        meta: &EventMeta,
        reserve: &Reserve,
    ) -> ReserveParamsHistoryItem {
        let id = reserve_params_history_item_id(meta, &reserve.id);
        self.load::<ReserveParamsHistoryItem>(&id)
            .unwrap_or_else(|| ReserveParamsHistoryItem::new(id, &reserve.id, &self.schema))
    }

    /// Snapshots the current parameters of `reserve` at `meta`.
    ///
    /// # Errors
    ///
    /// Returns an error if a different snapshot already exists for this event.
    pub fn record_reserve_params(
        &mut self,
        meta: &EventMeta,
        reserve: &Reserve,
    ) -> LendingResult<()> {
        let price_in_eth = self
            .load::<PriceOracleAsset>(&reserve.price)
            .map_or(U256::ZERO, |asset| asset.price_in_eth);

        let mut item = self.get_or_init_reserve_params_history_item(meta, reserve);
        item.capture(reserve, price_in_eth, meta.block_timestamp);
        self.append_history(item)
    }

    /// Returns the configuration history item at `meta`, or a default one if absent.
    #[must_use]
    pub fn get_or_init_reserve_configuration_history_item(
        &self,
        meta: &EventMeta,
        reserve: &Reserve,
    ) -> ReserveConfigurationHistoryItem {
        let id = reserve_configuration_history_item_id(meta);
        self.load::<ReserveConfigurationHistoryItem>(&id)
            .unwrap_or_else(|| ReserveConfigurationHistoryItem::new(id, &reserve.id, &self.schema))
    }

    /// Snapshots the current configuration of `reserve` at `meta`.
    ///
    /// # Errors
    ///
    /// Returns an error if a different snapshot already exists for this event.
    pub fn record_reserve_configuration(
        &mut self,
        meta: &EventMeta,
        reserve: &Reserve,
    ) -> LendingResult<()> {
        let mut item = self.get_or_init_reserve_configuration_history_item(meta, reserve);
        item.capture(reserve, meta.block_timestamp);
        self.append_history(item)
    }
}
