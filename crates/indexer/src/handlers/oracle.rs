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
    LendingResult,
    enums::{PriceOracleAssetPlatform, PriceOracleAssetType},
    events::AssetSourceUpdatedEvent,
};

use crate::{registry::EntityRegistry, store::EntityStore};

/// Handles an `AssetSourceUpdated` event of the price oracle.
///
/// The oracle is shared by every pool, so the emitting contract needs no pool mapping. An
/// unknown platform is recorded as [`PriceOracleAssetPlatform::Error`]. An update at or
/// before the last applied one leaves the asset unchanged.
///
/// # Errors
///
/// Returns [`LendingError::InvalidOracleAssetType`](nautilus_lending_model::LendingError)
/// before any write if the asset type is unknown.
pub fn handle_asset_source_updated<S: EntityStore>(
    registry: &mut EntityRegistry<S>,
    event: &AssetSourceUpdatedEvent,
) -> LendingResult<()> {
    let asset_type = PriceOracleAssetType::from_raw(event.asset_type)?;
    let platform = PriceOracleAssetPlatform::from_raw_lenient(event.platform);

    let position = event.meta.position();
    let mut oracle_asset = registry.get_or_init_price_oracle_asset(&event.asset);
    if oracle_asset
        .source_updated_at
        .is_some_and(|last| position <= last)
    {
        tracing::debug!("Source of {} is newer than {position}", oracle_asset.id);
        return Ok(());
    }
    oracle_asset.source_updated_at = Some(position);
    oracle_asset.price_source = event.source;
    oracle_asset.asset_type = asset_type;
    oracle_asset.platform = platform;
    registry.save(oracle_asset);
    Ok(())
}
