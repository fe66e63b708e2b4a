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

//! Events emitted by the price oracle contract.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::events::EventMeta;

/// The price source of an asset was configured on the price oracle.
///
/// Only the oracle metadata is projected; prices themselves come from the feed ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSourceUpdatedEvent {
    /// The on-chain coordinates of the event.
    pub meta: EventMeta,
    /// The asset whose source changed.
    pub asset: Address,
    /// The new price source contract.
    pub source: Address,
    /// The raw asset type (1 = simple, 2 = composite).
    pub asset_type: U256,
    /// The raw source platform (1 = simple, 2 = uniswap, 3 = balancer, 4 = gelato).
    pub platform: U256,
}
