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

//! Protocol, pool and contract-to-pool mapping records.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{events::EventPosition, identifiers::PROTOCOL_ID};

/// The protocol singleton every pool belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    /// Always [`PROTOCOL_ID`].
    pub id: String,
}

impl Protocol {
    /// Creates the protocol singleton.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: PROTOCOL_ID.to_string(),
        }
    }
}

impl Default for Protocol {
    fn default() -> Self {
        Self::new()
    }
}

/// One lending pool deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// The externally assigned pool id.
    pub id: String,
    /// The owning protocol id.
    pub protocol: String,
    /// The lending pool contract.
    pub lending_pool: Address,
    /// The pool configurator contract, if known.
    pub configurator: Option<Address>,
    /// Whether the pool is paused.
    pub paused: bool,
    /// The position of the last applied pause or unpause event.
    #[serde(default)]
    pub pause_updated_at: Option<EventPosition>,
}

impl Pool {
    /// Creates a new unpaused [`Pool`] instance.
    #[must_use]
    pub fn new(id: impl Into<String>, lending_pool: Address, configurator: Option<Address>) -> Self {
        Self {
            id: id.into(),
            protocol: PROTOCOL_ID.to_string(),
            lending_pool,
            configurator,
            paused: false,
            pause_updated_at: None,
        }
    }

    /// Applies a pause state change emitted at `position`.
    ///
    /// Returns `false` and leaves the pool unchanged if a change at the same or a later
    /// position was already applied.
    pub fn set_paused(&mut self, paused: bool, position: EventPosition) -> bool {
        if self.pause_updated_at.is_some_and(|last| position <= last) {
            return false;
        }
        self.paused = paused;
        self.pause_updated_at = Some(position);
        true
    }
}

/// Routes events of a contract to the pool it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractToPoolMapping {
    /// The lowercase hex address of the contract.
    pub id: String,
    /// The pool id.
    pub pool: String,
}

impl ContractToPoolMapping {
    /// Creates a new [`ContractToPoolMapping`] instance.
    #[must_use]
    pub fn new(id: impl Into<String>, pool: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pool: pool.into(),
        }
    }
}
