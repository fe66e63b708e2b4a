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

//! Incremental state reconstruction for lending pool deployments.
//!
//! The `nautilus-lending-indexer` crate applies decoded lending pool events, strictly ordered by
//! block number, transaction index and log index, to a keyed entity store:
//!
//! - [`store`]: the injected [`EntityStore`](store::EntityStore) interface, an in-memory store
//!   and the per-event transaction.
//! - [`registry`]: get-or-create upserts with lazy creation chains.
//! - [`history`]: append-only action records and reserve snapshots.
//! - [`handlers`]: one handler per event kind.
//! - [`indexer`]: the sequential dispatcher with replay tolerance.
//! - [`config`]: TOML configuration of the schema and the registered pools.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod handlers;
pub mod history;
pub mod indexer;
pub mod registry;
pub mod store;


pub use crate::{
    config::{IndexerConfig, PoolRegistration},
    indexer::{IndexerStats, LendingPoolIndexer, ProcessOutcome},
    store::{EntityStore, InMemoryStore},
};
