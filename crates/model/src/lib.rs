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

//! Domain model for projecting lending-pool contract events into a keyed entity graph.
//!
//! The `nautilus-lending-model` crate holds everything that is pure and stateless about the
//! projection:
//!
//! - Key derivation for entities and history records.
//! - Ray/wad fixed-point math and linear interest accrual.
//! - Closed enumerations decoded from raw event integers.
//! - Entity records (pools, reserves, users, positions, oracle metadata, token wrappers).
//! - Append-only history records (user actions and reserve snapshots).
//! - Typed event records as delivered by the decoding layer.
//! - The schema configuration that selects optional entity sections.
//!
//! # Feature flags
//!
//! - `stubs`: Enables type stubs and `rstest` fixtures for use in downstream tests.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod entities;
pub mod enums;
pub mod error;
pub mod events;
pub mod history;
pub mod identifiers;
pub mod math;
pub mod schema;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

// Re-exports
pub use crate::{
    error::{LendingError, LendingResult},
    events::{EventMeta, EventPosition, LendingPoolEvent},
    schema::SchemaConfig,
};
