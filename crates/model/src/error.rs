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

//! Error type shared by the projection.

use thiserror::Error;

/// Represents errors that abort the application of a single lending-pool event.
///
/// None of these are retried internally. The event is rejected as a whole and any writes
/// staged for it are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendingError {
    /// Occurs when an event is emitted by a contract that has no pool mapping.
    #[error("Contract {0} is not registered in ContractToPoolMapping")]
    UnregisteredContract(String),
    /// Occurs when a contract or pool is registered a second time.
    #[error("{0} is already registered in the protocol")]
    DuplicateRegistration(String),
    /// Occurs when a decoded borrow rate mode is outside the known range.
    #[error("Invalid borrow rate mode {0}")]
    InvalidBorrowMode(String),
    /// Occurs when a decoded oracle asset type is outside the known range.
    #[error("Invalid price oracle asset type {0}")]
    InvalidOracleAssetType(String),
    /// Occurs when a decoded oracle asset platform is outside the known range.
    #[error("Invalid price oracle asset platform {0}")]
    InvalidOraclePlatform(String),
    /// Occurs when an entity required to exist has not been created yet.
    #[error("Missing dependency: {entity} '{id}' does not exist")]
    MissingDependency {
        /// The kind of entity that was expected.
        entity: &'static str,
        /// The key that was looked up.
        id: String,
    },
    /// Occurs when an append-only history record would be overwritten with different content.
    #[error("Conflicting {kind} history record '{id}'")]
    ConflictingHistoryRecord {
        /// The kind of history record.
        kind: &'static str,
        /// The history record key.
        id: String,
    },
    /// Occurs when fixed-point arithmetic exceeds 256 bits or divides by zero.
    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),
}

/// A specialized `Result` for lending-pool projection operations.
pub type LendingResult<T> = Result<T, LendingError>;

impl LendingError {
    /// Creates a [`LendingError::MissingDependency`] for the given entity and key.
    #[must_use]
    pub fn missing(entity: &'static str, id: impl Into<String>) -> Self {
        Self::MissingDependency {
            entity,
            id: id.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
