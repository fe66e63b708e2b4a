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

//! Token wrapper records (aToken, sToken, vToken) linked to their reserve.

use std::fmt::Display;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::enums::TokenWrapperKind;

/// Default decimals assumed for an underlying asset until the token is linked to a reserve.
pub const DEFAULT_UNDERLYING_DECIMALS: u8 = 18;

/// A supply or debt token contract attached to a reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenWrapper {
    /// The lowercase hex address of the token contract.
    pub id: String,
    /// The role of the token.
    pub kind: TokenWrapperKind,
    /// The underlying asset of the reserve the token belongs to.
    pub underlying_asset_address: Address,
    /// The implementation contract behind the token proxy.
    pub token_contract_impl: Address,
    /// The pool id, empty until linked.
    pub pool: String,
    /// Decimals of the underlying asset.
    pub underlying_asset_decimals: u8,
}

impl TokenWrapper {
    /// Creates a new unlinked [`TokenWrapper`] instance.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: TokenWrapperKind) -> Self {
        Self {
            id: id.into(),
            kind,
            underlying_asset_address: Address::ZERO,
            token_contract_impl: Address::ZERO,
            pool: String::new(),
            underlying_asset_decimals: DEFAULT_UNDERLYING_DECIMALS,
        }
    }

    /// Returns whether the token has been linked to a pool.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        !self.pool.is_empty()
    }
}

impl Display for TokenWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TokenWrapper(id={}, kind={}, underlying={})",
            self.id, self.kind, self.underlying_asset_address
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_defaults() {
        let token = TokenWrapper::new("0x01", TokenWrapperKind::Supply);
        assert_eq!(token.underlying_asset_decimals, 18);
        assert_eq!(token.underlying_asset_address, Address::ZERO);
        assert_eq!(token.token_contract_impl, Address::ZERO);
        assert!(!token.is_linked());
    }
}
