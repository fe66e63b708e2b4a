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

use alloy_primitives::Address;
use nautilus_lending_model::{
    entities::{Reserve, TokenWrapper},
    enums::TokenWrapperKind,
    identifiers::token_wrapper_id,
};

use crate::{registry::EntityRegistry, store::EntityStore};

impl<S: EntityStore> EntityRegistry<S> {
    /// Returns the token wrapper of `address`, creating an unlinked one if absent.
    pub fn get_or_init_token_wrapper(
        &mut self,
        kind: TokenWrapperKind,
        address: &Address,
    ) -> TokenWrapper {
        let id = token_wrapper_id(address);
        if let Some(token) = self.load::<TokenWrapper>(&id) {
            return token;
        }
        let token = TokenWrapper::new(id, kind);
        self.save(token.clone());
        token
    }

    /// Links the token at `address` to `reserve`, returning the token id.
    pub fn link_token_wrapper(
        &mut self,
        kind: TokenWrapperKind,
        address: &Address,
        reserve: &Reserve,
    ) -> String {
        let mut token = self.get_or_init_token_wrapper(kind, address);
        token.underlying_asset_address = reserve.underlying_asset;
        token.pool.clone_from(&reserve.pool);
        let id = token.id.clone();
        self.save(token);
        tracing::debug!("Linked {kind} token {id} to reserve {}", reserve.id);
        id
    }
}
