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
    entities::{Referrer, User},
    identifiers::{referrer_id, user_id},
};

use crate::{registry::EntityRegistry, store::EntityStore};

impl<S: EntityStore> EntityRegistry<S> {
    /// Returns the user record of `address`, creating it if absent.
    pub fn get_or_init_user(&mut self, address: &Address) -> User {
        let id = user_id(address);
        if let Some(user) = self.load::<User>(&id) {
            return user;
        }
        let user = User::new(id);
        self.save(user.clone());
        user
    }

    /// Returns the referrer record of `code`, creating it if absent.
    pub fn get_or_init_referrer(&mut self, code: u16) -> Referrer {
        let id = referrer_id(code);
        if let Some(referrer) = self.load::<Referrer>(&id) {
            return referrer;
        }
        let referrer = Referrer::new(id);
        self.save(referrer.clone());
        referrer
    }

    /// Links a referral code to its referrer, returning the referrer id.
    ///
    /// Returns `None` when referrals are not tracked or `code` is zero (no referral).
    pub fn link_referrer(&mut self, code: u16) -> Option<String> {
        if !self.schema.referrals || code == 0 {
            return None;
        }
        Some(self.get_or_init_referrer(code).id)
    }
}
