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

//! Key derivation for entities and history records.
//!
//! The formats produced here are persisted and joined on by downstream consumers. Changing a
//! delimiter or the field order is a breaking schema migration.
//!
//! Addresses are always rendered as lowercase, `0x`-prefixed, 40 digit hex. Because of the
//! fixed width, address and pool id concatenations carry no delimiter and remain unambiguous.

use alloy_primitives::{Address, hex};

use crate::events::EventMeta;

/// The id of the price oracle singleton.
pub const PRICE_ORACLE_ID: &str = "1";

/// The id of the protocol singleton.
pub const PROTOCOL_ID: &str = "1";

/// The delimiter between the numeric coordinates of a history entity id.
pub const HISTORY_ID_DELIMITER: char = ':';

/// Returns the canonical lowercase hex form of `address`.
#[must_use]
pub fn address_to_hex(address: &Address) -> String {
    hex::encode_prefixed(address)
}

/// Returns the id of the history record produced by the event at `meta`.
///
/// Format: `block:txIndex:txHash:logIndex:txLogIndex`. The numeric fields are not padded, so
/// ids of different blocks do not sort chronologically as strings. Use
/// [`EventMeta::position`] to compare events.
#[must_use]
pub fn history_entity_id(meta: &EventMeta) -> String {
    format!(
        "{}{d}{}{d}{}{d}{}{d}{}",
        meta.block_number,
        meta.transaction_index,
        hex::encode_prefixed(meta.transaction_hash),
        meta.log_index,
        meta.transaction_log_index,
        d = HISTORY_ID_DELIMITER,
    )
}

/// Returns the id of the reserve of `underlying_asset` in `pool_id`.
#[must_use]
pub fn reserve_id(underlying_asset: &Address, pool_id: &str) -> String {
    format!("{}{pool_id}", address_to_hex(underlying_asset))
}

/// Returns the id of the position of `user` in the reserve of `underlying_asset` in `pool_id`.
#[must_use]
pub fn user_reserve_id(user: &Address, underlying_asset: &Address, pool_id: &str) -> String {
    format!(
        "{}{}{pool_id}",
        address_to_hex(user),
        address_to_hex(underlying_asset)
    )
}

/// Returns the id of a user.
#[must_use]
pub fn user_id(user: &Address) -> String {
    address_to_hex(user)
}

/// Returns the id of the token wrapper record for the token contract at `address`.
#[must_use]
pub fn token_wrapper_id(address: &Address) -> String {
    address_to_hex(address)
}

/// Returns the id of the oracle metadata record of `asset`.
#[must_use]
pub fn price_oracle_asset_id(asset: &Address) -> String {
    address_to_hex(asset)
}

/// Returns the id of the routing entry for `contract`.
#[must_use]
pub fn contract_mapping_id(contract: &Address) -> String {
    address_to_hex(contract)
}

/// Returns the id of a reserve parameters snapshot taken at `meta`.
#[must_use]
pub fn reserve_params_history_item_id(meta: &EventMeta, reserve_id: &str) -> String {
    format!("{}{reserve_id}", history_entity_id(meta))
}

/// Returns the id of a reserve configuration snapshot taken at `meta`.
#[must_use]
pub fn reserve_configuration_history_item_id(meta: &EventMeta) -> String {
    history_entity_id(meta)
}

/// Returns the id of the referrer for a referral `code`.
#[must_use]
pub fn referrer_id(code: u16) -> String {
    code.to_string()
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use alloy_primitives::{B256, address};
    use rstest::rstest;

    use super::*;

    fn meta(block_number: u64, transaction_index: u32, log_index: u32) -> EventMeta {
        EventMeta::new(
            Address::ZERO,
            block_number,
            0,
            B256::repeat_byte(0xab),
            transaction_index,
            log_index,
            3,
        )
    }

    #[rstest]
    fn test_address_to_hex_is_lowercase() {
        let asset = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
        assert_eq!(
            address_to_hex(&asset),
            "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
        );
    }

    #[rstest]
    fn test_history_entity_id_format() {
        let id = history_entity_id(&meta(100, 2, 7));
        let expected = format!("100:2:0x{}:7:3", "ab".repeat(32));
        assert_eq!(id, expected);
    }

    #[rstest]
    fn test_history_entity_ids_do_not_sort_chronologically() {
        let earlier = history_entity_id(&meta(9, 0, 0));
        let later = history_entity_id(&meta(10, 0, 0));
        // "9:..." > "10:..." as strings although block 9 precedes block 10
        assert!(earlier > later);
        assert!(meta(9, 0, 0).position() < meta(10, 0, 0).position());
    }

    #[rstest]
    fn test_reserve_and_user_reserve_ids() {
        let asset = address!("0x6B175474E89094C44Da98b954EedeAC495271d0F");
        let user = address!("0x00000000000000000000000000000000000000aa");
        assert_eq!(
            reserve_id(&asset, "pool-1"),
            "0x6b175474e89094c44da98b954eedeac495271d0fpool-1"
        );
        assert_eq!(
            user_reserve_id(&user, &asset, "pool-1"),
            "0x00000000000000000000000000000000000000aa0x6b175474e89094c44da98b954eedeac495271d0fpool-1"
        );
    }

    #[rstest]
    fn test_reserve_params_history_item_id_appends_reserve() {
        let m = meta(1, 1, 1);
        let id = reserve_params_history_item_id(&m, "reserve");
        assert_eq!(id, format!("{}reserve", history_entity_id(&m)));
    }

    #[rstest]
    fn test_referrer_id() {
        assert_eq!(referrer_id(0), "0");
        assert_eq!(referrer_id(42), "42");
    }
}
