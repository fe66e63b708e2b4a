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

//! Schema configuration selecting the optional entity sections.

use serde::{Deserialize, Serialize};

/// Selects the optional entity sections maintained by the projection.
///
/// Sections of a disabled feature are `None` on every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Track stable rate debt on reserves, positions and borrows.
    pub stable_debt: bool,
    /// Track lifetime flash loan accumulators on reserves.
    pub flash_loans: bool,
    /// Track incentive indices on reserves and positions.
    pub incentives: bool,
    /// Link referral codes to referrer records.
    pub referrals: bool,
}

impl SchemaConfig {
    /// Returns the configuration with every optional section enabled.
    #[must_use]
    pub const fn extended() -> Self {
        Self {
            stable_debt: true,
            flash_loans: true,
            incentives: true,
            referrals: true,
        }
    }

    /// Returns the two-token (supply and variable debt) configuration.
    #[must_use]
    pub const fn reduced() -> Self {
        Self {
            stable_debt: false,
            flash_loans: false,
            incentives: false,
            referrals: false,
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self::extended()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_default_is_extended() {
        assert_eq!(SchemaConfig::default(), SchemaConfig::extended());
    }

    #[rstest]
    fn test_partial_deserialize_uses_defaults() {
        let config: SchemaConfig = serde_json::from_str(r#"{"stable_debt": false}"#).unwrap();
        assert!(!config.stable_debt);
        assert!(config.flash_loans);
        assert!(config.incentives);
        assert!(config.referrals);
    }
}
