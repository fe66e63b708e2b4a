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

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use ahash::AHashMap;
use anyhow::Context;
use nautilus_lending_indexer::{IndexerConfig, IndexerStats, InMemoryStore, LendingPoolIndexer};
use nautilus_lending_model::{LendingPoolEvent, entities::EntityKind};

use crate::opt::{CheckConfigOpt, ReplayOpt};

/// Outcome of a replay run.
#[derive(Debug)]
pub struct ReplaySummary {
    pub stats: IndexerStats,
    pub counts: AHashMap<EntityKind, usize>,
}

impl ReplaySummary {
    fn log(&self) {
        let mut counts: Vec<_> = self.counts.iter().collect();
        counts.sort_unstable_by_key(|(kind, _)| **kind);
        for (kind, count) in counts {
            tracing::info!("{kind}: {count}");
        }
        tracing::info!("{}", self.stats);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<IndexerConfig> {
    match path {
        Some(path) => IndexerConfig::from_toml_file(path),
        None => {
            tracing::info!("No config file given, using defaults");
            Ok(IndexerConfig::default())
        }
    }
}

/// Reads decoded events from a JSON-lines file. Blank lines and `#` comments are ignored.
pub fn read_events(path: &Path) -> anyhow::Result<Vec<LendingPoolEvent>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open events file {}", path.display()))?;

    let mut events = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(line)
            .with_context(|| format!("Invalid event on line {}", index + 1))?;
        events.push(event);
    }
    Ok(events)
}

fn count_entities(store: &InMemoryStore) -> AHashMap<EntityKind, usize> {
    let mut counts = AHashMap::new();
    for entity in store.iter() {
        *counts.entry(entity.kind()).or_insert(0) += 1;
    }
    counts
}

pub fn run_replay(opt: &ReplayOpt) -> anyhow::Result<ReplaySummary> {
    let config = load_config(opt.config.as_deref())?;
    let events = read_events(&opt.events)?;
    tracing::info!(
        "Replaying {} events from {}",
        events.len(),
        opt.events.display()
    );

    let mut indexer = LendingPoolIndexer::new(InMemoryStore::new(), config);
    indexer
        .register_pools()
        .context("Failed to register configured pools")?;

    for event in &events {
        if let Err(e) = indexer.process(event) {
            tracing::error!("Failed to apply {event}: {e}");
            if opt.fail_fast {
                anyhow::bail!("Replay stopped at {event}: {e}");
            }
        }
    }

    let stats = indexer.stats();
    let store = indexer.into_store();
    if let Some(output) = &opt.output {
        let json = store.to_json_pretty()?;
        std::fs::write(output, json)
            .with_context(|| format!("Failed to write snapshot {}", output.display()))?;
        tracing::info!("Wrote snapshot to {}", output.display());
    }

    let summary = ReplaySummary {
        stats,
        counts: count_entities(&store),
    };
    summary.log();
    Ok(summary)
}

pub fn run_check_config(opt: &CheckConfigOpt) -> anyhow::Result<()> {
    let config = IndexerConfig::from_toml_file(&opt.config)?;
    let mut indexer = LendingPoolIndexer::new(InMemoryStore::new(), config);
    let pools = indexer
        .register_pools()
        .context("Invalid pool registrations")?;
    tracing::info!(
        "Config OK: {} pools, schema {:?}",
        pools.len(),
        indexer.config().schema
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use alloy_primitives::U256;
    use nautilus_lending_model::{
        events::PausedEvent,
        identifiers::address_to_hex,
        stubs::{self, STUB_POOL_ID, alice, dai, event_meta, lending_pool_address},
    };
    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn config_file() -> NamedTempFile {
        write_temp(&format!(
            "[[pools]]\npool_id = \"{STUB_POOL_ID}\"\nlending_pool = \"{}\"\n",
            address_to_hex(&lending_pool_address())
        ))
    }

    fn events_file(events: &[LendingPoolEvent]) -> NamedTempFile {
        let mut lines = String::from("# replay fixture\n\n");
        for event in events {
            lines.push_str(&serde_json::to_string(event).unwrap());
            lines.push('\n');
        }
        write_temp(&lines)
    }

    #[rstest]
    fn test_replay_writes_snapshot() {
        let config = config_file();
        let events = events_file(&[LendingPoolEvent::Deposit(stubs::deposit(
            event_meta(),
            dai(),
            alice(),
            U256::from(10),
        ))]);
        let output = NamedTempFile::new().unwrap();
        let opt = ReplayOpt {
            config: Some(config.path().to_path_buf()),
            events: events.path().to_path_buf(),
            output: Some(output.path().to_path_buf()),
            fail_fast: true,
        };

        let summary = run_replay(&opt).unwrap();

        assert_eq!(summary.stats.applied, 1);
        assert_eq!(summary.counts.get(&EntityKind::Deposit), Some(&1));
        assert_eq!(summary.counts.get(&EntityKind::Pool), Some(&1));
        let snapshot = std::fs::read_to_string(output.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
        assert!(json.get("Deposit").is_some());
    }

    #[rstest]
    fn test_replay_continues_past_failures_unless_fail_fast() {
        let events = events_file(&[
            LendingPoolEvent::Paused(PausedEvent {
                meta: event_meta(),
            }),
        ]);
        let mut opt = ReplayOpt {
            config: None,
            events: events.path().to_path_buf(),
            output: None,
            fail_fast: false,
        };

        let summary = run_replay(&opt).unwrap();
        assert_eq!(summary.stats.failed, 1);

        opt.fail_fast = true;
        assert!(run_replay(&opt).is_err());
    }

    #[rstest]
    fn test_read_events_reports_line() {
        let file = write_temp("\n{\"event\":\"Nope\"}\n");
        let err = read_events(file.path()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid event on line 2");
    }

    #[rstest]
    fn test_check_config_rejects_duplicate_contracts() {
        let lending_pool = address_to_hex(&lending_pool_address());
        let file = write_temp(&format!(
            "[[pools]]\npool_id = \"a\"\nlending_pool = \"{lending_pool}\"\n\n\
             [[pools]]\npool_id = \"b\"\nlending_pool = \"{lending_pool}\"\n"
        ));
        let opt = CheckConfigOpt {
            config: file.path().to_path_buf(),
        };

        assert!(run_check_config(&opt).is_err());
        let valid = config_file();
        let opt = CheckConfigOpt {
            config: valid.path().to_path_buf(),
        };
        assert!(run_check_config(&opt).is_ok());
    }
}
