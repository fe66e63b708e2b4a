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

use std::path::PathBuf;

use clap::Parser;

/// Main CLI structure for parsing command-line arguments and options.
///
/// Entry point of the lending indexer command-line interface, which replays decoded
/// lending-pool events into an entity snapshot.
#[derive(Debug, Parser)]
#[clap(version, about, author)]
pub struct LendingCli {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available top-level commands of the lending indexer CLI.
#[derive(Parser, Debug)]
pub enum Commands {
    Replay(ReplayOpt),
    CheckConfig(CheckConfigOpt),
}

/// Options of the `replay` command.
#[derive(Parser, Debug, Clone)]
#[command(about = "Replays a JSON-lines event file into an entity snapshot", long_about = None)]
pub struct ReplayOpt {
    /// Path to the TOML indexer configuration (defaults apply when omitted).
    #[arg(long, env = "LENDING_INDEXER_CONFIG")]
    pub config: Option<PathBuf>,
    /// Path to the JSON-lines file of decoded events, one event per line.
    #[arg(long)]
    pub events: PathBuf,
    /// Path to write the resulting entity snapshot as JSON (optional).
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Stop at the first event which fails to apply
    #[arg(long)]
    pub fail_fast: bool,
}

/// Options of the `check-config` command.
#[derive(Parser, Debug, Clone)]
#[command(about = "Validates an indexer configuration file", long_about = None)]
pub struct CheckConfigOpt {
    /// Path to the TOML indexer configuration.
    #[arg(long, env = "LENDING_INDEXER_CONFIG")]
    pub config: PathBuf,
}
