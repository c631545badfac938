// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # deepblue
//!
//! Command-line interface for the deepblue operation runtime.
//!
//! ## Usage
//! ```bash
//! # Call one operation
//! deepblue call vec_mat "[1, 2]" "[1, 2, 3, 4]"
//!
//! # List every operation with its parameters and sentinel
//! deepblue list
//!
//! # Show one operation in detail
//! deepblue inspect update_weights
//!
//! # Run a file of JSON-lines calls concurrently
//! deepblue --seed 7 batch calls.jsonl
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "deepblue",
    about = "Call tensor, numeric, optimizer and encoding operations by name",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// RNG seed for dropout and random variation (overrides the config file).
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call an operation with positional arguments.
    Call {
        /// Operation name (e.g. "vec_mat") or block opcode (e.g. "awbw_block").
        op: String,

        /// Positional arguments, as text.
        args: Vec<String>,

        /// Also print the error behind a sentinel result, and the duration.
        #[arg(short, long)]
        detailed: bool,
    },

    /// List every operation.
    List,

    /// Show the parameters, sentinel and aliases of one operation.
    Inspect {
        /// Operation name or block opcode.
        op: String,
    },

    /// Run calls from a JSON-lines file (`{"op": ..., "args": [...]}` per line).
    Batch {
        /// Input file; `-` reads standard input.
        file: std::path::PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Call { op, args, detailed } => {
            let config = commands::load_config(cli.config.as_deref(), cli.seed)?;
            commands::call::execute(config, op, args, detailed).await
        }
        Commands::List => commands::list::execute().await,
        Commands::Inspect { op } => commands::inspect::execute(op).await,
        Commands::Batch { file } => {
            let config = commands::load_config(cli.config.as_deref(), cli.seed)?;
            commands::batch::execute(config, file).await
        }
    }
}
