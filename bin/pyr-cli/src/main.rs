// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # pyr
//!
//! Command-line interface for the pyramid toolkit.
//!
//! ## Usage
//! ```bash
//! # Build an adjunction pyramid of a 3x5 i32 array
//! pyr build --shape 3x5 --data 11,10,6,12,3,2,15,9,4,5,14,7,13,8,1 \
//!     --dtype i32 --scheme adjunction
//!
//! # Detail pyramid with the binomial scheme
//! pyr detail --input image.json --dtype f32 --scheme binomial
//!
//! # Verify the detail/reconstruct round-trip
//! pyr roundtrip --shape 4x4 --data 1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16 \
//!     --dtype i32 --scheme sun-maragos
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pyr",
    about = "Multi-resolution pyramids of n-dimensional arrays",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file supplying defaults.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an approximation pyramid and print every level.
    Build {
        #[command(flatten)]
        array: commands::ArrayArgs,
    },

    /// Build a detail (residual) pyramid and print every level.
    Detail {
        #[command(flatten)]
        array: commands::ArrayArgs,
    },

    /// Build a detail pyramid, reconstruct it, and verify the round-trip.
    Roundtrip {
        #[command(flatten)]
        array: commands::ArrayArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Build { array } => commands::build::execute(&config, &array),
        Commands::Detail { array } => commands::detail::execute(&config, &array),
        Commands::Roundtrip { array } => commands::roundtrip::execute(&config, &array),
    }
}
