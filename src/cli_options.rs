/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Mazesplit.

Mazesplit is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazesplit is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazesplit. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! # Examples
//!
//! Build three 20x30 mazes, starting from seed 42, and print some statistics:
//!
//! ```text
//! $ mazesplit -W 20 -H 30 -s 42 -c 3 --summary
//! ```
//!
//! Each maze gets one line with its seed, its size, the number of nodes and leaves of the
//! partition tree, the tree depth, the number of loops, the number of split positions tried,
//! and the number of subtrees that had to be built again. A complete 20x30 tree always has
//! 1199 nodes and 600 leaves:
//!
//! ```text
//! seed 42: 20x30 nodes=1199 leaves=600 depth=<depth> loops=<loops> attempts=<attempts> rebuilds=<rebuilds>
//! ```
//!
//! Export the partition trees for a drawing program:
//!
//! ```text
//! $ mazesplit -c 10 -o mazes.json
//! ```

use clap::Parser;
use log::debug;
use std::env;
use std::path::PathBuf;

use mazesplit::config::{COPYRIGHT_NOTICE, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use mazesplit::generator::node::{MaxDepth, MazeBuilder, MazeError, PartitionNode};
use mazesplit::generator::settings::GeneratorSettings;
use mazesplit::saver::mazes::{SavedMaze, SaverMazes};
use mazesplit::saver::settings::SaverSettings;

/// Build random mazes by recursive space partitioning.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Maze width, in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Maze height, in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Seed of the first maze (random by default)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of mazes to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Maximum depth of the partition tree (negative for no limit)
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    max_depth: i64,

    /// JSON file with the generator settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Save the partition trees to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print some statistics after generating the mazes
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let settings: GeneratorSettings = match &args.settings {
        Some(path) => match SaverSettings::new(path.clone()).get_settings() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Cannot load the settings from {}: {e}", path.display());
                return 1;
            }
        },
        None => GeneratorSettings::default(),
    };

    let max_depth: MaxDepth = MaxDepth::from_signed(args.max_depth);
    let mut seed: u64 = args.seed.unwrap_or_else(rand::random);

    let mut mazes: Vec<SavedMaze> = Vec::new();
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut attempts: usize = 0;
    let mut loops: usize = 0;
    let mut rebuilds: usize = 0;
    for i in 0..args.count {
        debug!("Iteration {i}, seed {seed}");

        let mut builder: MazeBuilder = MazeBuilder::new(seed, settings.clone());
        let ret: Result<PartitionNode, MazeError> =
            builder.build(args.width, args.height, max_depth, None);
        let root: PartitionNode = match ret {
            Ok(root) => root,
            Err(e) => {
                eprintln!("Error: seed {seed}: {e}");
                return 1;
            }
        };

        total += builder.duration;
        if builder.duration > max {
            max = builder.duration;
        }
        attempts += builder.attempts;
        loops += builder.loops;
        rebuilds += builder.rebuilds;
        println!(
            "seed {seed}: {}x{} nodes={} leaves={} depth={} loops={} attempts={} rebuilds={}",
            root.width,
            root.height,
            builder.nodes,
            root.leaf_count(),
            root.depth(),
            builder.loops,
            builder.attempts,
            builder.rebuilds
        );
        if args.output.is_some() {
            mazes.push(SavedMaze { seed, root });
        }
        seed = seed.wrapping_add(1);
    }

    if let Some(path) = args.output {
        if let Err(e) = SaverMazes::new(path.clone()).save_mazes(&mazes) {
            eprintln!("Cannot save the mazes to {}: {e}", path.display());
            return 1;
        }
    }

    // Print some stats
    if args.summary && args.count > 0 {
        println!(
            "
      total time = {}s
    average time = {}s
        max time = {}s
average attempts = {}
   average loops = {}
        rebuilds = {}",
            total,
            total / args.count as f32,
            max,
            attempts / args.count,
            loops / args.count,
            rebuilds
        );
    }
    0
}
