//! Command-line argument types.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Drive a No-Limit Hold'em table and check its hand histories"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play hands between baseline seats
    Play {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=10))]
        seats: Option<u8>,
        /// Append finalized hand histories to this JSONL file
        #[arg(long)]
        output: Option<String>,
    },
    /// Check chip conservation in a JSONL hand history file
    Verify {
        #[arg(long)]
        input: Option<String>,
    },
    /// Show the resolved table configuration and where each value came from
    Cfg,
}
