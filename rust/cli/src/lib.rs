//! # holdem CLI Library
//!
//! Command-line driver for the `holdem-engine` table. The binary is a thin
//! wrapper around [`run`], which parses arguments, dispatches to a command
//! handler and turns the outcome into an exit code.
//!
//! ## Available Subcommands
//!
//! - `play`: Play a session of hands between baseline seats
//! - `verify`: Check chip conservation in recorded hand histories
//! - `cfg`: Display the resolved table configuration
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem", "play", "--hands", "10", "--seed", "7"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```

use std::io::Write;

use clap::Parser;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod logging;
pub mod policy;
pub mod ui;

use cli::{Commands, HoldemCli};
use commands::{handle_cfg_command, handle_play_command, handle_verify_command};

pub use error::{BatchValidationError, CliError};

const COMMANDS: &[&str] = &["play", "verify", "cfg"];

/// Main entry point for the CLI application.
///
/// Returns `0` on success and `2` for any error. Help and version output go
/// to `out` and also return `0`.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Play {
            hands,
            seed,
            seats,
            output,
        } => handle_play_command(hands, seed, seats, output, out, err),
        Commands::Verify { input } => {
            let Some(path) = input else {
                let _ = ui::write_error(err, "input required");
                return exit_code::ERROR;
            };
            handle_verify_command(path, out, err)
        }
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // help and version are not failures
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "Usage: holdem <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: holdem --help");
    exit_code::ERROR
}
