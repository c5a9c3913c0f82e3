//! # Play Command
//!
//! Runs a session of hands where every seat follows the
//! [`BaselinePolicy`](crate::policy::BaselinePolicy). Between hands, seats
//! that went broke rebuy up to the cap so the table keeps going.
//!
//! With `--output`, every finalized hand history is appended to a JSONL file
//! with a `ts` timestamp, ready for `holdem verify`.

use std::io::Write;
use std::path::PathBuf;

use holdem_engine::history::History;
use holdem_engine::phase::HandPhase;
use holdem_engine::table::Table;
use tracing::{debug, info};

use crate::config;
use crate::error::CliError;
use crate::io_utils::append_jsonl;
use crate::policy::BaselinePolicy;
use crate::ui;

/// Handle the play command.
///
/// `seed` and `seats` override the resolved configuration. Without any seed
/// a random one is drawn and printed so the session can be replayed.
pub fn handle_play_command(
    hands: u64,
    seed: Option<u64>,
    seats: Option<u8>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let mut cfg = config::load_with_sources()?.table;
    if let Some(s) = seed {
        cfg.seed = Some(s);
    }
    if let Some(n) = seats {
        cfg.seats = usize::from(n);
    }
    let base_seed = cfg.seed.unwrap_or_else(rand::random);
    cfg.seed = Some(base_seed);

    let mut table = Table::new(cfg)?;
    let mut policy = BaselinePolicy::new(base_seed);
    let path = output.map(PathBuf::from);
    let mut played = 0u64;

    for _ in 0..hands {
        rebuy_busted(&mut table)?;
        if let Err(e) = table.start_hand() {
            ui::display_warning(err, &format!("Stopping after {} hands: {}", played, e))?;
            break;
        }
        while table.phase() != HandPhase::Prehand {
            let seat = table
                .current_player()
                .ok_or_else(|| CliError::Engine("no seat to act in a running hand".into()))?;
            let action = policy.choose(&table, seat);
            table.take_action(seat, action)?;
        }

        let Some(hand) = table.completed_hands().last() else {
            break;
        };
        writeln!(out, "{}", ui::format_hand_summary(hand))?;
        if let Some(p) = &path {
            append_jsonl(p, &[history_record(hand)?])?;
        }
        played += 1;
    }

    info!(hands = played, seed = base_seed, "session finished");
    writeln!(out, "Played: {} hands (seed {})", played, base_seed)?;
    Ok(())
}

/// Tops every broke seat back up to the cap.
fn rebuy_busted(table: &mut Table) -> Result<(), CliError> {
    let busted: Vec<usize> = table
        .players()
        .iter()
        .filter(|p| p.chips() == 0)
        .map(|p| p.seat())
        .collect();
    for seat in busted {
        if table.can_rebuy(seat, None) {
            let added = table.rebuy(seat, None)?;
            debug!(seat, added, "seat rebought");
        }
    }
    Ok(())
}

/// The hand history as JSON with the time it was written.
fn history_record(hand: &History) -> Result<serde_json::Value, CliError> {
    let mut v = serde_json::to_value(hand)?;
    if let Some(obj) = v.as_object_mut() {
        obj.insert(
            "ts".to_string(),
            serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
        );
    }
    Ok(v)
}
