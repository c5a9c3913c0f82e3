//! Verify command handler module.
//!
//! Re-reads a JSONL file of hand histories written by `holdem play` and checks
//! the chip accounting of every hand:
//!
//! - the hand is finalized and settled
//! - chips at hand start equal the final chips (nothing created or lost)
//! - the pots add up to exactly what was paid out
//! - every paid seat was eligible for some pot
//! - the previous hand's final chips plus this hand's rebuys equal the chips
//!   at hand start
//!
//! Problems are collected per hand with `BatchValidationError` and reported
//! together.

use std::collections::BTreeMap;
use std::io::Write;

use holdem_engine::history::History;

use crate::error::{BatchValidationError, CliError};
use crate::io_utils::read_text;
use crate::ui;

/// The `usize` context is the 1-based line (hand) number.
type VerifyError = BatchValidationError<usize>;

pub fn handle_verify_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_text(&input)?;
    let mut errors: Vec<VerifyError> = Vec::new();
    let mut hands = 0usize;
    let mut prev_final: Option<u64> = None;

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        hands += 1;
        let hand: History = match serde_json::from_str(line) {
            Ok(h) => h,
            Err(e) => {
                errors.push(VerifyError {
                    item_context: hands,
                    message: format!("Invalid hand record: {}", e),
                });
                prev_final = None;
                continue;
            }
        };
        errors.extend(check_hand(hands, &hand, prev_final));
        prev_final = hand.settle.as_ref().map(|s| total(&s.final_chips));
    }

    for e in &errors {
        ui::write_error(err, &e.to_string())?;
    }
    writeln!(out, "Hands: {}, Errors: {}", hands, errors.len())?;
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!(
            "{} problem(s) found in {}",
            errors.len(),
            input
        )))
    }
}

fn total(chips: &BTreeMap<usize, u32>) -> u64 {
    chips.values().map(|&c| u64::from(c)).sum()
}

fn check_hand(line: usize, hand: &History, prev_final: Option<u64>) -> Vec<VerifyError> {
    let mut errors = Vec::new();
    let fail = |message: String| VerifyError {
        item_context: line,
        message,
    };

    if !hand.is_finalized() {
        errors.push(fail(format!("Hand {} is not finalized", hand.hand_id)));
    }
    let Some(settle) = &hand.settle else {
        errors.push(fail(format!("Hand {} has no settlement", hand.hand_id)));
        return errors;
    };

    let start = total(&hand.prehand.player_chips);
    let end = total(&settle.final_chips);
    if start != end {
        errors.push(fail(format!(
            "Hand {}: chips not conserved, started with {} and finished with {}",
            hand.hand_id, start, end
        )));
    }

    let pots: u64 = settle.pots.iter().map(|p| u64::from(p.amount)).sum();
    let paid: u64 = settle.payouts.values().map(|&c| u64::from(c)).sum();
    if pots != paid {
        errors.push(fail(format!(
            "Hand {}: pots total {} but {} was paid out",
            hand.hand_id, pots, paid
        )));
    }

    for seat in settle.payouts.keys() {
        if !settle.pots.iter().any(|p| p.eligible.contains(seat)) {
            errors.push(fail(format!(
                "Hand {}: seat {} was paid without being eligible",
                hand.hand_id, seat
            )));
        }
    }

    if let Some(prev) = prev_final {
        let rebuys = u64::from(hand.rebuy_total());
        if prev + rebuys != start {
            errors.push(fail(format!(
                "Hand {}: previous hand ended with {} chips plus {} rebought, but {} were on the table",
                hand.hand_id, prev, rebuys, start
            )));
        }
    }
    errors
}
