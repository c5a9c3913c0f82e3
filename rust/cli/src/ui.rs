//! Terminal output helpers shared by the commands.

use std::io::Write;

use holdem_engine::history::History;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// One line per finished hand: id, button, pot size, winners and whether it
/// went to showdown.
pub fn format_hand_summary(h: &History) -> String {
    let Some(settle) = &h.settle else {
        return format!("Hand {}: unsettled", h.hand_id);
    };
    let pot: u32 = settle.pots.iter().map(|p| p.amount).sum();
    let winners: Vec<String> = settle
        .payouts
        .iter()
        .map(|(seat, won)| format!("seat {} +{}", seat, won))
        .collect();
    let board: Vec<String> = settle.board.iter().map(ToString::to_string).collect();
    format!(
        "Hand {}: button {} pot {} -> {}{}{}",
        h.hand_id,
        h.prehand.btn_loc,
        pot,
        winners.join(", "),
        if board.is_empty() {
            String::new()
        } else {
            format!(" [{}]", board.join(" "))
        },
        if settle.showdown { " (showdown)" } else { "" },
    )
}
