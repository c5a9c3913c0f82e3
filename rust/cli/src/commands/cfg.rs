//! Configuration command handler.
//!
//! Prints the resolved table configuration as pretty JSON, one object per
//! setting with its `value` and `source` (`default`, `file` or `env`).

use std::io::Write;

use crate::config;
use crate::error::CliError;
use crate::ui;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { table, sources } = resolved;
    let display = serde_json::json!({
        "buyin": {
            "value": table.buyin,
            "source": sources.buyin,
        },
        "small_blind": {
            "value": table.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": table.big_blind,
            "source": sources.big_blind,
        },
        "seats": {
            "value": table.seats,
            "source": sources.seats,
        },
        "rebuy_cap": {
            "value": table.rebuy_cap,
            "source": sources.rebuy_cap,
        },
        "seed": {
            "value": table.seed,
            "source": sources.seed,
        },
        "rebuy": {
            "value": table.rebuy,
            "source": sources.rebuy,
        }
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
