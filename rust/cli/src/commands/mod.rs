//! Command handlers, one module per subcommand.
//!
//! Every handler has the shape
//! `handle_COMMAND_command(..., out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError>`
//! so tests can drive it with in-memory buffers.

pub mod cfg;
pub mod play;
pub mod verify;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use verify::handle_verify_command;
