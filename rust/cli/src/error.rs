//! Error types for the CLI application.
//!
//! Engine and configuration failures are flattened into [`CliError`] so every
//! command handler can use `?` and `run` can map the result to an exit code.
//!
//! ## Batch Validation Errors
//!
//! `BatchValidationError<T>` collects per-item problems (for `verify`, per
//! hand) so a whole file can be checked before reporting.

use std::fmt;

use holdem_engine::GameError;
use holdem_engine::errors::ConfigError;

#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Rejected by the table engine
    Engine(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

/// A problem found in one item of a batch.
///
/// ```rust
/// use holdem_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: 5,
///     message: "Chips not conserved".to_string(),
/// };
/// assert_eq!(error.to_string(), "5: Chips not conserved");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed validation
    pub item_context: T,
    pub message: String,
}

impl<T: fmt::Display> fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_keep_their_message() {
        let e: CliError = GameError::NoSuchSeat { seat: 9 }.into();
        assert!(e.to_string().contains("No seat 9"));
    }

    #[test]
    fn config_errors_are_config() {
        let e: CliError = ConfigError::Invalid("seats must be in 2..=10".into()).into();
        assert!(matches!(e, CliError::Config(_)));
    }
}
