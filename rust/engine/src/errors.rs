use thiserror::Error;

use crate::history::ActionType;
use crate::phase::HandPhase;
use crate::player::PlayerState;
use crate::{Chips, SeatIdx};

/// Broad classification of a [`GameError`], stable across message changes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// Operation attempted outside the phase where it is valid.
    Window,
    /// Seat does not exist or its state does not allow the operation.
    InvalidParticipant,
    /// Amount is non-positive, too small, or above the ceiling.
    InvalidAmount,
    /// Action submitted by a seat that is not the current actor.
    OutOfTurn,
    /// Nothing to do; e.g. a rebuy for a stack already at the cap.
    AlreadySatisfied,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Rebuy is only permitted between hands (current phase: {phase:?})")]
    RebuyWindow { phase: HandPhase },
    #[error("{operation} is not permitted during {phase:?}")]
    WrongPhase {
        operation: &'static str,
        phase: HandPhase,
    },
    #[error("Hand history is finalized; no further actions may be recorded")]
    HistoryFinalized,
    #[error("No seat {seat} at this table")]
    NoSuchSeat { seat: SeatIdx },
    #[error("Player {seat} is in invalid state {state:?} for {operation}")]
    InvalidState {
        seat: SeatIdx,
        state: PlayerState,
        operation: &'static str,
    },
    #[error("Not enough funded players to start a hand (have {available}, need 2)")]
    NotEnoughPlayers { available: usize },
    #[error("Player {seat} cannot {action:?} now")]
    IllegalAction { seat: SeatIdx, action: ActionType },
    #[error("Player {seat} has {chips} chips, already at or above the cap of {cap}")]
    AtOrAboveCap {
        seat: SeatIdx,
        chips: Chips,
        cap: Chips,
    },
    #[error("Amount must be in {min}..={max}, got {amount}")]
    AmountOutOfRange { amount: i64, min: i64, max: i64 },
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: SeatIdx, actual: SeatIdx },
    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition { from: HandPhase, to: HandPhase },
    #[error("Dealer ran out of cards")]
    DeckExhausted,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::RebuyWindow { .. }
            | GameError::WrongPhase { .. }
            | GameError::HistoryFinalized
            | GameError::InvalidTransition { .. }
            | GameError::DeckExhausted => ErrorKind::Window,
            GameError::NoSuchSeat { .. }
            | GameError::InvalidState { .. }
            | GameError::NotEnoughPlayers { .. }
            | GameError::IllegalAction { .. } => ErrorKind::InvalidParticipant,
            GameError::AmountOutOfRange { .. } => ErrorKind::InvalidAmount,
            GameError::NotPlayersTurn { .. } => ErrorKind::OutOfTurn,
            GameError::AtOrAboveCap { .. } => ErrorKind::AlreadySatisfied,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
