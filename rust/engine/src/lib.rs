//! # holdem-engine: Texas Hold'em Table Rules
//!
//! Rules engine for a multiplayer No-Limit Hold'em table. It keeps the chip
//! ledger across hands, enforces who may act and with what, splits pots, and
//! records every state-changing action in an append-only hand history.
//!
//! ## Core Modules
//!
//! - [`table`] - The game session and hand phase state machine
//! - [`betting`] - Turn order, legal actions and round closure
//! - [`pot`] - Main pot and side pot computation, payouts
//! - [`rebuy`] - Between-hands top-ups
//! - [`history`] - Action records and per-hand history
//! - [`player`] - Seat ledger and participation states
//! - [`phase`] - Hand phases and legal transitions
//! - [`deck`] / [`evaluator`] - Dealer and showdown collaborators
//! - [`config`] - Table configuration
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::phase::HandPhase;
//! use holdem_engine::player::PlayerAction;
//! use holdem_engine::table::Table;
//!
//! let cfg = TableConfig { seats: 2, seed: Some(42), ..TableConfig::default() };
//! let mut table = Table::new(cfg).unwrap();
//! table.start_hand().unwrap();
//!
//! // heads-up: the button posts the small blind and acts first preflop
//! let seat = table.current_player().unwrap();
//! table.take_action(seat, PlayerAction::Fold).unwrap();
//!
//! assert_eq!(table.phase(), HandPhase::Prehand);
//! assert_eq!(table.completed_hands().len(), 1);
//! assert_eq!(table.total_chips(), 200);
//! ```
//!
//! ## Rebuys
//!
//! ```rust
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::table::Table;
//!
//! let cfg = TableConfig { rebuy_cap: 2, ..TableConfig::default() };
//! let mut table = Table::new(cfg).unwrap();
//! table.players_mut()[0].set_chips(50);
//!
//! assert!(table.can_rebuy(0, Some(150)));
//! assert!(!table.can_rebuy(0, Some(151)));
//! assert_eq!(table.rebuy(0, None).unwrap(), 150);
//! assert_eq!(table.player(0).unwrap().chips(), 200);
//! ```

pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod errors;
pub mod evaluator;
pub mod history;
pub mod phase;
pub mod player;
pub mod pot;
pub mod rebuy;
pub mod table;

/// Chip amounts. Balances never go negative.
pub type Chips = u32;
/// Seat index, stable for the lifetime of a table.
pub type SeatIdx = usize;

pub use errors::{ErrorKind, GameError};
pub use table::Table;
