//! Between-hands top-ups.
//!
//! `can_rebuy` and `rebuy` share one validation chain, so they always agree
//! on whether a request is acceptable. Checks run in a fixed order and the
//! first failure decides the error:
//!
//! 1. the table rests in `Prehand`
//! 2. the seat exists
//! 3. the seat's state is allowed by the [`RebuyPolicy`]
//! 4. the balance is below the cap
//! 5. the amount is within `1..=cap - balance`
//!
//! Because the phase is checked first, a nonexistent seat outside `Prehand`
//! is reported as a window violation ([`ErrorKind::Window`]), not as
//! [`ErrorKind::InvalidParticipant`]. Only inside `Prehand` does an unknown
//! seat produce `NoSuchSeat`.
//!
//! [`ErrorKind::Window`]: crate::ErrorKind::Window
//! [`ErrorKind::InvalidParticipant`]: crate::ErrorKind::InvalidParticipant

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::GameError;
use crate::history::{ActionRecord, ActionType};
use crate::phase::HandPhase;
use crate::player::PlayerState;
use crate::table::Table;
use crate::{Chips, SeatIdx};

/// Which seats may rebuy and what happens to their state afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebuyPolicy {
    pub eligible: Vec<PlayerState>,
    /// Move `Skip`/`Out` seats back to `In` after a successful rebuy.
    pub reactivate: bool,
}

impl Default for RebuyPolicy {
    fn default() -> Self {
        Self {
            eligible: vec![PlayerState::In, PlayerState::Skip, PlayerState::Out],
            reactivate: true,
        }
    }
}

impl RebuyPolicy {
    pub fn allows(&self, state: PlayerState) -> bool {
        self.eligible.contains(&state)
    }
}

impl Table {
    /// Resolves the requested amount (`None` tops up to the cap) and runs
    /// every check without side effects.
    fn validate_rebuy(&self, seat: SeatIdx, amount: Option<i64>) -> Result<Chips, GameError> {
        if self.phase != HandPhase::Prehand {
            return Err(GameError::RebuyWindow { phase: self.phase });
        }
        let p = self
            .players
            .get(seat)
            .ok_or(GameError::NoSuchSeat { seat })?;
        if !self.config.rebuy.allows(p.state()) {
            return Err(GameError::InvalidState {
                seat,
                state: p.state(),
                operation: "rebuy",
            });
        }
        let cap = self.config.rebuy_cap_chips();
        if p.chips() >= cap {
            return Err(GameError::AtOrAboveCap {
                seat,
                chips: p.chips(),
                cap,
            });
        }
        let max = cap - p.chips();
        let requested = amount.unwrap_or(i64::from(max));
        let out_of_range = GameError::AmountOutOfRange {
            amount: requested,
            min: 1,
            max: i64::from(max),
        };
        if requested < 1 {
            return Err(out_of_range);
        }
        match Chips::try_from(requested) {
            Ok(chips) if chips <= max => Ok(chips),
            _ => Err(out_of_range),
        }
    }

    /// Whether `rebuy(seat, amount)` would succeed. Never mutates the table.
    pub fn can_rebuy(&self, seat: SeatIdx, amount: Option<i64>) -> bool {
        self.validate_rebuy(seat, amount).is_ok()
    }

    /// Adds chips to `seat` between hands and records a `REBUY` action in the
    /// open hand's prehand history. Returns the chips added.
    pub fn rebuy(&mut self, seat: SeatIdx, amount: Option<i64>) -> Result<Chips, GameError> {
        let amount = match self.validate_rebuy(seat, amount) {
            Ok(amount) => amount,
            Err(e) => {
                debug!(seat, error = %e, "rebuy rejected");
                return Err(e);
            }
        };
        let total = self.players[seat].chips() + amount;
        self.history.record(ActionRecord {
            player_id: seat,
            action_type: ActionType::Rebuy,
            amount: Some(amount),
            total: Some(total),
            phase: HandPhase::Prehand,
        })?;

        let reactivate = self.config.rebuy.reactivate;
        let p = &mut self.players[seat];
        p.add_chips(amount);
        if reactivate && matches!(p.state(), PlayerState::Skip | PlayerState::Out) {
            p.set_state(PlayerState::In);
        }
        debug!(seat, amount, total, "rebuy applied");
        Ok(amount)
    }
}
