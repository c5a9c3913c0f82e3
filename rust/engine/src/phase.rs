use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Position of the table in the hand lifecycle. `Prehand` is the resting
/// state between hands and the only phase in which rebuys are accepted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandPhase {
    Prehand,
    Preflop,
    Flop,
    Turn,
    River,
    Settle,
}

impl HandPhase {
    pub const BETTING: [HandPhase; 4] = [
        HandPhase::Preflop,
        HandPhase::Flop,
        HandPhase::Turn,
        HandPhase::River,
    ];

    pub fn valid_transitions(&self) -> &'static [HandPhase] {
        match self {
            HandPhase::Prehand => &[HandPhase::Preflop],
            HandPhase::Preflop => &[HandPhase::Flop, HandPhase::Settle],
            HandPhase::Flop => &[HandPhase::Turn, HandPhase::Settle],
            HandPhase::Turn => &[HandPhase::River, HandPhase::Settle],
            HandPhase::River => &[HandPhase::Settle],
            HandPhase::Settle => &[HandPhase::Prehand],
        }
    }

    pub fn transition_to(&self, target: HandPhase) -> Result<HandPhase, GameError> {
        if self.valid_transitions().contains(&target) {
            Ok(target)
        } else {
            Err(GameError::InvalidTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// The street that follows this one, if betting continues.
    pub fn next_street(&self) -> Option<HandPhase> {
        match self {
            HandPhase::Preflop => Some(HandPhase::Flop),
            HandPhase::Flop => Some(HandPhase::Turn),
            HandPhase::Turn => Some(HandPhase::River),
            _ => None,
        }
    }

    pub fn is_betting(&self) -> bool {
        Self::BETTING.contains(self)
    }

    /// Community cards dealt when entering this phase.
    pub fn board_cards(&self) -> usize {
        match self {
            HandPhase::Flop => 3,
            HandPhase::Turn | HandPhase::River => 1,
            _ => 0,
        }
    }
}
