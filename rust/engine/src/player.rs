use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::{Chips, SeatIdx};

/// Participation state of a seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerState {
    /// Live in the hand with nothing owed, or ready for the next hand.
    In,
    /// Left the table.
    Out,
    /// Sitting out, e.g. with zero chips.
    Skip,
    /// Live in the hand and facing a bet.
    ToCall,
    AllIn,
    Folded,
}

impl PlayerState {
    /// Still contesting the pot.
    pub fn is_live(self) -> bool {
        matches!(self, PlayerState::In | PlayerState::ToCall | PlayerState::AllIn)
    }

    /// Owes decisions in the current betting round.
    pub fn can_act(self) -> bool {
        matches!(self, PlayerState::In | PlayerState::ToCall)
    }
}

/// Action submitted by the seat whose turn it is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    /// Raise the current bet by the given increment.
    Raise(Chips),
    AllIn,
}

/// A seat's ledger entry: balance, participation state and what it has put
/// into the current hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    seat: SeatIdx,
    chips: Chips,
    state: PlayerState,
    hole: [Option<Card>; 2],
    /// Chips put in during the current street.
    street_bet: Chips,
    /// Chips put in during the whole hand.
    committed: Chips,
    /// Has acted since the last full raise.
    acted: bool,
}

impl Player {
    pub fn new(seat: SeatIdx, chips: Chips) -> Self {
        Self {
            seat,
            chips,
            state: if chips > 0 {
                PlayerState::In
            } else {
                PlayerState::Skip
            },
            hole: [None, None],
            street_bet: 0,
            committed: 0,
            acted: false,
        }
    }

    pub fn seat(&self) -> SeatIdx {
        self.seat
    }
    pub fn chips(&self) -> Chips {
        self.chips
    }
    pub fn state(&self) -> PlayerState {
        self.state
    }
    pub fn street_bet(&self) -> Chips {
        self.street_bet
    }
    pub fn committed(&self) -> Chips {
        self.committed
    }
    pub fn hole_cards(&self) -> [Option<Card>; 2] {
        self.hole
    }
    pub fn has_acted(&self) -> bool {
        self.acted
    }

    /// Overrides the balance. Intended for table management and test setup;
    /// hand play moves chips through [`Player::commit`] and [`Player::add_chips`].
    pub fn set_chips(&mut self, chips: Chips) {
        self.chips = chips;
    }
    pub fn set_state(&mut self, state: PlayerState) {
        self.state = state;
    }

    pub(crate) fn set_acted(&mut self, acted: bool) {
        self.acted = acted;
    }

    pub(crate) fn give_card(&mut self, c: Card) -> bool {
        match self.hole.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(c);
                true
            }
            None => false,
        }
    }

    /// Moves up to `amount` chips from the balance into the pot and returns
    /// what was actually moved. An emptied stack goes all-in.
    pub(crate) fn commit(&mut self, amount: Chips) -> Chips {
        let actual = amount.min(self.chips);
        self.chips -= actual;
        self.street_bet += actual;
        self.committed += actual;
        if self.chips == 0 && self.state.is_live() {
            self.state = PlayerState::AllIn;
        }
        actual
    }

    pub(crate) fn add_chips(&mut self, amount: Chips) {
        self.chips = self.chips.saturating_add(amount);
    }

    /// Forgets what was put in once the pots have been paid out.
    pub(crate) fn clear_bets(&mut self) {
        self.street_bet = 0;
        self.committed = 0;
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.street_bet = 0;
        self.acted = false;
    }

    /// Clears per-hand fields and picks the state the seat enters the next
    /// hand with. `Out` is sticky; an empty stack sits out.
    pub(crate) fn reset_for_hand(&mut self) {
        self.hole = [None, None];
        self.street_bet = 0;
        self.committed = 0;
        self.acted = false;
        self.state = match self.state {
            PlayerState::Out => PlayerState::Out,
            PlayerState::Skip if self.chips > 0 => PlayerState::Skip,
            _ if self.chips == 0 => PlayerState::Skip,
            _ => PlayerState::In,
        };
    }
}
