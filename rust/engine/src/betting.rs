//! Betting round engine.
//!
//! A [`BettingRound`] lives for exactly one street. It owns the turn pointer,
//! the bet to match and the minimum raise increment; the seats themselves stay
//! in the table's ledger and are passed in on every call.

use tracing::debug;

use crate::errors::GameError;
use crate::history::{ActionRecord, ActionType};
use crate::phase::HandPhase;
use crate::player::{Player, PlayerAction, PlayerState};
use crate::{Chips, SeatIdx};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingRound {
    phase: HandPhase,
    current_bet: Chips,
    min_raise: Chips,
    to_act: Option<SeatIdx>,
}

impl BettingRound {
    /// Opens a street. Bets already on the table (the blinds) set the amount
    /// to match; the first actor is the first seat clockwise after `after`
    /// that still owes a decision.
    pub fn open(phase: HandPhase, big_blind: Chips, players: &mut [Player], after: SeatIdx) -> Self {
        let current_bet = players.iter().map(Player::street_bet).max().unwrap_or(0);
        for p in players.iter_mut().filter(|p| p.state().can_act()) {
            p.set_state(owed_state(p.street_bet(), current_bet));
        }
        let mut round = Self {
            phase,
            current_bet,
            min_raise: big_blind,
            to_act: None,
        };
        round.to_act = round.next_actor(players, after);
        round
    }

    pub fn phase(&self) -> HandPhase {
        self.phase
    }
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn min_raise(&self) -> Chips {
        self.min_raise
    }
    pub fn to_act(&self) -> Option<SeatIdx> {
        self.to_act
    }

    /// Every live seat that can still act has matched the bet and acted since
    /// the last full raise.
    pub fn is_closed(&self) -> bool {
        self.to_act.is_none()
    }

    pub fn to_call(&self, player: &Player) -> Chips {
        self.current_bet.saturating_sub(player.street_bet())
    }

    pub fn legal_actions(&self, players: &[Player], seat: SeatIdx) -> Vec<ActionType> {
        let Some(p) = players.get(seat) else {
            return Vec::new();
        };
        if self.to_act != Some(seat) {
            return Vec::new();
        }
        let to_call = self.to_call(p);
        let mut legal = vec![ActionType::Fold];
        if to_call == 0 {
            legal.push(ActionType::Check);
        } else if p.chips() >= to_call {
            legal.push(ActionType::Call);
        }
        if self.raise_ceiling(p).is_some() {
            legal.push(ActionType::Raise);
        }
        if p.chips() > 0 {
            legal.push(ActionType::AllIn);
        }
        legal
    }

    /// Largest legal raise increment, if a full raise is possible at all.
    fn raise_ceiling(&self, p: &Player) -> Option<Chips> {
        let max = p.chips().checked_sub(self.to_call(p))?;
        (max >= self.min_raise && max > 0).then_some(max)
    }

    /// Validates and applies one action. Nothing is mutated unless the
    /// action is accepted.
    pub fn apply(
        &mut self,
        players: &mut [Player],
        seat: SeatIdx,
        action: PlayerAction,
    ) -> Result<ActionRecord, GameError> {
        let expected = self.to_act.ok_or(GameError::WrongPhase {
            operation: "Betting",
            phase: self.phase,
        })?;
        if seat >= players.len() {
            return Err(GameError::NoSuchSeat { seat });
        }
        if seat != expected {
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: seat,
            });
        }

        let to_call = self.to_call(&players[seat]);
        let chips = players[seat].chips();
        let illegal = |action| GameError::IllegalAction { seat, action };

        let (action_type, moved) = match action {
            PlayerAction::Fold => {
                players[seat].set_state(PlayerState::Folded);
                (ActionType::Fold, None)
            }
            PlayerAction::Check => {
                if to_call > 0 {
                    return Err(illegal(ActionType::Check));
                }
                (ActionType::Check, None)
            }
            PlayerAction::Call => {
                if to_call == 0 || chips < to_call {
                    return Err(illegal(ActionType::Call));
                }
                (ActionType::Call, Some(players[seat].commit(to_call)))
            }
            PlayerAction::Raise(by) => {
                if chips <= to_call {
                    return Err(illegal(ActionType::Raise));
                }
                // below a full raise the range is empty and any amount fails
                let max = chips - to_call;
                if by < self.min_raise || by > max {
                    return Err(GameError::AmountOutOfRange {
                        amount: i64::from(by),
                        min: i64::from(self.min_raise),
                        max: i64::from(max),
                    });
                }
                let moved = players[seat].commit(to_call + by);
                self.current_bet += by;
                self.min_raise = by;
                self.reopen(players, seat);
                (ActionType::Raise, Some(moved))
            }
            PlayerAction::AllIn => {
                if chips == 0 {
                    return Err(illegal(ActionType::AllIn));
                }
                let moved = players[seat].commit(chips);
                let bet = players[seat].street_bet();
                if bet > self.current_bet {
                    let by = bet - self.current_bet;
                    // a short all-in raises the bet but not the increment
                    if by >= self.min_raise {
                        self.min_raise = by;
                    }
                    self.current_bet = bet;
                    self.reopen(players, seat);
                }
                (ActionType::AllIn, Some(moved))
            }
        };

        let p = &mut players[seat];
        p.set_acted(true);
        if p.state().can_act() {
            p.set_state(PlayerState::In);
        }
        let record = ActionRecord {
            player_id: seat,
            action_type,
            amount: moved,
            total: Some(p.street_bet()),
            phase: self.phase,
        };
        debug!(
            seat,
            action = action_type.as_str(),
            amount = moved.unwrap_or(0),
            current_bet = self.current_bet,
            "applied action"
        );

        let live = players.iter().filter(|p| p.state().is_live()).count();
        self.to_act = if live <= 1 {
            None
        } else {
            self.next_actor(players, seat)
        };
        Ok(record)
    }

    /// After a raise everyone else who can act owes chips and a decision.
    fn reopen(&self, players: &mut [Player], raiser: SeatIdx) {
        for p in players
            .iter_mut()
            .filter(|p| p.seat() != raiser && p.state().can_act())
        {
            p.set_acted(false);
            p.set_state(owed_state(p.street_bet(), self.current_bet));
        }
    }

    fn needs_action(&self, players: &[Player], p: &Player) -> bool {
        if !p.state().can_act() {
            return false;
        }
        let owes = p.street_bet() < self.current_bet;
        let can_act = players.iter().filter(|q| q.state().can_act()).count();
        // nobody left to bet against
        if can_act == 1 && !owes {
            return false;
        }
        owes || !p.has_acted()
    }

    fn next_actor(&self, players: &[Player], after: SeatIdx) -> Option<SeatIdx> {
        let n = players.len();
        (1..=n)
            .map(|offset| (after + offset) % n)
            .find(|&i| self.needs_action(players, &players[i]))
    }
}

fn owed_state(street_bet: Chips, current_bet: Chips) -> PlayerState {
    if street_bet < current_bet {
        PlayerState::ToCall
    } else {
        PlayerState::In
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(stacks: &[Chips]) -> Vec<Player> {
        stacks
            .iter()
            .enumerate()
            .map(|(i, &c)| Player::new(i, c))
            .collect()
    }

    #[test]
    fn single_actor_facing_no_bet_is_skipped() {
        let mut players = seats(&[0, 100]);
        players[0].set_state(PlayerState::AllIn);
        let round = BettingRound::open(HandPhase::Flop, 2, &mut players, 0);
        assert!(round.is_closed());
    }

    #[test]
    fn owed_state_marks_to_call() {
        assert_eq!(owed_state(1, 2), PlayerState::ToCall);
        assert_eq!(owed_state(2, 2), PlayerState::In);
    }
}
