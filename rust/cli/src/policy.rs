//! Baseline seat policy used by `holdem play`.
//!
//! The policy only looks at what the table exposes to every caller: the legal
//! action list, the amount to call and the seat's stack. It never peeks at
//! cards, so sessions exercise the rules rather than any strategy.

use holdem_engine::SeatIdx;
use holdem_engine::history::ActionType;
use holdem_engine::player::PlayerAction;
use holdem_engine::table::Table;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const RAISE_CHANCE: f64 = 0.15;

/// Check when free, call while the call costs at most a quarter of the
/// stack, now and then make the minimum raise, otherwise fold.
#[derive(Debug)]
pub struct BaselinePolicy {
    rng: ChaCha20Rng,
}

impl BaselinePolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn choose(&mut self, table: &Table, seat: SeatIdx) -> PlayerAction {
        let legal = table.legal_actions(seat);
        let (Some(p), Some(round)) = (table.player(seat), table.round()) else {
            return PlayerAction::Fold;
        };
        if legal.contains(&ActionType::Raise) && self.rng.random_bool(RAISE_CHANCE) {
            return PlayerAction::Raise(round.min_raise());
        }
        if legal.contains(&ActionType::Check) {
            return PlayerAction::Check;
        }
        let to_call = round.to_call(p);
        if legal.contains(&ActionType::Call) && to_call.saturating_mul(4) <= p.chips() {
            return PlayerAction::Call;
        }
        PlayerAction::Fold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::config::TableConfig;

    #[test]
    fn always_picks_a_legal_action() {
        let mut table = Table::new(TableConfig {
            seats: 3,
            seed: Some(5),
            ..TableConfig::default()
        })
        .unwrap();
        let mut policy = BaselinePolicy::new(5);
        table.start_hand().unwrap();
        while let Some(seat) = table.current_player() {
            let action = policy.choose(&table, seat);
            table.take_action(seat, action).unwrap();
        }
        assert_eq!(table.completed_hands().len(), 1);
    }

    #[test]
    fn folds_when_not_seated_in_a_round() {
        let table = Table::new(TableConfig::default()).unwrap();
        let mut policy = BaselinePolicy::new(1);
        assert_eq!(policy.choose(&table, 0), PlayerAction::Fold);
    }
}
