use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Chips, SeatIdx};

/// A main or side pot and the seats that can win it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<SeatIdx>,
}

/// What one seat has put into the hand so far.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Commitment {
    pub seat: SeatIdx,
    pub amount: Chips,
    /// Not folded. Folded chips still fill pots but can't win them.
    pub live: bool,
}

/// Splits the chips committed to a hand into a main pot and side pots.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl PotManager {
    /// Pots are cut at every distinct live commitment level. Each level holds
    /// what every contributor put in between the previous level and this one,
    /// and is eligible to live seats that reached it. Adjacent pots with the
    /// same eligible seats are merged.
    pub fn from_commitments(commitments: &[Commitment]) -> Self {
        let mut levels: Vec<Chips> = commitments
            .iter()
            .filter(|c| c.live && c.amount > 0)
            .map(|c| c.amount)
            .collect();
        if let Some(max) = commitments.iter().map(|c| c.amount).max() {
            levels.push(max);
        }
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::new();
        let mut carried: Chips = 0;
        let mut prev = 0;
        for level in levels.into_iter().filter(|l| *l > 0) {
            let amount: Chips = commitments
                .iter()
                .map(|c| c.amount.min(level) - c.amount.min(prev))
                .sum::<Chips>()
                + carried;
            let eligible: Vec<SeatIdx> = commitments
                .iter()
                .filter(|c| c.live && c.amount >= level)
                .map(|c| c.seat)
                .collect();
            prev = level;

            if eligible.is_empty() {
                // folded excess above every live stack
                match pots.last_mut() {
                    Some(last) => last.amount += amount,
                    None => carried = amount,
                }
                continue;
            }
            carried = 0;
            match pots.last_mut() {
                Some(last) if last.eligible == eligible => last.amount += amount,
                _ => pots.push(Pot { amount, eligible }),
            }
        }
        Self { pots }
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn into_pots(self) -> Vec<Pot> {
        self.pots
    }

    pub fn main_pot(&self) -> Chips {
        self.pots.first().map_or(0, |p| p.amount)
    }

    pub fn side_pots(&self) -> &[Pot] {
        self.pots.get(1..).unwrap_or(&[])
    }

    pub fn total(&self) -> Chips {
        self.pots.iter().map(|p| p.amount).sum()
    }

    /// Pays every pot to the seats `winners_for` picks among its eligible
    /// seats. A tied pot splits evenly; the odd chips all go to the tied
    /// winner who comes first in `order` (clockwise from the seat after the
    /// button). If `winners_for` picks nobody the pot is split among all its
    /// eligible seats so no chips leave the ledger.
    pub fn award<F>(&self, order: &[SeatIdx], mut winners_for: F) -> BTreeMap<SeatIdx, Chips>
    where
        F: FnMut(&Pot) -> Vec<SeatIdx>,
    {
        let position = |seat: &SeatIdx| order.iter().position(|s| s == seat).unwrap_or(usize::MAX);
        let mut payouts = BTreeMap::new();
        for pot in &self.pots {
            let mut winners = if pot.eligible.len() == 1 {
                pot.eligible.clone()
            } else {
                winners_for(pot)
            };
            if winners.is_empty() {
                winners = pot.eligible.clone();
            }
            winners.sort_by_key(position);
            let n = winners.len() as Chips;
            let share = pot.amount / n;
            let remainder = pot.amount % n;
            for (i, seat) in winners.iter().enumerate() {
                let won = if i == 0 { share + remainder } else { share };
                *payouts.entry(*seat).or_insert(0) += won;
            }
        }
        payouts
    }
}
