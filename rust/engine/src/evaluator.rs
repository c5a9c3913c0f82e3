//! Showdown comparison.
//!
//! The table only needs a total order over seven-card hands; it never looks
//! inside a hand's strength. [`HandEvaluator`] is that seam, and
//! [`StandardEvaluator`] is the default high-hand ranking.

use std::cmp::Ordering;

use crate::cards::Card;

/// Pure comparator used at showdown. `Ordering::Equal` means the hands tie
/// and split the pot.
pub trait HandEvaluator: std::fmt::Debug {
    fn compare(&self, a: &[Card; 7], b: &[Card; 7]) -> Ordering;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

/// Category plus tiebreak ranks, high to low. Derived ordering compares
/// category first, then kickers lexicographically.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct HandStrength {
    pub category: Category,
    pub kickers: [u8; 5],
}

/// Best five-card high hand out of seven cards.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn compare(&self, a: &[Card; 7], b: &[Card; 7]) -> Ordering {
        evaluate(a).cmp(&evaluate(b))
    }
}

pub fn evaluate(cards: &[Card; 7]) -> HandStrength {
    let mut counts = [0u8; 15];
    let mut rank_mask = 0u16;
    let mut by_suit: [Vec<u8>; 4] = Default::default();
    for c in cards {
        let r = c.rank.value();
        counts[r as usize] += 1;
        rank_mask |= 1 << r;
        by_suit[c.suit as usize].push(r);
    }

    if let Some(suited) = by_suit.iter_mut().find(|s| s.len() >= 5) {
        suited.sort_unstable_by(|a, b| b.cmp(a));
        let mask = suited.iter().fold(0u16, |m, &r| m | (1 << r));
        if let Some(high) = straight_high(mask) {
            return strength(Category::StraightFlush, &[high]);
        }
        // seven cards cannot hold a flush together with quads or a full house
        return strength(Category::Flush, &suited[..5]);
    }

    let groups = groups(&counts);
    let (top_count, top_rank) = groups[0];
    match top_count {
        4 => {
            let kicker = highest_excluding(&counts, &[top_rank]);
            strength(Category::FourOfAKind, &[top_rank, kicker])
        }
        3 if groups.get(1).is_some_and(|g| g.0 >= 2) => {
            strength(Category::FullHouse, &[top_rank, groups[1].1])
        }
        _ => {
            if let Some(high) = straight_high(rank_mask) {
                return strength(Category::Straight, &[high]);
            }
            let mut ks = vec![top_rank];
            let category = match top_count {
                3 => Category::ThreeOfAKind,
                2 if groups.get(1).is_some_and(|g| g.0 == 2) => {
                    ks.push(groups[1].1);
                    Category::TwoPair
                }
                2 => Category::OnePair,
                _ => Category::HighCard,
            };
            let rest: Vec<u8> = (2..=14u8)
                .rev()
                .filter(|r| counts[*r as usize] > 0 && !ks.contains(r))
                .collect();
            ks.extend(rest);
            ks.truncate(kicker_len(category));
            strength(category, &ks)
        }
    }
}

fn kicker_len(category: Category) -> usize {
    match category {
        Category::ThreeOfAKind => 3,
        Category::TwoPair => 3,
        Category::OnePair => 4,
        _ => 5,
    }
}

fn strength(category: Category, ranks: &[u8]) -> HandStrength {
    let mut kickers = [0u8; 5];
    for (k, r) in kickers.iter_mut().zip(ranks) {
        *k = *r;
    }
    HandStrength { category, kickers }
}

/// (count, rank) pairs, largest group first, ties broken by rank.
fn groups(counts: &[u8; 15]) -> Vec<(u8, u8)> {
    let mut g: Vec<(u8, u8)> = (2..=14u8)
        .filter(|r| counts[*r as usize] > 0)
        .map(|r| (counts[r as usize], r))
        .collect();
    g.sort_unstable_by(|a, b| b.cmp(a));
    g
}

fn highest_excluding(counts: &[u8; 15], used: &[u8]) -> u8 {
    (2..=14u8)
        .rev()
        .find(|r| counts[*r as usize] > 0 && !used.contains(r))
        .unwrap_or(0)
}

fn straight_high(mask: u16) -> Option<u8> {
    // ace plays low in the wheel
    let mask = if mask & (1 << 14) != 0 { mask | 0b10 } else { mask };
    (5..=14u8).rev().find(|&h| {
        let run = 0b1_1111u16 << (h - 4);
        mask & run == run
    })
}
