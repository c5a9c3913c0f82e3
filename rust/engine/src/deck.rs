use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// Seed used when the table config does not supply one.
pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Source of cards for a hand. The table calls `shuffle` once when a hand
/// starts, then draws every card the hand can need: hole cards, then a burn
/// before each of flop, turn and river. A dealer that runs short fails
/// `start_hand` before any chips move.
pub trait Dealer: std::fmt::Debug {
    fn shuffle(&mut self);
    fn deal(&mut self) -> Option<Card>;

    fn burn(&mut self) {
        let _ = self.deal();
    }
}

/// Deterministic deck shuffled with ChaCha20.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl Dealer for Deck {
    fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    fn deal(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }
}

/// Deals a fixed card sequence, restarting from the top on every shuffle.
/// Used to replay recorded hands and to stage specific boards.
#[derive(Debug, Clone)]
pub struct StackedDeck {
    cards: Vec<Card>,
    position: usize,
}

impl StackedDeck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards, position: 0 }
    }
}

impl Dealer for StackedDeck {
    fn shuffle(&mut self) {
        self.position = 0;
    }

    fn deal(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }
}
