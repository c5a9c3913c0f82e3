//! The game session.
//!
//! [`Table`] owns the ledger, the open hand history, the dealer and the
//! evaluator, and drives the hand through
//! `Prehand -> Preflop -> Flop -> Turn -> River -> Settle -> Prehand`.
//! Every public operation runs to completion before returning; callers must
//! serialize access to a table themselves.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::betting::BettingRound;
use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::{Dealer, Deck, DEFAULT_SEED};
use crate::errors::{ConfigError, GameError};
use crate::evaluator::{HandEvaluator, StandardEvaluator};
use crate::history::{ActionType, History, PrehandHistory, SettleHistory};
use crate::phase::HandPhase;
use crate::player::{Player, PlayerAction, PlayerState};
use crate::pot::{Commitment, Pot, PotManager};
use crate::{Chips, SeatIdx};

#[derive(Debug)]
pub struct Table {
    pub(crate) config: TableConfig,
    pub(crate) players: Vec<Player>,
    pub(crate) phase: HandPhase,
    button: Option<SeatIdx>,
    dealer: Box<dyn Dealer>,
    evaluator: Box<dyn HandEvaluator>,
    board: Vec<Card>,
    /// Flop, turn and river drawn at hand start, revealed street by street.
    runout: Vec<Card>,
    round: Option<BettingRound>,
    pub(crate) history: History,
    completed: Vec<History>,
    next_hand_id: u64,
}

impl Table {
    /// Seats `config.seats` players with `config.buyin` chips each, using a
    /// seeded [`Deck`] and the [`StandardEvaluator`].
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        let deck = Deck::new_with_seed(config.seed.unwrap_or(DEFAULT_SEED));
        Self::with_collaborators(config, Box::new(deck), Box::new(StandardEvaluator))
    }

    pub fn with_collaborators(
        config: TableConfig,
        dealer: Box<dyn Dealer>,
        evaluator: Box<dyn HandEvaluator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let players = (0..config.seats)
            .map(|seat| Player::new(seat, config.buyin))
            .collect();
        let mut table = Self {
            config,
            players,
            phase: HandPhase::Prehand,
            button: None,
            dealer,
            evaluator,
            board: Vec::with_capacity(5),
            runout: Vec::with_capacity(5),
            round: None,
            history: History::default(),
            completed: Vec::new(),
            next_hand_id: 1,
        };
        table.history = table.open_history();
        Ok(table)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn phase(&self) -> HandPhase {
        self.phase
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, seat: SeatIdx) -> Option<&Player> {
        self.players.get(seat)
    }
    /// Direct ledger access for table management and tests. Changes made
    /// here bypass validation and history.
    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn button(&self) -> SeatIdx {
        self.button.unwrap_or(0)
    }
    pub fn round(&self) -> Option<&BettingRound> {
        self.round.as_ref()
    }
    /// History of the hand in progress, or of the next hand while resting
    /// in `Prehand`.
    pub fn history(&self) -> &History {
        &self.history
    }
    /// Finalized histories, oldest first.
    pub fn completed_hands(&self) -> &[History] {
        &self.completed
    }

    pub fn current_player(&self) -> Option<SeatIdx> {
        self.round.as_ref().and_then(BettingRound::to_act)
    }

    pub fn legal_actions(&self, seat: SeatIdx) -> Vec<ActionType> {
        match &self.round {
            Some(round) => round.legal_actions(&self.players, seat),
            None => Vec::new(),
        }
    }

    /// Main pot and side pots for what has been committed so far.
    pub fn pots(&self) -> Vec<Pot> {
        PotManager::from_commitments(&self.commitments()).into_pots()
    }

    /// Balances plus chips committed to the current hand.
    pub fn total_chips(&self) -> Chips {
        self.players
            .iter()
            .map(|p| p.chips() + p.committed())
            .sum()
    }

    pub fn sit_out(&mut self, seat: SeatIdx) -> Result<(), GameError> {
        self.set_seat_state(seat, "sitting out", PlayerState::Skip)
    }

    pub fn leave(&mut self, seat: SeatIdx) -> Result<(), GameError> {
        self.set_seat_state(seat, "leaving", PlayerState::Out)
    }

    pub fn sit_in(&mut self, seat: SeatIdx) -> Result<(), GameError> {
        let p = self.players.get(seat).ok_or(GameError::NoSuchSeat { seat })?;
        if p.chips() == 0 && self.phase == HandPhase::Prehand {
            return Err(GameError::InvalidState {
                seat,
                state: p.state(),
                operation: "sitting in",
            });
        }
        self.set_seat_state(seat, "sitting in", PlayerState::In)
    }

    fn set_seat_state(
        &mut self,
        seat: SeatIdx,
        operation: &'static str,
        state: PlayerState,
    ) -> Result<(), GameError> {
        if self.phase != HandPhase::Prehand {
            return Err(GameError::WrongPhase {
                operation,
                phase: self.phase,
            });
        }
        let p = self
            .players
            .get_mut(seat)
            .ok_or(GameError::NoSuchSeat { seat })?;
        p.set_state(state);
        debug!(seat, ?state, operation, "seat state changed");
        Ok(())
    }

    /// Leaves `Prehand`: picks the button, posts blinds, deals hole cards and
    /// opens the preflop betting round.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        if self.phase != HandPhase::Prehand {
            return Err(GameError::WrongPhase {
                operation: "Starting a hand",
                phase: self.phase,
            });
        }
        let dealt: Vec<SeatIdx> = self
            .players
            .iter()
            .filter(|p| p.chips() > 0 && !matches!(p.state(), PlayerState::Out | PlayerState::Skip))
            .map(Player::seat)
            .collect();
        if dealt.len() < 2 {
            return Err(GameError::NotEnoughPlayers {
                available: dealt.len(),
            });
        }

        // draw before touching the ledger so a short deck leaves no trace
        self.dealer.shuffle();
        let mut hole = Vec::with_capacity(dealt.len() * 2);
        for _ in 0..dealt.len() * 2 {
            hole.push(self.dealer.deal().ok_or(GameError::DeckExhausted)?);
        }
        let mut runout = Vec::with_capacity(5);
        for street in [HandPhase::Flop, HandPhase::Turn, HandPhase::River] {
            self.dealer.burn();
            for _ in 0..street.board_cards() {
                runout.push(self.dealer.deal().ok_or(GameError::DeckExhausted)?);
            }
        }

        let next = self.phase.transition_to(HandPhase::Preflop)?;
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.board.clear();
        self.runout = runout;
        let button = match self.button {
            None => dealt[0],
            Some(b) => next_in(&dealt, b),
        };
        self.button = Some(button);

        for (i, card) in hole.into_iter().enumerate() {
            // one card each, twice round, starting left of the button
            let seat = next_in(&dealt, rotate(&dealt, button, i % dealt.len()));
            self.players[seat].give_card(card);
        }

        let prehand = &mut self.history.prehand;
        prehand.btn_loc = button;
        prehand.small_blind = self.config.small_blind;
        prehand.big_blind = self.config.big_blind;
        prehand.player_chips = self.players.iter().map(|p| (p.seat(), p.chips())).collect();
        prehand.player_cards = self
            .players
            .iter()
            .filter(|p| p.hole_cards()[0].is_some())
            .map(|p| (p.seat(), p.hole_cards().iter().flatten().copied().collect()))
            .collect();

        let (sb, bb) = if dealt.len() == 2 {
            (button, next_in(&dealt, button))
        } else {
            let sb = next_in(&dealt, button);
            (sb, next_in(&dealt, sb))
        };
        self.players[sb].commit(self.config.small_blind);
        self.players[bb].commit(self.config.big_blind);

        self.phase = next;
        self.history.open_street(HandPhase::Preflop, Vec::new())?;
        self.round = Some(BettingRound::open(
            HandPhase::Preflop,
            self.config.big_blind,
            &mut self.players,
            bb,
        ));
        info!(
            hand_id = self.history.hand_id,
            button,
            small_blind = sb,
            big_blind = bb,
            players = dealt.len(),
            "hand started"
        );
        self.progress()
    }

    /// Applies one betting action for `seat` and moves the hand forward when
    /// the round closes.
    pub fn take_action(&mut self, seat: SeatIdx, action: PlayerAction) -> Result<(), GameError> {
        if !self.phase.is_betting() {
            return Err(GameError::WrongPhase {
                operation: "Taking an action",
                phase: self.phase,
            });
        }
        let round = self.round.as_mut().ok_or(GameError::WrongPhase {
            operation: "Taking an action",
            phase: self.phase,
        })?;
        let record = match round.apply(&mut self.players, seat, action) {
            Ok(record) => record,
            Err(e) => {
                debug!(seat, ?action, error = %e, "action rejected");
                return Err(e);
            }
        };
        self.history.record(record)?;
        self.progress()
    }

    /// Deals streets while rounds close, and settles once betting is over.
    fn progress(&mut self) -> Result<(), GameError> {
        while self.round.as_ref().is_some_and(BettingRound::is_closed) {
            let live = self.players.iter().filter(|p| p.state().is_live()).count();
            if live <= 1 {
                return self.settle(false);
            }
            let Some(street) = self.phase.next_street() else {
                return self.settle(true);
            };
            self.deal_street(street)?;
        }
        Ok(())
    }

    fn deal_street(&mut self, street: HandPhase) -> Result<(), GameError> {
        let next = self.phase.transition_to(street)?;
        let n = street.board_cards();
        if self.runout.len() < n {
            return Err(GameError::DeckExhausted);
        }
        let cards: Vec<Card> = self.runout.drain(..n).collect();
        self.board.extend(&cards);
        self.history.open_street(street, cards)?;
        self.phase = next;
        for p in &mut self.players {
            p.reset_for_street();
        }
        let after = self.button();
        self.round = Some(BettingRound::open(
            street,
            self.config.big_blind,
            &mut self.players,
            after,
        ));
        debug!(phase = ?street, board = ?self.board, "street dealt");
        Ok(())
    }

    fn commitments(&self) -> Vec<Commitment> {
        self.players
            .iter()
            .filter(|p| p.committed() > 0)
            .map(|p| Commitment {
                seat: p.seat(),
                amount: p.committed(),
                live: p.state().is_live(),
            })
            .collect()
    }

    /// Seats clockwise starting left of the button.
    fn order_from_button(&self) -> Vec<SeatIdx> {
        let n = self.players.len();
        (1..=n).map(|i| (self.button() + i) % n).collect()
    }

    fn seven_cards(&self, seat: SeatIdx) -> Option<[Card; 7]> {
        let hole = self.players.get(seat)?.hole_cards();
        let cards: Vec<Card> = hole.iter().flatten().chain(&self.board).copied().collect();
        cards.try_into().ok()
    }

    fn best_hands(&self, eligible: &[SeatIdx]) -> Vec<SeatIdx> {
        let mut best: Vec<(SeatIdx, [Card; 7])> = Vec::new();
        for &seat in eligible {
            let Some(cards) = self.seven_cards(seat) else {
                continue;
            };
            match best.first() {
                None => best.push((seat, cards)),
                Some((_, top)) => match self.evaluator.compare(&cards, top) {
                    Ordering::Greater => best = vec![(seat, cards)],
                    Ordering::Equal => best.push((seat, cards)),
                    Ordering::Less => {}
                },
            }
        }
        best.into_iter().map(|(seat, _)| seat).collect()
    }

    fn settle(&mut self, showdown: bool) -> Result<(), GameError> {
        self.phase = self.phase.transition_to(HandPhase::Settle)?;
        self.round = None;
        self.runout.clear();

        let pots = PotManager::from_commitments(&self.commitments());
        let payouts = pots.award(&self.order_from_button(), |pot| {
            self.best_hands(&pot.eligible)
        });
        for (&seat, &won) in &payouts {
            self.players[seat].add_chips(won);
        }
        for p in &mut self.players {
            p.clear_bets();
            let state = match p.state() {
                PlayerState::Out => PlayerState::Out,
                _ if p.chips() == 0 => PlayerState::Skip,
                PlayerState::Skip => PlayerState::Skip,
                _ => PlayerState::In,
            };
            p.set_state(state);
        }

        let settled = SettleHistory {
            board: self.board.clone(),
            pots: pots.pots().to_vec(),
            payouts: payouts.clone(),
            final_chips: self.players.iter().map(|p| (p.seat(), p.chips())).collect(),
            showdown,
        };
        self.history.settle(settled)?;
        self.history.finalize();
        info!(
            hand_id = self.history.hand_id,
            pot = pots.total(),
            winners = ?payouts.keys().collect::<Vec<_>>(),
            showdown,
            "hand settled"
        );

        let fresh = self.open_history();
        self.completed.push(std::mem::replace(&mut self.history, fresh));
        self.phase = self.phase.transition_to(HandPhase::Prehand)?;
        Ok(())
    }

    fn open_history(&mut self) -> History {
        let id = self.next_hand_id;
        self.next_hand_id += 1;
        History::new(
            id,
            PrehandHistory {
                btn_loc: self.button(),
                small_blind: self.config.small_blind,
                big_blind: self.config.big_blind,
                player_chips: self
                    .players
                    .iter()
                    .map(|p| (p.seat(), p.chips()))
                    .collect::<BTreeMap<_, _>>(),
                player_cards: BTreeMap::new(),
                actions: Vec::new(),
            },
        )
    }
}

/// First seat in `seats` clockwise after `from`. `seats` is sorted.
fn next_in(seats: &[SeatIdx], from: SeatIdx) -> SeatIdx {
    seats
        .iter()
        .copied()
        .find(|&s| s > from)
        .unwrap_or(seats[0])
}

/// The seat `steps` places clockwise from `from` among `seats`.
fn rotate(seats: &[SeatIdx], from: SeatIdx, steps: usize) -> SeatIdx {
    (0..steps).fold(from, |s, _| next_in(seats, s))
}
