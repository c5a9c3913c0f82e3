//! Append-only record of a single hand.
//!
//! A [`History`] is opened while the table rests in `Prehand` (so rebuys can
//! be logged), filled street by street as the hand plays out, and finalized
//! at settlement. Once finalized it rejects every further append.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::phase::HandPhase;
use crate::pot::Pot;
use crate::{Chips, SeatIdx};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
    Rebuy,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Fold => "FOLD",
            ActionType::Check => "CHECK",
            ActionType::Call => "CALL",
            ActionType::Raise => "RAISE",
            ActionType::AllIn => "ALL_IN",
            ActionType::Rebuy => "REBUY",
        }
    }
}

/// One state-changing action.
///
/// For betting actions `amount` is the chips moved by the action and `total`
/// the seat's bet for the street afterwards. For `Rebuy`, `amount` is the
/// chips added and `total` the resulting balance.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player_id: SeatIdx,
    pub action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Chips>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Chips>,
    pub phase: HandPhase,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PrehandHistory {
    pub btn_loc: SeatIdx,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Balances when the hand started, after rebuys and before blinds.
    pub player_chips: BTreeMap<SeatIdx, Chips>,
    pub player_cards: BTreeMap<SeatIdx, Vec<Card>>,
    pub actions: Vec<ActionRecord>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BettingHistory {
    /// Community cards revealed when the street opened.
    pub new_cards: Vec<Card>,
    pub actions: Vec<ActionRecord>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SettleHistory {
    pub board: Vec<Card>,
    pub pots: Vec<Pot>,
    pub payouts: BTreeMap<SeatIdx, Chips>,
    pub final_chips: BTreeMap<SeatIdx, Chips>,
    /// False when everyone but one seat folded.
    pub showdown: bool,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub hand_id: u64,
    pub prehand: PrehandHistory,
    #[serde(default)]
    pub preflop: Option<BettingHistory>,
    #[serde(default)]
    pub flop: Option<BettingHistory>,
    #[serde(default)]
    pub turn: Option<BettingHistory>,
    #[serde(default)]
    pub river: Option<BettingHistory>,
    #[serde(default)]
    pub settle: Option<SettleHistory>,
    #[serde(default)]
    finalized: bool,
}

impl History {
    pub fn new(hand_id: u64, prehand: PrehandHistory) -> Self {
        Self {
            hand_id,
            prehand,
            ..Self::default()
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn betting(&self, phase: HandPhase) -> Option<&BettingHistory> {
        match phase {
            HandPhase::Preflop => self.preflop.as_ref(),
            HandPhase::Flop => self.flop.as_ref(),
            HandPhase::Turn => self.turn.as_ref(),
            HandPhase::River => self.river.as_ref(),
            HandPhase::Prehand | HandPhase::Settle => None,
        }
    }

    fn betting_slot(&mut self, phase: HandPhase) -> Option<&mut Option<BettingHistory>> {
        match phase {
            HandPhase::Preflop => Some(&mut self.preflop),
            HandPhase::Flop => Some(&mut self.flop),
            HandPhase::Turn => Some(&mut self.turn),
            HandPhase::River => Some(&mut self.river),
            HandPhase::Prehand | HandPhase::Settle => None,
        }
    }

    /// Appends `record` to the list for the phase it was taken in.
    pub fn record(&mut self, record: ActionRecord) -> Result<(), GameError> {
        if self.finalized {
            return Err(GameError::HistoryFinalized);
        }
        let phase = record.phase;
        if phase == HandPhase::Prehand {
            self.prehand.actions.push(record);
            return Ok(());
        }
        match self.betting_slot(phase).and_then(|slot| slot.as_mut()) {
            Some(street) => {
                street.actions.push(record);
                Ok(())
            }
            None => Err(GameError::WrongPhase {
                operation: "Recording an action",
                phase,
            }),
        }
    }

    pub fn open_street(&mut self, phase: HandPhase, new_cards: Vec<Card>) -> Result<(), GameError> {
        if self.finalized {
            return Err(GameError::HistoryFinalized);
        }
        let slot = self.betting_slot(phase).ok_or(GameError::WrongPhase {
            operation: "Opening a street",
            phase,
        })?;
        *slot = Some(BettingHistory {
            new_cards,
            actions: Vec::new(),
        });
        Ok(())
    }

    pub fn settle(&mut self, settle: SettleHistory) -> Result<(), GameError> {
        if self.finalized {
            return Err(GameError::HistoryFinalized);
        }
        self.settle = Some(settle);
        Ok(())
    }

    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    /// Every action in the order it happened.
    pub fn actions(&self) -> impl Iterator<Item = &ActionRecord> {
        let streets = [&self.preflop, &self.flop, &self.turn, &self.river];
        self.prehand.actions.iter().chain(
            streets
                .into_iter()
                .flatten()
                .flat_map(|street| street.actions.iter()),
        )
    }

    /// Chips introduced into the table by rebuys during this hand's prehand.
    pub fn rebuy_total(&self) -> Chips {
        self.prehand
            .actions
            .iter()
            .filter(|a| a.action_type == ActionType::Rebuy)
            .filter_map(|a| a.amount)
            .sum()
    }
}
