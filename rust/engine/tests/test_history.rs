use holdem_engine::config::TableConfig;
use holdem_engine::history::{ActionRecord, ActionType, History, PrehandHistory};
use holdem_engine::phase::HandPhase;
use holdem_engine::player::PlayerAction as A;
use holdem_engine::{GameError, Table};

fn played_hand() -> Table {
    let mut t = Table::new(TableConfig {
        seats: 3,
        seed: Some(99),
        rebuy_cap: 2,
        ..TableConfig::default()
    })
    .unwrap();
    t.rebuy(1, Some(25)).unwrap();
    t.start_hand().unwrap();
    t.take_action(0, A::Raise(6)).unwrap();
    t.take_action(1, A::Call).unwrap();
    t.take_action(2, A::Fold).unwrap();
    while t.phase() != HandPhase::Prehand {
        let seat = t.current_player().unwrap();
        t.take_action(seat, A::Check).unwrap();
    }
    t
}

#[test]
fn completed_hand_has_every_section() {
    let t = played_hand();
    let h = &t.completed_hands()[0];
    assert!(h.is_finalized());
    assert_eq!(h.hand_id, 1);
    assert_eq!(h.prehand.btn_loc, 0);
    assert_eq!(h.prehand.player_chips[&1], 125);
    assert_eq!(h.prehand.actions[0].action_type, ActionType::Rebuy);

    let preflop = h.betting(HandPhase::Preflop).unwrap();
    assert!(preflop.new_cards.is_empty());
    assert_eq!(preflop.actions.len(), 3);
    assert_eq!(h.flop.as_ref().unwrap().new_cards.len(), 3);
    assert_eq!(h.turn.as_ref().unwrap().new_cards.len(), 1);
    assert_eq!(h.river.as_ref().unwrap().new_cards.len(), 1);

    let settle = h.settle.as_ref().unwrap();
    assert!(settle.showdown);
    assert_eq!(settle.pots.iter().map(|p| p.amount).sum::<u32>(), 18);
    assert_eq!(settle.final_chips.values().sum::<u32>(), 325);
}

#[test]
fn actions_iterate_in_order_across_streets() {
    let t = played_hand();
    let h = &t.completed_hands()[0];
    let phases: Vec<HandPhase> = h.actions().map(|a| a.phase).collect();
    assert_eq!(phases[0], HandPhase::Prehand);
    assert_eq!(phases[1], HandPhase::Preflop);
    assert_eq!(*phases.last().unwrap(), HandPhase::River);
    assert!(phases.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(h.rebuy_total(), 25);
}

#[test]
fn json_round_trip_keeps_the_hand() {
    let t = played_hand();
    let h = &t.completed_hands()[0];
    let json = serde_json::to_string(h).unwrap();
    assert!(json.contains("\"REBUY\""));
    assert!(json.contains("\"PREFLOP\""));

    let back: History = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, h);
    assert!(back.is_finalized());
}

#[test]
fn finalized_history_rejects_appends() {
    let mut h = History::new(7, PrehandHistory::default());
    h.finalize();
    let err = h
        .record(ActionRecord {
            player_id: 0,
            action_type: ActionType::Rebuy,
            amount: Some(10),
            total: Some(10),
            phase: HandPhase::Prehand,
        })
        .unwrap_err();
    assert_eq!(err, GameError::HistoryFinalized);
    assert!(h.prehand.actions.is_empty());
    assert!(h.open_street(HandPhase::Flop, Vec::new()).is_err());
}

#[test]
fn fresh_history_waits_in_prehand() {
    let t = played_hand();
    let h = t.history();
    assert_eq!(h.hand_id, 2);
    assert!(!h.is_finalized());
    assert!(h.preflop.is_none());
    assert!(h.settle.is_none());
    assert_eq!(h.prehand.player_chips.values().sum::<u32>(), 325);
}
