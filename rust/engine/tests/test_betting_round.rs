use holdem_engine::config::TableConfig;
use holdem_engine::history::ActionType;
use holdem_engine::phase::HandPhase;
use holdem_engine::player::{PlayerAction as A, PlayerState};
use holdem_engine::pot::Pot;
use holdem_engine::{ErrorKind, GameError, Table};

fn table(seats: usize) -> Table {
    Table::new(TableConfig {
        seats,
        seed: Some(7),
        ..TableConfig::default()
    })
    .expect("valid config")
}

#[test]
fn heads_up_button_posts_small_blind_and_acts_first() {
    let mut t = table(2);
    t.start_hand().unwrap();
    assert_eq!(t.button(), 0);
    assert_eq!(t.player(0).unwrap().street_bet(), 1);
    assert_eq!(t.player(1).unwrap().street_bet(), 2);
    assert_eq!(t.current_player(), Some(0));
    assert_eq!(t.player(0).unwrap().state(), PlayerState::ToCall);
}

#[test]
fn three_handed_blinds_and_first_actor() {
    let mut t = table(3);
    t.start_hand().unwrap();
    assert_eq!(t.player(1).unwrap().street_bet(), 1);
    assert_eq!(t.player(2).unwrap().street_bet(), 2);
    assert_eq!(t.current_player(), Some(0));
}

#[test]
fn out_of_turn_is_rejected_without_side_effects() {
    let mut t = table(2);
    t.start_hand().unwrap();
    let before = t.players().to_vec();

    let err = t.take_action(1, A::Check).unwrap_err();
    assert_eq!(
        err,
        GameError::NotPlayersTurn {
            expected: 0,
            actual: 1
        }
    );
    assert_eq!(err.kind(), ErrorKind::OutOfTurn);
    assert_eq!(t.players(), &before[..]);
    assert_eq!(t.history().actions().count(), 0);
    assert_eq!(t.current_player(), Some(0));
}

#[test]
fn unknown_seat_is_an_invalid_participant() {
    let mut t = table(2);
    t.start_hand().unwrap();
    let err = t.take_action(4, A::Fold).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParticipant);
}

#[test]
fn legal_actions_facing_the_big_blind() {
    let mut t = table(2);
    t.start_hand().unwrap();
    assert_eq!(
        t.legal_actions(0),
        vec![ActionType::Fold, ActionType::Call, ActionType::Raise, ActionType::AllIn]
    );
    assert!(t.legal_actions(1).is_empty());
}

#[test]
fn check_facing_a_bet_is_illegal() {
    let mut t = table(2);
    t.start_hand().unwrap();
    let err = t.take_action(0, A::Check).unwrap_err();
    assert!(matches!(
        err,
        GameError::IllegalAction {
            action: ActionType::Check,
            ..
        }
    ));
}

#[test]
fn raise_is_bounded_by_min_raise_and_stack() {
    let mut t = table(2);
    t.start_hand().unwrap();

    let err = t.take_action(0, A::Raise(1)).unwrap_err();
    assert!(err.to_string().contains("Amount must be in 2..=98"), "{}", err);
    assert_eq!(err.kind(), ErrorKind::InvalidAmount);

    let err = t.take_action(0, A::Raise(99)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAmount);
    assert_eq!(t.player(0).unwrap().chips(), 99);
}

#[test]
fn raise_below_a_full_raise_is_an_amount_error() {
    let mut t = table(3);
    t.players_mut()[0].set_chips(3);
    t.start_hand().unwrap();
    assert_eq!(t.current_player(), Some(0));
    assert!(!t.legal_actions(0).contains(&ActionType::Raise));

    // one chip over the call can never make a full raise of 2
    for by in [1, 2] {
        let err = t.take_action(0, A::Raise(by)).unwrap_err();
        assert!(matches!(err, GameError::AmountOutOfRange { min: 2, max: 1, .. }), "{}", err);
        assert_eq!(err.kind(), ErrorKind::InvalidAmount);
    }
    assert_eq!(t.player(0).unwrap().chips(), 3);
    assert_eq!(t.current_player(), Some(0));
}

#[test]
fn raise_without_chips_beyond_the_call_is_illegal() {
    let mut t = table(3);
    t.players_mut()[0].set_chips(2);
    t.start_hand().unwrap();

    let err = t.take_action(0, A::Raise(2)).unwrap_err();
    assert!(matches!(
        err,
        GameError::IllegalAction {
            action: ActionType::Raise,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::InvalidParticipant);
}

#[test]
fn a_raise_sets_the_next_minimum() {
    let mut t = table(2);
    t.start_hand().unwrap();

    t.take_action(0, A::Raise(4)).unwrap();
    let round = t.round().unwrap();
    assert_eq!(round.current_bet(), 6);
    assert_eq!(round.min_raise(), 4);
    assert_eq!(t.player(1).unwrap().state(), PlayerState::ToCall);

    assert_eq!(t.take_action(1, A::Raise(3)).unwrap_err().kind(), ErrorKind::InvalidAmount);
    t.take_action(1, A::Raise(4)).unwrap();
    assert_eq!(t.round().unwrap().current_bet(), 10);
    assert_eq!(t.current_player(), Some(0));
}

#[test]
fn round_closes_and_next_street_opens_left_of_button() {
    let mut t = table(2);
    t.start_hand().unwrap();
    t.take_action(0, A::Call).unwrap();
    // the big blind keeps the option
    assert_eq!(t.phase(), HandPhase::Preflop);
    assert_eq!(t.legal_actions(1)[..2], [ActionType::Fold, ActionType::Check]);
    t.take_action(1, A::Check).unwrap();

    assert_eq!(t.phase(), HandPhase::Flop);
    assert_eq!(t.board().len(), 3);
    assert_eq!(t.current_player(), Some(1));
    assert_eq!(t.round().unwrap().current_bet(), 0);
    assert_eq!(t.history().flop.as_ref().unwrap().new_cards.len(), 3);
}

#[test]
fn checked_down_hand_reaches_showdown() {
    let mut t = table(2);
    t.start_hand().unwrap();
    t.take_action(0, A::Call).unwrap();
    t.take_action(1, A::Check).unwrap();
    for street in [HandPhase::Flop, HandPhase::Turn, HandPhase::River] {
        assert_eq!(t.phase(), street);
        t.take_action(1, A::Check).unwrap();
        t.take_action(0, A::Check).unwrap();
    }

    assert_eq!(t.phase(), HandPhase::Prehand);
    let done = &t.completed_hands()[0];
    let settle = done.settle.as_ref().unwrap();
    assert!(settle.showdown);
    assert_eq!(settle.board.len(), 5);
    assert_eq!(settle.payouts.values().sum::<u32>(), 4);
    assert_eq!(t.total_chips(), 200);
}

#[test]
fn short_stack_facing_a_raise_can_only_fold_or_shove() {
    let mut t = table(3);
    t.players_mut()[1].set_chips(10);
    t.start_hand().unwrap();

    t.take_action(0, A::Raise(20)).unwrap();
    assert_eq!(t.current_player(), Some(1));
    assert_eq!(t.legal_actions(1), vec![ActionType::Fold, ActionType::AllIn]);
    assert!(matches!(
        t.take_action(1, A::Call).unwrap_err(),
        GameError::IllegalAction {
            action: ActionType::Call,
            ..
        }
    ));

    t.take_action(1, A::AllIn).unwrap();
    assert_eq!(t.player(1).unwrap().state(), PlayerState::AllIn);
    // a short all-in does not move the bet
    assert_eq!(t.round().unwrap().current_bet(), 22);

    t.take_action(2, A::Call).unwrap();
    assert_eq!(t.phase(), HandPhase::Flop);
    assert_eq!(
        t.pots(),
        vec![
            Pot {
                amount: 30,
                eligible: vec![0, 1, 2]
            },
            Pot {
                amount: 24,
                eligible: vec![0, 2]
            },
        ]
    );
    // the all-in seat is skipped from here on
    assert_eq!(t.current_player(), Some(2));
}

#[test]
fn all_in_and_call_runs_out_the_board() {
    let mut t = table(2);
    t.start_hand().unwrap();
    t.take_action(0, A::AllIn).unwrap();
    assert_eq!(t.legal_actions(1), vec![ActionType::Fold, ActionType::Call, ActionType::AllIn]);
    t.take_action(1, A::Call).unwrap();

    assert_eq!(t.phase(), HandPhase::Prehand);
    let done = &t.completed_hands()[0];
    assert!(done.river.is_some());
    assert!(done.settle.as_ref().unwrap().showdown);
    assert_eq!(t.total_chips(), 200);
}

#[test]
fn folds_around_award_the_blinds() {
    let mut t = table(3);
    t.start_hand().unwrap();
    t.take_action(0, A::Fold).unwrap();
    t.take_action(1, A::Fold).unwrap();

    assert_eq!(t.phase(), HandPhase::Prehand);
    assert_eq!(t.player(0).unwrap().chips(), 100);
    assert_eq!(t.player(1).unwrap().chips(), 99);
    assert_eq!(t.player(2).unwrap().chips(), 101);
    let settle = t.completed_hands()[0].settle.clone().unwrap();
    assert!(!settle.showdown);
    assert!(t.completed_hands()[0].flop.is_none());
}

#[test]
fn actions_are_recorded_with_street_totals() {
    let mut t = table(2);
    t.start_hand().unwrap();
    t.take_action(0, A::Raise(4)).unwrap();
    t.take_action(1, A::Call).unwrap();

    assert_eq!(t.phase(), HandPhase::Flop);
    let preflop = t.history().preflop.as_ref().unwrap();
    assert_eq!(preflop.actions.len(), 2);
    assert_eq!(preflop.actions[0].action_type, ActionType::Raise);
    assert_eq!(preflop.actions[0].amount, Some(5));
    assert_eq!(preflop.actions[0].total, Some(6));
    assert_eq!(preflop.actions[1].action_type, ActionType::Call);
    assert_eq!(preflop.actions[1].amount, Some(4));
    assert_eq!(preflop.actions[1].total, Some(6));
    assert!(preflop.actions.iter().all(|a| a.phase == HandPhase::Preflop));
}

#[test]
fn actions_outside_a_hand_are_rejected() {
    let mut t = table(2);
    let err = t.take_action(0, A::Check).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Window);
}
