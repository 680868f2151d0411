use std::sync::atomic::{AtomicU32, Ordering};

use crate::engine::commands::{execute_command, EngineCommand, EngineCommandResult};
use crate::engine::persist::{decode_persisted_session, encode_persisted_session};
use crate::engine::session::{GameSession, SessionState};
use crate::game::{Card, SpiderGame, Suit, SuitMode, PILE_COUNT};

static NEXT_TEST_ID: AtomicU32 = AtomicU32::new(50_000);

fn card(suit: Suit, rank: u8, face_up: bool) -> Card {
    Card {
        suit,
        rank,
        face_up,
        id: NEXT_TEST_ID.fetch_add(1, Ordering::Relaxed),
    }
}

fn empty_tableau() -> [Vec<Card>; PILE_COUNT] {
    std::array::from_fn(|_| Vec::new())
}

/// Game one move away from its eighth completed run: pile 0 holds K..2 of
/// spades, pile 1 the matching ace.
fn near_win_game() -> SpiderGame {
    let mut tableau = empty_tableau();
    tableau[0].extend((2..=13).rev().map(|rank| card(Suit::Spades, rank, true)));
    tableau[1].push(card(Suit::Spades, 1, true));
    SpiderGame::debug_new(SuitMode::One, Vec::new(), tableau, 7)
}

#[test]
fn session_starts_idle_and_rejects_operations() {
    let mut session = GameSession::new();
    assert_eq!(session.state(), SessionState::Idle);

    assert!(!session.apply_move(0, 0, 1).success);
    assert!(!session.deal_from_stock().success);
    assert!(!session.undo());
    assert!(!session.is_deal_allowed());
    assert!(session.movable_run(0, 0).is_none());
    assert_eq!(session.stock_len(), 0);
    assert_eq!(session.move_count(), 0);
}

#[test]
fn new_game_enters_playing_with_fresh_counters() {
    let mut session = GameSession::new();
    session.new_game_with_seed(SuitMode::Two, 42);

    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.move_count(), 0);
    assert_eq!(session.completed_count(), 0);
    assert_eq!(session.stock_len(), 50);
    assert_eq!(session.seed(), 42);
    assert_eq!(session.suit_mode(), Some(SuitMode::Two));
    assert!(!session.undo_available());
    assert!(session.is_deal_allowed());
}

#[test]
fn new_game_clears_history_and_counters_from_previous_game() {
    let mut session = GameSession::new();
    session.new_game_with_seed(SuitMode::One, 1);
    assert!(session.deal_from_stock().success);
    assert!(session.undo_available());

    session.new_game_with_seed(SuitMode::Four, 2);
    assert!(!session.undo_available());
    assert_eq!(session.move_count(), 0);
    assert_eq!(session.stock_len(), 50);
}

#[test]
fn successful_move_counts_and_is_undoable() {
    let mut tableau = empty_tableau();
    tableau[0].push(card(Suit::Spades, 5, true));
    tableau[1].push(card(Suit::Spades, 6, true));
    let game = SpiderGame::debug_new(SuitMode::One, Vec::new(), tableau, 0);
    let before = game.clone();
    let mut session = GameSession::debug_with_game(game);

    let outcome = session.apply_move(0, 0, 1);
    assert!(outcome.success);
    assert!(!outcome.completed_sequence);
    assert!(!outcome.won);
    assert_eq!(session.move_count(), 1);
    assert!(session.undo_available());
    assert_eq!(session.game().map(|g| g.tableau()[1].len()), Some(2));

    assert!(session.undo());
    assert_eq!(session.game(), Some(&before));
    assert_eq!(session.move_count(), 0);
    assert!(!session.undo_available());
}

#[test]
fn failed_move_is_a_silent_noop() {
    let mut tableau = empty_tableau();
    tableau[0].push(card(Suit::Spades, 5, true));
    tableau[1].push(card(Suit::Spades, 9, true));
    let game = SpiderGame::debug_new(SuitMode::One, Vec::new(), tableau, 0);
    let before = game.clone();
    let mut session = GameSession::debug_with_game(game);

    let outcome = session.apply_move(0, 0, 1);
    assert!(!outcome.success);
    assert_eq!(session.game(), Some(&before), "no mutation on failure");
    assert_eq!(session.move_count(), 0, "no move counted");
    assert!(!session.undo_available(), "no undo entry pushed");
}

#[test]
fn deal_counts_as_a_move_and_restores_exactly_on_undo() {
    let mut session = GameSession::new();
    session.new_game_with_seed(SuitMode::Two, 7);
    let before = session.game().expect("game active").clone();

    let outcome = session.deal_from_stock();
    assert!(outcome.success);
    assert_eq!(session.stock_len(), 40);
    assert_eq!(session.move_count(), 1);

    assert!(session.undo());
    let restored = session.game().expect("game active");
    assert_eq!(restored, &before, "card-for-card, face-for-face restore");
    assert_eq!(session.stock_len(), 50);
    assert_eq!(session.move_count(), 0);
}

#[test]
fn undo_on_empty_log_is_a_noop() {
    let mut session = GameSession::new();
    session.new_game_with_seed(SuitMode::One, 3);
    let before = session.game().expect("game active").clone();

    assert!(!session.undo());
    assert_eq!(session.game(), Some(&before));
}

#[test]
fn deal_is_rejected_when_a_pile_is_empty() {
    let mut tableau = empty_tableau();
    for pile in tableau.iter_mut().skip(1) {
        pile.push(card(Suit::Spades, 4, true));
    }
    let stock: Vec<Card> = (0..10).map(|_| card(Suit::Spades, 8, false)).collect();
    let game = SpiderGame::debug_new(SuitMode::One, stock, tableau, 0);
    let mut session = GameSession::debug_with_game(game);

    assert!(!session.is_deal_allowed());
    let outcome = session.deal_from_stock();
    assert!(!outcome.success);
    assert_eq!(session.move_count(), 0);
    assert!(!session.undo_available());
}

#[test]
fn winning_move_transitions_to_won_and_blocks_further_play() {
    let mut session = GameSession::debug_with_game(near_win_game());

    let outcome = session.apply_move(1, 0, 0);
    assert!(outcome.success);
    assert!(outcome.completed_sequence);
    assert!(outcome.won);
    assert_eq!(session.state(), SessionState::Won);
    assert_eq!(session.completed_count(), 8);

    // Terminal until new_game: every mutating call is rejected.
    assert!(!session.apply_move(0, 0, 1).success);
    assert!(!session.deal_from_stock().success);
    assert!(!session.is_deal_allowed());
    assert_eq!(session.move_count(), 1);

    session.new_game_with_seed(SuitMode::One, 9);
    assert_eq!(session.state(), SessionState::Playing);
}

#[test]
fn undo_steps_back_out_of_the_won_state() {
    let mut session = GameSession::debug_with_game(near_win_game());
    assert!(session.apply_move(1, 0, 0).won);
    assert_eq!(session.state(), SessionState::Won);

    assert!(session.undo());
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.completed_count(), 7);
}

#[test]
fn can_stack_on_matches_drop_legality() {
    let session = GameSession::new();
    let five = card(Suit::Spades, 5, true);
    let six_hearts = card(Suit::Hearts, 6, true);
    let six_down = card(Suit::Hearts, 6, false);

    assert!(session.can_stack_on(five, None));
    assert!(session.can_stack_on(five, Some(&six_hearts)));
    assert!(!session.can_stack_on(five, Some(&six_down)));
    assert!(!session.can_stack_on(six_hearts, Some(&five)));
}

#[test]
fn commands_drive_the_session() {
    let mut session = GameSession::new();

    let result = execute_command(
        &mut session,
        EngineCommand::NewGame {
            suit_mode: SuitMode::One,
            seed: Some(5),
        },
    );
    assert!(result.changed);
    assert_eq!(session.seed(), 5);

    let result = execute_command(&mut session, EngineCommand::DealFromStock);
    assert!(result.changed);
    assert!(!result.won);
    assert_eq!(session.stock_len(), 40);

    // An illegal move reports unchanged.
    let result = execute_command(
        &mut session,
        EngineCommand::MoveRun {
            src: 0,
            start: 0,
            dst: 0,
        },
    );
    assert_eq!(result, EngineCommandResult::unchanged());

    let result = execute_command(&mut session, EngineCommand::Undo);
    assert!(result.changed);
    assert_eq!(session.stock_len(), 50);

    let result = execute_command(&mut session, EngineCommand::Undo);
    assert_eq!(result, EngineCommandResult::unchanged());
}

#[test]
fn persisted_session_round_trips() {
    let mut session = GameSession::new();
    session.new_game_with_seed(SuitMode::Four, 77);
    assert!(session.deal_from_stock().success);

    let encoded = encode_persisted_session(&session).expect("active game encodes");
    let restored = decode_persisted_session(&encoded).expect("own encoding decodes");

    assert_eq!(restored.state(), SessionState::Playing);
    assert_eq!(restored.seed(), 77);
    assert_eq!(restored.move_count(), 1);
    assert_eq!(restored.game(), session.game());
    assert!(!restored.undo_available(), "undo log does not persist");
}

#[test]
fn persist_rejects_idle_sessions_and_bad_payloads() {
    let session = GameSession::new();
    assert!(encode_persisted_session(&session).is_none());

    assert!(decode_persisted_session("").is_none());
    assert!(decode_persisted_session("v=2\nseed=1\nmoves=0\nelapsed=0\ngame=x").is_none());
    assert!(decode_persisted_session("v=1\nseed=1\nmoves=0\nelapsed=0\ngame=x").is_none());
}
