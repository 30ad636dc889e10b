//! Join, turn rotation, withdrawal and ending.

use std::collections::HashSet;

use time::OffsetDateTime;

use crate::domain::fixtures::{active_session, forming_session, holder_index, player, username};
use crate::domain::{Category, SessionEvent, SessionEvents, SessionStatus};
use crate::errors::domain::{DomainError, ValidationKind};

fn events() -> SessionEvents {
    SessionEvents::new(OffsetDateTime::UNIX_EPOCH)
}

#[test]
fn session_starts_exactly_when_capacity_is_reached() {
    let mut session = forming_session(3, 5);
    let mut ev = events();

    session.join(player(0), &username(0), &mut ev).unwrap();
    session.join(player(1), &username(1), &mut ev).unwrap();
    assert_eq!(session.status, SessionStatus::Forming);
    assert!(session.turn_holder().is_none());

    session.join(player(2), &username(2), &mut ev).unwrap();
    assert_eq!(session.status, SessionStatus::Active);
    assert_eq!(session.participants.iter().filter(|p| p.your_turn).count(), 1);

    let started = ev
        .as_slice()
        .iter()
        .filter(|e| matches!(e, SessionEvent::Started { .. }))
        .count();
    assert_eq!(started, 1);
    session.check_invariants().unwrap();
}

#[test]
fn first_holder_depends_only_on_seed() {
    let a = active_session(5, 77);
    let b = active_session(5, 77);
    assert_eq!(holder_index(&a), holder_index(&b));

    let holders: HashSet<usize> = (0..40)
        .map(|seed| holder_index(&active_session(5, seed)))
        .collect();
    assert!(holders.len() > 1, "first holder should vary with the seed");
}

#[test]
fn join_rejects_duplicates_and_late_arrivals() {
    let mut session = forming_session(2, 1);
    let mut ev = events();
    session.join(player(0), &username(0), &mut ev).unwrap();

    let err = session.join(player(0), &username(0), &mut ev).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::AlreadyJoined, _)
    ));

    session.join(player(1), &username(1), &mut ev).unwrap();
    let err = session.join(player(2), &username(2), &mut ev).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotForming, _)
    ));
    assert_eq!(session.participants.len(), 2);
}

#[test]
fn join_rejects_a_username_already_in_use() {
    let mut session = forming_session(3, 1);
    let mut ev = events();
    session.join(player(0), "Alice", &mut ev).unwrap();

    let err = session.join(player(1), "alice", &mut ev).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::UsernameTaken, _)
    ));

    session.withdraw(&player(0), &mut ev).unwrap();
    let err = session.join(player(2), "ALICE", &mut ev).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::UsernameTaken, _)
    ));
    assert!(session.participants.is_empty());
}

#[test]
fn withdrawn_player_cannot_rejoin() {
    let mut session = forming_session(3, 1);
    let mut ev = events();
    session.join(player(0), &username(0), &mut ev).unwrap();
    session.withdraw(&player(0), &mut ev).unwrap();

    let err = session.join(player(0), &username(0), &mut ev).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::AlreadyJoined, _)
    ));
    assert_eq!(session.withdrawn.len(), 1);
}

#[test]
fn end_turn_advances_in_roster_order_and_wraps() {
    let mut session = active_session(4, 9);
    let mut ev = events();
    let start = holder_index(&session);

    for step in 1..=4 {
        let holder = session.participants[holder_index(&session)].player_id.clone();
        session.end_turn(&holder, &mut ev).unwrap();
        assert_eq!(holder_index(&session), (start + step) % 4);
    }
    assert_eq!(holder_index(&session), start);

    let passes = ev
        .as_slice()
        .iter()
        .filter(|e| matches!(e, SessionEvent::TurnPassed { .. }))
        .count();
    assert_eq!(passes, 4);
}

#[test]
fn end_turn_out_of_turn_is_rejected_without_change() {
    let mut session = active_session(3, 2);
    let holder = holder_index(&session);
    let other = session.participants[(holder + 1) % 3].player_id.clone();
    let before = session.clone();

    let err = session.end_turn(&other, &mut events()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::OutOfTurn, _)
    ));
    assert_eq!(session, before);
}

#[test]
fn end_turn_requires_active_session() {
    let mut session = forming_session(3, 2);
    let mut ev = events();
    session.join(player(0), &username(0), &mut ev).unwrap();
    let err = session.end_turn(&player(0), &mut ev).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotActive, _)
    ));
}

#[test]
fn withdrawing_turn_holder_passes_turn_first_and_discards_hand() {
    let mut session = active_session(3, 4);
    let mut ev = events();
    let holder = holder_index(&session);
    let leaving = session.participants[holder].player_id.clone();
    let next = session.participants[(holder + 1) % 3].player_id.clone();

    session.draw(&leaving, Category::Infantry, &mut ev).unwrap();
    session.draw(&leaving, Category::Tiles, &mut ev).unwrap();
    let infantry_pool = session.pool_size(Category::Infantry);

    let discarded = session.withdraw(&leaving, &mut ev).unwrap();
    assert_eq!(discarded, 2);
    assert_eq!(session.turn_holder().map(|p| p.player_id.clone()), Some(next));
    assert_eq!(session.participants.len(), 2);
    assert_eq!(session.withdrawn.len(), 1);
    assert!(session.withdrawn[0].withdrawn);
    assert!(session.withdrawn[0].hand.is_empty());
    assert_eq!(session.discard.len(), 2);
    assert!(session.discard.iter().all(|i| i.owner.is_none()));
    assert_eq!(session.pool_size(Category::Infantry), infantry_pool);

    let kinds: Vec<&SessionEvent> = ev
        .as_slice()
        .iter()
        .filter(|e| matches!(e, SessionEvent::TurnPassed { .. } | SessionEvent::Withdrew { .. }))
        .collect();
    assert!(matches!(kinds[0], SessionEvent::TurnPassed { .. }));
    assert!(matches!(kinds[1], SessionEvent::Withdrew { .. }));
    session.check_invariants().unwrap();
}

#[test]
fn rotation_skips_withdrawn_participants() {
    let mut session = active_session(4, 11);
    let mut ev = events();
    let holder = holder_index(&session);
    let skipped = session.participants[(holder + 1) % 4].player_id.clone();
    session.withdraw(&skipped, &mut ev).unwrap();

    let start = session.turn_holder().unwrap().player_id.clone();
    let mut seen = Vec::new();
    for _ in 0..3 {
        let current = session.turn_holder().unwrap().player_id.clone();
        seen.push(current.clone());
        session.end_turn(&current, &mut ev).unwrap();
    }
    assert!(!seen.contains(&skipped));
    assert_eq!(session.turn_holder().unwrap().player_id, start);
}

#[test]
fn last_participant_keeps_the_turn_and_last_withdrawal_finishes() {
    let mut session = active_session(2, 6);
    let mut ev = events();
    let holder = holder_index(&session);
    let other = session.participants[1 - holder].player_id.clone();
    let remaining = session.participants[holder].player_id.clone();

    session.withdraw(&other, &mut ev).unwrap();
    session.end_turn(&remaining, &mut ev).unwrap();
    assert_eq!(session.turn_holder().unwrap().player_id, remaining);

    session.withdraw(&remaining, &mut ev).unwrap();
    assert_eq!(session.status, SessionStatus::Finished);
    assert!(session.winner.is_none());
    session.check_invariants().unwrap();
}

#[test]
fn end_sets_winner_and_is_terminal() {
    let mut session = active_session(3, 3);
    let mut ev = events();

    session.end(&player(0), Some("USER1"), &mut ev).unwrap();
    assert_eq!(session.status, SessionStatus::Finished);
    assert_eq!(session.winner.as_deref(), Some("user1"));
    assert!(session.turn_holder().is_none());

    let err = session.end(&player(0), None, &mut ev).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::AlreadyFinished, _)
    ));

    let err = session.join(player(9), &username(9), &mut ev).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotForming, _)
    ));
    session.check_invariants().unwrap();
}

#[test]
fn end_rejects_unknown_winner_and_outsiders() {
    let mut session = active_session(2, 3);
    let mut ev = events();

    let err = session.end(&player(0), Some("nobody"), &mut ev).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::UnknownWinner, _)
    ));

    let err = session.end(&player(7), None, &mut ev).unwrap_err();
    assert!(matches!(err, DomainError::AccessDenied(_)));
    assert_eq!(session.status, SessionStatus::Active);
}

#[test]
fn capacity_is_bounded() {
    use crate::domain::deck::DeckSet;
    use crate::domain::fixtures::small_canonical_deck;
    use crate::domain::Session;

    for capacity in [0u8, 1, 8] {
        let deck = DeckSet::build(&small_canonical_deck(), 1);
        let err = Session::new("x", deck, capacity, 1, OffsetDateTime::UNIX_EPOCH).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::InvalidCapacity, _)
        ));
    }
}
