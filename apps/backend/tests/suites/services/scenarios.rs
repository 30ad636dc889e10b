//! Whole-table walkthroughs.

use pbf_backend::domain::{Category, Resolution, SessionStatus};
use pbf_backend::repos::Visibility;
use pbf_backend::AppError;

use crate::support::test_state::{holder_number, player, username, Harness};

#[tokio::test]
async fn test_four_player_infantry_draw_is_voted_back() -> Result<(), AppError> {
    let h = Harness::start(61).await?;
    let session = h
        .flow
        .create_session("Four", "base", 4, player(1), &username(1))
        .await?;
    let mut session = session;
    for n in 2..=4 {
        assert_eq!(session.status, SessionStatus::Forming);
        session = h.flow.join(session.id, player(n), &username(n)).await?;
    }
    assert_eq!(session.status, SessionStatus::Active);
    assert_eq!(
        session.participants.iter().filter(|p| p.your_turn).count(),
        1
    );

    let log_before = h.state.action_log.entries(session.id).await?.len();
    let record = h.flow.draw(session.id, &player(1), "INFANTRY").await?;

    let after_draw = h.views.snapshot(session.id).await?;
    assert_eq!(after_draw.pool_size(Category::Infantry), 3);
    let hand = &after_draw.participant(&player(1)).unwrap().hand;
    assert_eq!(hand.len(), 1);
    assert!(hand[0].hidden);

    let new_entries: Vec<_> = h
        .state
        .action_log
        .entries(session.id)
        .await?
        .into_iter()
        .skip(log_before)
        .collect();
    assert_eq!(new_entries.len(), 2);
    assert_eq!(new_entries[0].visibility, Visibility::Public);
    assert_eq!(
        new_entries[1].visibility,
        Visibility::PrivateTo(username(1))
    );

    // B proposes, C agrees: two of four is not yet a majority.
    h.flow.initiate_undo(record.id, &player(2)).await?;
    let pending = h.flow.vote(record.id, &player(3), true).await?;
    assert_eq!(pending.undo.unwrap().resolution, Resolution::Pending);

    let approved = h.flow.vote(record.id, &player(4), true).await?;
    assert_eq!(approved.undo.unwrap().resolution, Resolution::Approved);

    let after_undo = h.views.snapshot(session.id).await?;
    assert!(after_undo.participant(&player(1)).unwrap().hand.is_empty());
    assert_eq!(after_undo.pool_size(Category::Infantry), 4);
    let pooled = after_undo.locate_item(record.item.id).unwrap();
    assert!(pooled.hidden);
    assert_eq!(pooled.owner, None);
    after_undo.check_invariants()?;

    // The drawer's private entry still names the card.
    let private = h.views.private_log(session.id, &player(1)).await?;
    assert_eq!(private[0].text, format!("You drew {}", record.item.reveal_all()));
    Ok(())
}

#[tokio::test]
async fn test_turn_holder_withdraws_and_hand_goes_to_discard() -> Result<(), AppError> {
    let h = Harness::start(62).await?;
    let session = h.active_session(3).await?;
    let holder = holder_number(&session);

    h.flow.draw(session.id, &player(holder), "Infantry").await?;
    h.flow.draw(session.id, &player(holder), "Tiles").await?;

    let session = h.flow.withdraw(session.id, &player(holder)).await?;
    assert_eq!(
        session.turn_holder().unwrap().player_id,
        player(holder % 3 + 1)
    );
    assert_eq!(session.discard.len(), 2);
    assert!(session.discard.iter().all(|i| i.owner.is_none()));
    assert_eq!(session.pool_size(Category::Infantry), 3);
    assert_eq!(session.pool_size(Category::Tiles), 1);

    let texts: Vec<String> = h
        .views
        .public_log(session.id)
        .await?
        .into_iter()
        .rev()
        .take(2)
        .map(|e| e.text)
        .collect();
    assert_eq!(
        texts,
        vec![
            format!("{} withdrew from the game and discarded 2 items", username(holder)),
            format!(
                "{} ended the turn. It is now {}'s turn",
                username(holder),
                username(holder % 3 + 1)
            ),
        ]
    );

    // Withdrawn players can still read their private history.
    let private = h.views.private_log(session.id, &player(holder)).await?;
    assert_eq!(private.len(), 2);
    Ok(())
}
