//! Read projections and log visibility.

use std::collections::HashSet;

use pbf_backend::domain::{Category, SessionId, SessionSummary};
use pbf_backend::repos::Visibility;
use pbf_backend::{AppError, ErrorCode};

use crate::support::test_state::{holder_number, player, username, Harness};

#[tokio::test]
async fn test_player_view_masks_other_hands_and_filters_log() -> Result<(), AppError> {
    let h = Harness::start(71).await?;
    let session = h.active_session(2).await?;
    let hidden = h.flow.draw(session.id, &player(1), "Infantry").await?;
    h.flow.draw(session.id, &player(2), "Culture I").await?;

    let mine = h.views.player_view(session.id, &player(1)).await?;
    assert!(mine.view.is_member);
    let me = &mine.view.players[0];
    assert_eq!(me.username, username(1));
    assert_eq!(me.items[0].description, hidden.item.reveal_all());

    let theirs = h.views.player_view(session.id, &player(2)).await?;
    let other = &theirs.view.players[0];
    assert_eq!(other.items[0].description, "Infantry");
    assert!(other.items[0].hidden);
    assert_eq!(theirs.view.pool_sizes[&Category::Infantry], 3);

    // Each player sees all public entries plus only their own private ones.
    for (n, view) in [(1, &mine), (2, &theirs)] {
        let private: Vec<_> = view
            .log
            .iter()
            .filter(|e| e.visibility != Visibility::Public)
            .collect();
        assert_eq!(private.len(), 1);
        assert_eq!(private[0].visibility, Visibility::PrivateTo(username(n)));
    }

    let outsider = h.views.player_view(session.id, &player(9)).await?;
    assert!(!outsider.view.is_member);
    assert!(outsider
        .log
        .iter()
        .all(|e| e.visibility == Visibility::Public));
    Ok(())
}

#[tokio::test]
async fn test_private_log_is_for_participants_only() -> Result<(), AppError> {
    let h = Harness::start(72).await?;
    let session = h.active_session(2).await?;

    let err = h
        .views
        .private_log(session.id, &player(9))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotAMember);

    let err = h.views.public_log(SessionId::new()).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);
    Ok(())
}

#[tokio::test]
async fn test_turn_holder_view_follows_rotation() -> Result<(), AppError> {
    let h = Harness::start(73).await?;
    let forming = h
        .flow
        .create_session("g", "base", 3, player(1), &username(1))
        .await?;
    assert_eq!(h.views.turn_holder(forming.id).await?, None);

    let session = h.active_session(2).await?;
    let holder = holder_number(&session);
    assert_eq!(
        h.views.turn_holder(session.id).await?,
        Some(username(holder))
    );

    h.flow.end_turn(session.id, &player(holder)).await?;
    assert_eq!(
        h.views.turn_holder(session.id).await?,
        Some(username(holder % 2 + 1))
    );
    Ok(())
}

#[tokio::test]
async fn test_revealed_items_show_in_undo_summaries() -> Result<(), AppError> {
    let h = Harness::start(74).await?;
    let session = h.active_session(3).await?;
    let record = h.flow.draw(session.id, &player(2), "Artillery").await?;
    h.flow.reveal(session.id, &player(2), record.item.id).await?;
    h.flow.initiate_undo(record.id, &player(3)).await?;

    let active = h.views.active_undos(session.id).await?;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].drawer, username(2));
    assert_eq!(active[0].initiator, player(3));
    assert_eq!(active[0].item, record.item.reveal_all());

    let view = h.views.player_view(session.id, &player(1)).await?;
    assert_eq!(view.view.open_undos, vec![record.id]);
    Ok(())
}

#[tokio::test]
async fn test_session_lookup_returns_the_summary() -> Result<(), AppError> {
    let h = Harness::start(75).await?;
    let session = h.active_session(2).await?;
    h.flow.draw(session.id, &player(1), "Infantry").await?;

    let summary = h.views.session(session.id).await?;
    assert_eq!(summary.id, session.id);
    assert_eq!(summary.players, vec![username(1), username(2)]);
    assert_eq!(summary.turn_holder, Some(username(holder_number(&session))));

    let err = h.views.session(SessionId::new()).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);
    Ok(())
}

#[tokio::test]
async fn test_sessions_per_player_and_highscores() -> Result<(), AppError> {
    let h = Harness::start(76).await?;

    let won_by_1 = h.active_session(2).await?;
    let civ_1 = h.flow.draw(won_by_1.id, &player(1), "Civ").await?;
    h.flow.end_game(won_by_1.id, &player(2), Some("user1")).await?;

    let won_by_2 = h.active_session(2).await?;
    let civ_2 = h.flow.draw(won_by_2.id, &player(2), "Civ").await?;
    // Civs held by losers do not score.
    h.flow.draw(won_by_2.id, &player(1), "Civ").await?;
    h.flow.end_game(won_by_2.id, &player(1), Some("user2")).await?;

    let no_winner = h.active_session(2).await?;
    h.flow.withdraw(no_winner.id, &player(2)).await?;
    h.flow.end_game(no_winner.id, &player(1), None).await?;

    // Unfinished sessions never count.
    let running = h.active_session(2).await?;
    h.flow.draw(running.id, &player(1), "Civ").await?;
    let forming = h
        .flow
        .create_session("forming", "base", 3, player(3), &username(3))
        .await?;

    let ids = |summaries: Vec<SessionSummary>| -> HashSet<SessionId> {
        summaries.into_iter().map(|s| s.id).collect()
    };
    assert_eq!(
        ids(h.views.sessions_for_player(&player(2)).await?),
        HashSet::from([won_by_1.id, won_by_2.id, no_winner.id, running.id])
    );
    assert_eq!(
        ids(h.views.sessions_for_player(&player(3)).await?),
        HashSet::from([forming.id])
    );
    assert!(h.views.sessions_for_player(&player(9)).await?.is_empty());

    let scores = h.views.highscores().await?;
    let players: Vec<(String, usize)> = scores
        .players
        .iter()
        .map(|s| (s.name.clone(), s.wins))
        .collect();
    assert_eq!(players, vec![(username(1), 1), (username(2), 1)]);

    assert_eq!(scores.civs.iter().map(|c| c.wins).sum::<usize>(), 2);
    for civ in [&civ_1.item.name, &civ_2.item.name] {
        assert!(scores.civs.iter().any(|c| &c.name == civ), "{civ} missing");
    }
    assert!(scores.civs.windows(2).all(|w| w[0].wins >= w[1].wins));
    Ok(())
}
