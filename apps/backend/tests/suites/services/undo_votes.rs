//! Undo proposals and majority voting through the flow service.

use pbf_backend::domain::{Category, DrawId, Resolution};
use pbf_backend::{AppError, ErrorCode};

use crate::support::test_state::{player, Harness};

#[tokio::test]
async fn test_two_player_undo_needs_both_votes() -> Result<(), AppError> {
    let h = Harness::start(31).await?;
    let session = h.active_session(2).await?;
    let record = h.flow.draw(session.id, &player(1), "Infantry").await?;

    let pending = h.flow.initiate_undo(record.id, &player(2)).await?;
    let proposal = pending.undo.as_ref().unwrap();
    assert_eq!(proposal.resolution, Resolution::Pending);
    assert_eq!(proposal.initiator, player(2));

    let active = h.views.active_undos(session.id).await?;
    assert_eq!(active.len(), 1);
    assert_eq!((active[0].yes, active[0].no), (1, 0));
    assert_eq!(active[0].item, "Infantry");

    let approved = h.flow.vote(record.id, &player(1), true).await?;
    assert_eq!(
        approved.undo.as_ref().unwrap().resolution,
        Resolution::Approved
    );

    let stored = h.views.snapshot(session.id).await?;
    assert_eq!(stored.pool_size(Category::Infantry), 4);
    assert!(stored.participant(&player(1)).unwrap().hand.is_empty());
    let returned = stored.locate_item(record.item.id).unwrap();
    assert_eq!(returned.owner, None);
    assert!(returned.hidden);

    assert!(h.views.active_undos(session.id).await?.is_empty());
    let finished = h.views.finished_undos(session.id).await?;
    assert_eq!(finished.len(), 1);
    assert!(finished[0].resolved_at.is_some());

    let public = h.views.public_log(session.id).await?;
    assert_eq!(
        public.last().unwrap().text,
        "Undo approved: Infantry drawn by user1 was returned to the pool"
    );
    Ok(())
}

#[tokio::test]
async fn test_single_no_rejects_in_two_player_session() -> Result<(), AppError> {
    let h = Harness::start(32).await?;
    let session = h.active_session(2).await?;
    let record = h.flow.draw(session.id, &player(1), "Artillery").await?;

    h.flow.initiate_undo(record.id, &player(2)).await?;
    let rejected = h.flow.vote(record.id, &player(1), false).await?;
    assert_eq!(
        rejected.undo.as_ref().unwrap().resolution,
        Resolution::Rejected
    );

    let stored = h.views.snapshot(session.id).await?;
    assert_eq!(stored.participant(&player(1)).unwrap().hand.len(), 1);
    assert_eq!(stored.pool_size(Category::Artillery), 1);

    let public = h.views.public_log(session.id).await?;
    assert_eq!(
        public.last().unwrap().text,
        "Undo rejected: user1 keeps Artillery"
    );

    let err = h.flow.vote(record.id, &player(2), true).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ProposalClosed);
    let err = h
        .flow
        .initiate_undo(record.id, &player(2))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ProposalClosed);
    Ok(())
}

#[tokio::test]
async fn test_undo_rejections() -> Result<(), AppError> {
    let h = Harness::start(33).await?;
    let session = h.active_session(3).await?;
    let record = h.flow.draw(session.id, &player(1), "Infantry").await?;

    let err = h.flow.vote(record.id, &player(2), true).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NoOpenProposal);

    let err = h
        .flow
        .initiate_undo(DrawId::new(), &player(1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DrawNotFound);

    let err = h
        .flow
        .initiate_undo(record.id, &player(9))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotAMember);

    h.flow.initiate_undo(record.id, &player(3)).await?;
    let err = h
        .flow
        .initiate_undo(record.id, &player(2))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UndoPending);

    let err = h.flow.vote(record.id, &player(9), true).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotAMember);
    Ok(())
}

#[tokio::test]
async fn test_changed_vote_replaces_earlier_one() -> Result<(), AppError> {
    let h = Harness::start(34).await?;
    let session = h.active_session(4).await?;
    let record = h.flow.draw(session.id, &player(1), "Infantry").await?;

    h.flow.initiate_undo(record.id, &player(2)).await?;
    h.flow.vote(record.id, &player(3), false).await?;
    let still_pending = h.flow.vote(record.id, &player(3), true).await?;
    let proposal = still_pending.undo.as_ref().unwrap();
    assert_eq!(proposal.resolution, Resolution::Pending);

    let active = h.views.active_undos(session.id).await?;
    assert_eq!((active[0].yes, active[0].no), (2, 0));

    let approved = h.flow.vote(record.id, &player(4), true).await?;
    assert_eq!(
        approved.undo.as_ref().unwrap().resolution,
        Resolution::Approved
    );
    Ok(())
}

#[tokio::test]
async fn test_undo_of_discarded_item_takes_it_from_discard_pile() -> Result<(), AppError> {
    let h = Harness::start(35).await?;
    let session = h.active_session(2).await?;
    let record = h.flow.draw(session.id, &player(2), "Tiles").await?;
    h.flow.discard(session.id, &player(2), record.item.id).await?;

    h.flow.initiate_undo(record.id, &player(1)).await?;
    h.flow.vote(record.id, &player(2), true).await?;

    let stored = h.views.snapshot(session.id).await?;
    assert!(stored.discard.is_empty());
    assert_eq!(stored.pool_size(Category::Tiles), 2);
    assert!(stored.locate_item(record.item.id).unwrap().hidden);
    Ok(())
}

#[tokio::test]
async fn test_withdrawal_can_settle_a_pending_vote() -> Result<(), AppError> {
    let h = Harness::start(36).await?;
    let session = h.active_session(4).await?;
    let record = h.flow.draw(session.id, &player(1), "Culture I").await?;

    h.flow.initiate_undo(record.id, &player(1)).await?;
    h.flow.vote(record.id, &player(2), true).await?;
    assert_eq!(h.views.active_undos(session.id).await?.len(), 1);

    // Two yes out of three remaining players is a majority.
    h.flow.withdraw(session.id, &player(4)).await?;

    assert!(h.views.active_undos(session.id).await?.is_empty());
    let stored = h.views.snapshot(session.id).await?;
    let undo = stored.draw_record(record.id)?.undo.as_ref().unwrap();
    assert_eq!(undo.resolution, Resolution::Approved);
    assert_eq!(stored.pool_size(Category::CultureI), 2);
    Ok(())
}

#[tokio::test]
async fn test_ending_the_game_closes_pending_undos() -> Result<(), AppError> {
    let h = Harness::start(38).await?;
    let session = h.active_session(3).await?;
    let record = h.flow.draw(session.id, &player(1), "Infantry").await?;
    h.flow.initiate_undo(record.id, &player(2)).await?;
    assert_eq!(h.views.active_undos(session.id).await?.len(), 1);

    h.flow.end_game(session.id, &player(3), None).await?;

    assert!(h.views.active_undos(session.id).await?.is_empty());
    let finished = h.views.finished_undos(session.id).await?;
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].resolution, Resolution::Rejected);

    let err = h.flow.vote(record.id, &player(3), true).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ProposalClosed);

    let texts: Vec<String> = h
        .views
        .public_log(session.id)
        .await?
        .into_iter()
        .map(|e| e.text)
        .collect();
    assert_eq!(
        &texts[texts.len() - 2..],
        &[
            "Undo rejected: user1 keeps Infantry".to_string(),
            "Game has ended without a winner".to_string(),
        ]
    );
    Ok(())
}
