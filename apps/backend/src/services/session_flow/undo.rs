use tracing::info;

use super::SessionFlowService;
use crate::domain::{DrawId, DrawRecord, PlayerId, VoteChoice};
use crate::error::AppError;

impl SessionFlowService {
    /// Open an undo vote on a draw. The requester's vote counts as yes.
    /// Returns the draw record with its proposal as saved.
    pub async fn initiate_undo(
        &self,
        draw_id: DrawId,
        requester: &PlayerId,
    ) -> Result<DrawRecord, AppError> {
        let session_id = self.state.store.locate_draw(draw_id).await?;
        let outcome = self
            .run_mutation(session_id, "initiate_undo", |session, events| {
                session.initiate_undo(draw_id, requester, events)
            })
            .await?;
        if let Some(resolution) = outcome.value {
            info!(session_id = %session_id, draw_id = %draw_id, resolution = %resolution, "undo resolved on initiation");
        }
        Ok(outcome.session.draw_record(draw_id)?.clone())
    }

    pub async fn vote(
        &self,
        draw_id: DrawId,
        voter: &PlayerId,
        yes: bool,
    ) -> Result<DrawRecord, AppError> {
        let session_id = self.state.store.locate_draw(draw_id).await?;
        let choice = VoteChoice::from_bool(yes);
        let outcome = self
            .run_mutation(session_id, "vote", |session, events| {
                session.vote_undo(draw_id, voter, choice, events)
            })
            .await?;
        Ok(outcome.session.draw_record(draw_id)?.clone())
    }
}
