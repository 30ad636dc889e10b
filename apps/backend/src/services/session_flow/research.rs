use super::SessionFlowService;
use crate::domain::{PlayerId, Session, SessionId};
use crate::error::AppError;

impl SessionFlowService {
    pub async fn choose_tech(
        &self,
        session_id: SessionId,
        player: &PlayerId,
        tech: &str,
    ) -> Result<Session, AppError> {
        let outcome = self
            .run_mutation(session_id, "choose_tech", |session, events| {
                session.choose_tech(player, tech, events)
            })
            .await?;
        Ok(outcome.session)
    }

    pub async fn choose_policy(
        &self,
        session_id: SessionId,
        player: &PlayerId,
        policy: &str,
    ) -> Result<Session, AppError> {
        let outcome = self
            .run_mutation(session_id, "choose_policy", |session, events| {
                session.choose_policy(player, policy, events)
            })
            .await?;
        Ok(outcome.session)
    }
}
