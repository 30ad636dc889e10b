use super::SessionFlowService;
use crate::domain::{Category, DrawRecord, Item, ItemId, PlayerId, SessionId};
use crate::error::AppError;

impl SessionFlowService {
    /// Draw the next item of `category` (a label such as `Culture I` or a
    /// code such as `CULTURE_1`).
    pub async fn draw(
        &self,
        session_id: SessionId,
        player: &PlayerId,
        category: &str,
    ) -> Result<DrawRecord, AppError> {
        let category = Category::parse(category)?;
        let outcome = self
            .run_mutation(session_id, "draw", |session, events| {
                session.draw(player, category, events)
            })
            .await?;
        Ok(outcome.value)
    }

    pub async fn reveal(
        &self,
        session_id: SessionId,
        player: &PlayerId,
        item_id: ItemId,
    ) -> Result<Item, AppError> {
        let outcome = self
            .run_mutation(session_id, "reveal", |session, events| {
                session.reveal(player, item_id, events)
            })
            .await?;
        Ok(outcome.value)
    }

    pub async fn discard(
        &self,
        session_id: SessionId,
        player: &PlayerId,
        item_id: ItemId,
    ) -> Result<Item, AppError> {
        let outcome = self
            .run_mutation(session_id, "discard", |session, events| {
                session.discard_item(player, item_id, events)
            })
            .await?;
        Ok(outcome.value)
    }
}
