//! Turn–intent relation management
//!
//! Relation direction (where in a turn an intent sits) and speaker (who
//! utters it) are set independently by the API layer; this manager is the
//! single place reconciling them. On store, the direction dictates which add
//! operation runs; on update, the association migrates without the intent's
//! content being touched, and the manager re-fetches the turn to report
//! which side actually holds the intent now.

use crate::error::EngineError;
use crate::observer::GraphObserver;
use crate::template::auto_create_template;
use convograph_model::{Direction, Intent, Uid};
use convograph_store::DataClient;

/// Binds intents to turns under a direction classification
pub struct RelationManager<'a> {
    client: &'a dyn DataClient,
    observer: &'a dyn GraphObserver,
}

impl<'a> RelationManager<'a> {
    #[must_use]
    pub fn new(client: &'a dyn DataClient, observer: &'a dyn GraphObserver) -> Self {
        Self { client, observer }
    }

    /// Store an intent under a turn on the side the direction dictates
    ///
    /// This is the path the template auto-creation policy hangs off: a
    /// stored APP-speaker intent comes back carrying its generated template.
    ///
    /// # Errors
    /// `Validation` when the intent's speaker/request-flag are incoherent
    /// with the chosen side; `NotFound` for an unknown turn.
    pub async fn store_intent(
        &self,
        turn_uid: &Uid,
        intent: Intent,
        direction: Direction,
    ) -> Result<Intent, EngineError> {
        let mut stored = match direction {
            Direction::Request => self.client.add_request_intent(turn_uid, intent).await?,
            Direction::Response => self.client.add_response_intent(turn_uid, intent).await?,
        };
        if let Some(template) =
            auto_create_template(self.client, self.observer, &stored).await?
        {
            stored.message_templates.push(template);
        }
        Ok(stored)
    }

    /// [`store_intent`](Self::store_intent) from the inbound direction tag
    /// (the literal `"REQUEST"` or `"RESPONSE"`)
    ///
    /// # Errors
    /// `Model` for any other tag.
    pub async fn store_intent_tagged(
        &self,
        turn_uid: &Uid,
        intent: Intent,
        direction_tag: &str,
    ) -> Result<Intent, EngineError> {
        let direction: Direction = direction_tag.parse()?;
        self.store_intent(turn_uid, intent, direction).await
    }

    /// Migrate an existing turn↔intent association to the given side
    ///
    /// Re-fetches the turn afterwards and reports whichever side now
    /// contains the intent. Idempotent: re-applying the same direction
    /// yields the same classification.
    ///
    /// # Errors
    /// [`EngineError::RelationInconsistent`] if, after the update, the
    /// intent sits on neither side — the caller made an inconsistent
    /// request and must not receive a silently empty result.
    pub async fn reclassify(
        &self,
        turn_uid: &Uid,
        intent_uid: &Uid,
        direction: Direction,
    ) -> Result<Direction, EngineError> {
        self.client
            .update_turn_intent_relation(turn_uid, intent_uid, direction)
            .await?;

        let turn = match self.client.get_turn_with_intent(turn_uid, intent_uid).await {
            Ok(turn) => turn,
            Err(e) if e.is_not_found() => {
                return Err(EngineError::RelationInconsistent {
                    turn_uid: *turn_uid,
                    intent_uid: *intent_uid,
                })
            }
            Err(e) => return Err(e.into()),
        };

        turn.side_of(intent_uid)
            .ok_or(EngineError::RelationInconsistent {
                turn_uid: *turn_uid,
                intent_uid: *intent_uid,
            })
    }

    /// Fully remove an intent from a turn: detach the relation, then delete
    /// the entity, in that order
    ///
    /// # Errors
    /// `NotFound` if the relation does not exist; `Conflict` never — the
    /// detach happens first by construction.
    pub async fn remove_intent(&self, turn_uid: &Uid, intent_uid: &Uid) -> Result<(), EngineError> {
        self.client.delete_turn_intent(turn_uid, intent_uid).await?;
        self.client.delete_intent(intent_uid).await?;
        Ok(())
    }
}
