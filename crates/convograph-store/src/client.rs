//! The data client contract
//!
//! [`DataClient`] is the abstraction boundary to the backing graph store.
//! Implementations are presumed remote: every operation can fail with a
//! [`TransportError`](crate::TransportError) independent of business-logic
//! errors.
//!
//! Reads return the entity with its full owned subtree, children in stored
//! order, so a write's returned entity and a later fetch of the same uid
//! compare equal field-for-field. Every write returns the persisted entity
//! with its assigned uid(s), so callers can chain further operations
//! against fresh ids.

use crate::error::StoreError;
use crate::page::{Page, PageRequest};
use async_trait::async_trait;
use convograph_model::{
    Conversation, Direction, Intent, MessageTemplate, Scenario, Scene, Turn, Uid,
};

/// Operation set used to read and write the conversation graph
#[async_trait]
pub trait DataClient: Send + Sync {
    // --- reads ---

    async fn get_scenario(&self, uid: &Uid) -> Result<Scenario, StoreError>;
    async fn get_conversation(&self, uid: &Uid) -> Result<Conversation, StoreError>;
    async fn get_scene(&self, uid: &Uid) -> Result<Scene, StoreError>;
    async fn get_turn(&self, uid: &Uid) -> Result<Turn, StoreError>;
    async fn get_intent(&self, uid: &Uid) -> Result<Intent, StoreError>;
    async fn get_message_template(&self, uid: &Uid) -> Result<MessageTemplate, StoreError>;

    async fn list_scenarios(&self, page: PageRequest) -> Result<Page<Scenario>, StoreError>;
    async fn list_intents(&self, page: PageRequest) -> Result<Page<Intent>, StoreError>;

    async fn conversations_of(&self, scenario_uid: &Uid) -> Result<Vec<Conversation>, StoreError>;
    async fn scenes_of(&self, conversation_uid: &Uid) -> Result<Vec<Scene>, StoreError>;
    async fn turns_of(&self, scene_uid: &Uid) -> Result<Vec<Turn>, StoreError>;
    async fn templates_of(&self, intent_uid: &Uid) -> Result<Vec<MessageTemplate>, StoreError>;

    /// Fetch a turn populated with only the matching intent(s)
    ///
    /// The matching intent can sit on either side, so callers must inspect
    /// both collections. The full intent sets are never returned by this
    /// read.
    ///
    /// # Errors
    /// `NotFound` if the turn does not exist or the intent is not linked to
    /// it on either side.
    async fn get_turn_with_intent(
        &self,
        turn_uid: &Uid,
        intent_uid: &Uid,
    ) -> Result<Turn, StoreError>;

    // --- writes ---

    /// Attach a fully-formed conversation under a persisted scenario
    async fn add_conversation(
        &self,
        scenario_uid: &Uid,
        conversation: Conversation,
    ) -> Result<Conversation, StoreError>;

    /// Attach an intent on the request side of a persisted turn
    ///
    /// # Errors
    /// `Validation` if the intent's speaker/request-flag are not coherent
    /// with the request side (speaker USER, `is_request_intent` true).
    async fn add_request_intent(&self, turn_uid: &Uid, intent: Intent)
        -> Result<Intent, StoreError>;

    /// Attach an intent on the response side of a persisted turn
    ///
    /// # Errors
    /// `Validation` if the intent's speaker/request-flag are not coherent
    /// with the response side (speaker APP, `is_request_intent` false).
    async fn add_response_intent(
        &self,
        turn_uid: &Uid,
        intent: Intent,
    ) -> Result<Intent, StoreError>;

    /// Attach a message template under a persisted intent
    async fn add_message_template(
        &self,
        intent_uid: &Uid,
        template: MessageTemplate,
    ) -> Result<MessageTemplate, StoreError>;

    /// Persist a scenario together with its entire pre-built subtree as one
    /// logical write
    ///
    /// Atomic: either the whole subtree is visible afterward or none of it
    /// is. The returned scenario carries assigned uids throughout.
    async fn add_full_scenario_graph(&self, scenario: Scenario) -> Result<Scenario, StoreError>;

    // --- updates ---

    async fn update_scenario(&self, scenario: Scenario) -> Result<Scenario, StoreError>;
    async fn update_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, StoreError>;
    async fn update_turn(&self, turn: Turn) -> Result<Turn, StoreError>;

    /// Replace an intent's own fields without touching its turn relation
    async fn update_intent(&self, intent: Intent) -> Result<Intent, StoreError>;

    /// Re-classify which side of a turn an already-linked intent belongs to
    ///
    /// Moves only the association; intent content is never mutated here.
    /// Idempotent: re-applying the same direction leaves the relation as is.
    async fn update_turn_intent_relation(
        &self,
        turn_uid: &Uid,
        intent_uid: &Uid,
        direction: Direction,
    ) -> Result<(), StoreError>;

    // --- deletes ---

    async fn delete_scenario(&self, uid: &Uid) -> Result<(), StoreError>;
    async fn delete_turn(&self, uid: &Uid) -> Result<(), StoreError>;

    /// Delete an intent entity
    ///
    /// # Errors
    /// `Conflict` while the intent is still attached to a turn: callers must
    /// detach the relation first with [`delete_turn_intent`](Self::delete_turn_intent),
    /// then delete the entity, in that order.
    async fn delete_intent(&self, uid: &Uid) -> Result<(), StoreError>;

    /// Remove only the Turn↔Intent association, leaving the intent entity in
    /// place
    async fn delete_turn_intent(&self, turn_uid: &Uid, intent_uid: &Uid)
        -> Result<(), StoreError>;
}
