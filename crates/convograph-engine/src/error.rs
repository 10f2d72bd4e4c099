//! Engine error types

use convograph_model::{ModelError, Uid};
use convograph_store::StoreError;

/// Errors raised by the scaffold generator and relation manager
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The store reported an error
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Model construction failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Scaffold phase 2 failed after the subtree committed
    ///
    /// The scenario subtree exists under `scenario_uid`; retry with
    /// [`attach_selection_condition`](crate::ScaffoldGenerator::attach_selection_condition)
    /// rather than re-running the whole scaffold.
    #[error("scaffold incomplete: subtree {scenario_uid} committed, condition attach failed: {source}")]
    ScaffoldIncomplete {
        scenario_uid: Uid,
        #[source]
        source: StoreError,
    },

    /// After a relation update, the intent sits on neither side of the turn
    #[error("turn {turn_uid} holds intent {intent_uid} on neither side")]
    RelationInconsistent { turn_uid: Uid, intent_uid: Uid },
}

impl EngineError {
    /// True for [`EngineError::ScaffoldIncomplete`]
    #[inline]
    #[must_use]
    pub fn is_scaffold_incomplete(&self) -> bool {
        matches!(self, Self::ScaffoldIncomplete { .. })
    }
}
