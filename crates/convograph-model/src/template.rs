//! Message templates: the rendering payload of a response intent

use crate::ids::{OdId, Uid};
use crate::markup::Markup;
use serde::{Deserialize, Serialize};

/// Leaf node of the graph, owned by exactly one intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub uid: Option<Uid>,
    pub od_id: OdId,
    pub name: String,
    pub markup: Markup,
    /// Lookup-only back-reference to the owning intent.
    pub parent_intent: Option<Uid>,
}

impl MessageTemplate {
    #[must_use]
    pub fn new(od_id: OdId, name: impl Into<String>, markup: Markup) -> Self {
        Self {
            uid: None,
            od_id,
            name: name.into(),
            markup,
            parent_intent: None,
        }
    }
}
