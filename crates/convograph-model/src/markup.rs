//! Message markup
//!
//! A message template's payload is an ordered sequence of segments. The only
//! segment kind this core emits is a plain-text segment; the enum leaves room
//! for the richer kinds the rendering layer understands.

use serde::{Deserialize, Serialize};

/// One segment of a message payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MessageSegment {
    Text(String),
}

impl MessageSegment {
    #[inline]
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Ordered message payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup {
    pub segments: Vec<MessageSegment>,
}

impl Markup {
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<MessageSegment>) -> Self {
        Self { segments }
    }

    /// Payload consisting of a single text segment
    #[inline]
    #[must_use]
    pub fn single_text(value: impl Into<String>) -> Self {
        Self::new(vec![MessageSegment::text(value)])
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
