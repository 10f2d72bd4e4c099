//! Convograph Entity Model
//!
//! Typed records for the five-level conversation graph:
//! Scenario → Conversation → Scene → Turn → Intent → MessageTemplate.
//!
//! # Core Concepts
//!
//! - [`Uid`]: store-assigned globally unique identifier
//! - [`OdId`]: human-authored slug, unique within its scope
//! - [`Speaker`] / [`Direction`]: the two classifications an [`Intent`] carries
//! - [`Behavior`]: structural role tags (STARTING, COMPLETING)
//! - [`Condition`]: structural predicate evaluated by the runtime engine
//!
//! These are pure value types: constructors and field mutators only. Field
//! shape validation (non-empty strings, confidence range) belongs to the
//! request-validation collaborator upstream of this crate; the one thing the
//! model itself refuses is a speaker tag outside USER/APP.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod behavior;
mod condition;
mod conversation;
mod error;
mod ids;
mod intent;
mod markup;
mod scenario;
mod scene;
mod template;
mod turn;
mod validation;

pub use behavior::{Behavior, BehaviorTag};
pub use condition::{Condition, ConditionOperator};
pub use conversation::Conversation;
pub use error::ModelError;
pub use ids::{OdId, Uid};
pub use intent::{Direction, Intent, Speaker};
pub use markup::{Markup, MessageSegment};
pub use scenario::Scenario;
pub use scene::Scene;
pub use template::MessageTemplate;
pub use turn::Turn;
pub use validation::ValidationErrors;

/// Interpreter reference used when an entity is created without one.
pub const PLATFORM_DEFAULT_INTERPRETER: &str = "interpreter.platform.default";
