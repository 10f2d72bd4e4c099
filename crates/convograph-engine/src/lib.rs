//! Convograph Engine
//!
//! The consistency logic on top of the data client:
//!
//! - [`ScaffoldGenerator`]: deterministic "Welcome" / "No Match" default
//!   conversation subtrees for a new scenario, persisted through the
//!   two-phase protocol
//! - [`RelationManager`]: binds intents to turns under a direction
//!   classification and migrates the binding on update
//! - [`auto_create_template`]: the message-template auto-creation policy
//!   for newly stored APP-speaker intents
//! - [`GraphObserver`]: explicit observer seam invoked synchronously at the
//!   reporting points of the above

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod observer;
mod relation;
mod scaffold;
mod template;

pub use error::EngineError;
pub use observer::{GraphObserver, TracingObserver};
pub use relation::RelationManager;
pub use scaffold::{
    scenario_id_fragment, ScaffoldGenerator, ScaffoldKind, AUTO_DESCRIPTION,
    SELECTED_SCENARIO_ATTRIBUTE,
};
pub use template::{auto_create_template, AUTO_TEMPLATE_NAME};
