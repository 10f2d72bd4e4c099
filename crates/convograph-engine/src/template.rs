//! Message-template auto-creation policy
//!
//! Fires exactly once per newly stored intent, on the relation-manager store
//! path only. Full-graph writes persist scaffold-authored subtrees that
//! already carry their templates, and intent updates never re-trigger it.

use crate::error::EngineError;
use crate::observer::GraphObserver;
use crate::scaffold::assigned_uid;
use convograph_model::{Intent, Markup, MessageTemplate, OdId, Speaker};
use convograph_store::DataClient;

/// Name given to every auto-created template
pub const AUTO_TEMPLATE_NAME: &str = "auto generated";

/// Apply the policy to a just-stored intent
///
/// `speaker == APP`: synthesize one template whose markup is a single text
/// segment equal to the intent's sample utterance, persist it attached to
/// the intent, and return it. `speaker == USER`: do nothing.
///
/// # Errors
/// Store errors from the template write.
pub async fn auto_create_template(
    client: &dyn DataClient,
    observer: &dyn GraphObserver,
    stored_intent: &Intent,
) -> Result<Option<MessageTemplate>, EngineError> {
    if stored_intent.speaker != Speaker::App {
        return Ok(None);
    }
    let intent_uid = assigned_uid(stored_intent.uid)?;
    let template = MessageTemplate::new(
        OdId::new(format!("{}_auto_template", stored_intent.od_id))?,
        AUTO_TEMPLATE_NAME,
        Markup::single_text(stored_intent.sample_utterance.clone()),
    );
    let stored = client.add_message_template(&intent_uid, template).await?;
    observer.template_auto_created(&intent_uid, &stored.od_id);
    Ok(Some(stored))
}
