//! Default conversation scaffolds
//!
//! A new scenario gets two complete default subtrees, "Welcome" and
//! "No Match", so a usable dialogue exists the moment the scenario does.
//! Generation is deterministic: the same scenario odId always yields the
//! same node odIds and intent ids.
//!
//! Persistence is a two-phase protocol. The subtree goes in through the
//! atomic full-graph write; the selection condition can only be built after
//! that write because its value is the scenario's store-assigned uid, so it
//! lands in a second write. The ordering is load-bearing. If phase 2 fails
//! the caller gets [`EngineError::ScaffoldIncomplete`] with the committed
//! uid and retries via [`ScaffoldGenerator::attach_selection_condition`].

use crate::error::EngineError;
use crate::observer::GraphObserver;
use convograph_model::{
    Behavior, Condition, Conversation, Intent, Markup, MessageTemplate, OdId, Scenario, Scene,
    Speaker, Turn, Uid, PLATFORM_DEFAULT_INTERPRETER,
};
use convograph_store::{DataClient, StoreError, TransportError};

/// Attribute path the runtime checks to know which scenario is selected
pub const SELECTED_SCENARIO_ATTRIBUTE: &str = "user.selected_scenario";

/// Description stamped on every scaffolded node
pub const AUTO_DESCRIPTION: &str = "Automatically generated";

/// The two default scaffolds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaffoldKind {
    Welcome,
    NoMatch,
}

impl ScaffoldKind {
    /// Fixed display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::NoMatch => "No Match",
        }
    }

    /// Lowercase, underscore-joined name slug derived from the label
    #[must_use]
    pub fn slug(&self) -> String {
        self.label()
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Fixed id of the incoming core intent
    #[must_use]
    pub fn incoming_intent_id(&self) -> &'static str {
        match self {
            Self::Welcome => "intent.core.welcome",
            Self::NoMatch => "intent.core.noMatch",
        }
    }

    /// Scenario-namespaced id of the outgoing response intent
    #[must_use]
    pub fn outgoing_intent_id(&self, scenario_fragment: &str) -> String {
        let stem = match self {
            Self::Welcome => "welcomeResponseFor",
            Self::NoMatch => "noMatchResponseFor",
        };
        format!("intent.app.{stem}{scenario_fragment}")
    }
}

/// Scenario-scoped id fragment: the odId title-cased with whitespace (and
/// slug separators) stripped, e.g. `support desk` → `SupportDesk`.
#[must_use]
pub fn scenario_id_fragment(od_id: &OdId) -> String {
    od_id
        .as_str()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Builds and persists the default conversation subtrees for a new scenario
pub struct ScaffoldGenerator<'a> {
    client: &'a dyn DataClient,
    observer: &'a dyn GraphObserver,
}

impl<'a> ScaffoldGenerator<'a> {
    #[must_use]
    pub fn new(client: &'a dyn DataClient, observer: &'a dyn GraphObserver) -> Self {
        Self { client, observer }
    }

    /// Scaffold a scenario and persist the result
    ///
    /// Attaches the "Welcome" and "No Match" subtrees to the given (not yet
    /// persisted) scenario, writes the whole graph atomically, then attaches
    /// the selection condition in a second write. The replies are the sample
    /// utterances rendered by the two response templates.
    ///
    /// # Errors
    /// [`EngineError::ScaffoldIncomplete`] if the subtree committed but the
    /// condition write failed; any other [`EngineError`] means nothing
    /// committed.
    pub async fn generate(
        &self,
        mut scenario: Scenario,
        welcome_reply: &str,
        no_match_reply: &str,
    ) -> Result<Scenario, EngineError> {
        let fragment = scenario_id_fragment(&scenario.od_id);
        for (kind, reply) in [
            (ScaffoldKind::Welcome, welcome_reply),
            (ScaffoldKind::NoMatch, no_match_reply),
        ] {
            let conversation = compose_scaffold(kind, &fragment, reply)?;
            self.observer.scaffold_built(&scenario.od_id, kind);
            scenario.conversations.push(conversation);
        }

        let persisted = self.client.add_full_scenario_graph(scenario).await?;
        let scenario_uid = assigned_uid(persisted.uid)?;
        self.observer.subtree_persisted(&scenario_uid);

        match self.attach_selection_condition(&scenario_uid).await {
            Ok(scenario) => Ok(scenario),
            Err(EngineError::Store(source)) => Err(EngineError::ScaffoldIncomplete {
                scenario_uid,
                source,
            }),
            Err(other) => Err(other),
        }
    }

    /// Phase 2 of scaffolding, safe to retry
    ///
    /// Attaches the condition tying the scenario to its own assigned uid
    /// (`user.selected_scenario eq <uid>`) and persists it as a scenario
    /// update. Idempotent: a scenario that already carries a condition on
    /// the selection attribute is returned unchanged.
    pub async fn attach_selection_condition(
        &self,
        scenario_uid: &Uid,
    ) -> Result<Scenario, EngineError> {
        let scenario = self.client.get_scenario(scenario_uid).await?;
        if scenario.has_condition_on(SELECTED_SCENARIO_ATTRIBUTE) {
            return Ok(scenario);
        }
        let updated = self
            .client
            .update_scenario(scenario.condition(Condition::equals(
                SELECTED_SCENARIO_ATTRIBUTE,
                scenario_uid.to_string(),
            )))
            .await?;
        self.observer.condition_attached(scenario_uid);
        Ok(updated)
    }
}

/// One complete default subtree: Conversation → Scene → Turn → two intents,
/// the response side carrying the reply template.
fn compose_scaffold(
    kind: ScaffoldKind,
    scenario_fragment: &str,
    reply: &str,
) -> Result<Conversation, EngineError> {
    let slug = kind.slug();
    let label = kind.label();

    let request = Intent::new(
        OdId::new(kind.incoming_intent_id())?,
        label,
        Speaker::User,
    )
    .confidence(1.0)
    .interpreter(PLATFORM_DEFAULT_INTERPRETER);

    let template = MessageTemplate::new(
        OdId::new(format!("{slug}_reply"))?,
        format!("{label} Reply"),
        Markup::single_text(reply),
    );

    let response = Intent::new(
        OdId::new(kind.outgoing_intent_id(scenario_fragment))?,
        format!("{label} Response"),
        Speaker::App,
    )
    .confidence(1.0)
    .behavior(Behavior::completing())
    .template(template);

    let turn = Turn::new(OdId::new(format!("{slug}_turn"))?, label)
        .description(AUTO_DESCRIPTION)
        .behavior(Behavior::starting())
        .request_intent(request)
        .response_intent(response);

    let scene = Scene::new(OdId::new(format!("{slug}_scene"))?, label)
        .description(AUTO_DESCRIPTION)
        .behavior(Behavior::starting())
        .turn(turn);

    Ok(
        Conversation::new(OdId::new(format!("{slug}_conversation"))?, label)
            .description(AUTO_DESCRIPTION)
            .behavior(Behavior::starting())
            .scene(scene),
    )
}

/// A write's return value must carry its assigned uid; a store that omits it
/// has broken the write contract.
pub(crate) fn assigned_uid(uid: Option<Uid>) -> Result<Uid, EngineError> {
    uid.ok_or_else(|| {
        EngineError::Store(StoreError::Transport(TransportError::Rejected(
            "store returned an entity without an assigned uid".to_string(),
        )))
    })
}
