//! Reference in-memory store
//!
//! Arena-style storage: every entity lives in a per-type map keyed by uid,
//! children are tracked as ordered uid lists, and back-references are
//! resolved by lookup. Reads hydrate the full owned subtree, so a write's
//! returned entity and a later fetch of the same uid compare equal
//! field-for-field.
//!
//! Atomicity of [`DataClient::add_full_scenario_graph`]: the whole subtree is
//! validated before the first insertion, under one write lock, so either all
//! of it becomes visible or none of it does.
//!
//! Cascade policy: deleting a scenario or turn removes all owned descendants
//! and their relations. Deleting an intent directly never cascades the
//! relation; the relation must be detached first.

use crate::client::DataClient;
use crate::error::{EntityKind, StoreError};
use crate::page::{Page, PageRequest};
use async_trait::async_trait;
use convograph_model::{
    Condition, Conversation, Direction, Intent, MessageTemplate, OdId, Scenario, Scene, Turn,
    Uid, ValidationErrors,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
struct Arena {
    scenarios: HashMap<Uid, Scenario>,
    conversations: HashMap<Uid, Conversation>,
    scenes: HashMap<Uid, Scene>,
    turns: HashMap<Uid, Turn>,
    intents: HashMap<Uid, Intent>,
    templates: HashMap<Uid, MessageTemplate>,

    // Insertion order of roots, for stable pagination.
    scenario_order: Vec<Uid>,
    intent_order: Vec<Uid>,

    // Ordered child lists. Ownership lives here, never in back-references.
    scenario_conversations: HashMap<Uid, Vec<Uid>>,
    conversation_scenes: HashMap<Uid, Vec<Uid>>,
    scene_turns: HashMap<Uid, Vec<Uid>>,
    turn_requests: HashMap<Uid, Vec<Uid>>,
    turn_responses: HashMap<Uid, Vec<Uid>>,
    intent_templates: HashMap<Uid, Vec<Uid>>,
}

/// In-memory [`DataClient`] implementation
///
/// The arena behind one `RwLock` is the only shared state; the lock is what
/// serializes concurrent writes to the same uid, as the contract expects of
/// the backing store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Arena>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// --- staging: uid assignment and validation before any mutation ---

fn assign_template_uids(template: &mut MessageTemplate, parent: Uid) {
    template.uid = Some(Uid::generate());
    template.parent_intent = Some(parent);
}

fn assign_intent_uids(intent: &mut Intent, parent: Uid) {
    let uid = Uid::generate();
    intent.uid = Some(uid);
    intent.parent_turn = Some(parent);
    for template in &mut intent.message_templates {
        assign_template_uids(template, uid);
    }
}

fn assign_turn_uids(turn: &mut Turn, parent: Uid) {
    let uid = Uid::generate();
    turn.uid = Some(uid);
    turn.parent_scene = Some(parent);
    for intent in &mut turn.request_intents {
        assign_intent_uids(intent, uid);
    }
    for intent in &mut turn.response_intents {
        assign_intent_uids(intent, uid);
    }
}

fn assign_scene_uids(scene: &mut Scene, parent: Uid) {
    let uid = Uid::generate();
    scene.uid = Some(uid);
    scene.parent_conversation = Some(parent);
    for turn in &mut scene.turns {
        assign_turn_uids(turn, uid);
    }
}

fn assign_conversation_uids(conversation: &mut Conversation, parent: Uid) {
    let uid = Uid::generate();
    conversation.uid = Some(uid);
    conversation.parent_scenario = Some(parent);
    for scene in &mut conversation.scenes {
        assign_scene_uids(scene, uid);
    }
}

fn assign_scenario_uids(scenario: &mut Scenario) -> Uid {
    let uid = Uid::generate();
    scenario.uid = Some(uid);
    for conversation in &mut scenario.conversations {
        assign_conversation_uids(conversation, uid);
    }
    uid
}

/// Speaker and request-flag must match the side an intent is stored on.
fn check_intent_side(intent: &Intent, direction: Direction) -> Result<(), StoreError> {
    let mut errors = ValidationErrors::new();
    let expected = direction.coherent_speaker();
    if intent.speaker != expected {
        errors.push(
            "speaker",
            format!(
                "{} side requires speaker {}, got {}",
                direction, expected, intent.speaker
            ),
        );
    }
    let expected_flag = direction == Direction::Request;
    if intent.is_request_intent != expected_flag {
        errors.push(
            "is_request_intent",
            format!("{} side requires {}", direction, expected_flag),
        );
    }
    errors.into_result().map_err(StoreError::from)
}

fn check_conditions(conditions: &[Condition]) -> Result<(), StoreError> {
    let mut errors = ValidationErrors::new();
    for condition in conditions {
        if let Err(e) = condition.validate() {
            errors.push("conditions", e.to_string());
        }
    }
    errors.into_result().map_err(StoreError::from)
}

fn check_unique_od_ids<'a, I>(scope: &str, od_ids: I) -> Result<(), StoreError>
where
    I: Iterator<Item = &'a OdId>,
{
    let mut seen = std::collections::HashSet::new();
    for od_id in od_ids {
        if !seen.insert(od_id.as_str()) {
            return Err(StoreError::Conflict(format!(
                "duplicate odId '{od_id}' within {scope}"
            )));
        }
    }
    Ok(())
}

fn validate_conversation_subtree(conversation: &Conversation) -> Result<(), StoreError> {
    check_unique_od_ids(
        "conversation",
        conversation.scenes.iter().map(|s| &s.od_id),
    )?;
    for scene in &conversation.scenes {
        check_unique_od_ids("scene", scene.turns.iter().map(|t| &t.od_id))?;
        for turn in &scene.turns {
            check_unique_od_ids(
                "turn",
                turn.request_intents
                    .iter()
                    .chain(&turn.response_intents)
                    .map(|i| &i.od_id),
            )?;
            for intent in &turn.request_intents {
                check_intent_side(intent, Direction::Request)?;
            }
            for intent in &turn.response_intents {
                check_intent_side(intent, Direction::Response)?;
            }
        }
    }
    Ok(())
}

fn validate_scenario_subtree(scenario: &Scenario) -> Result<(), StoreError> {
    check_conditions(&scenario.conditions)?;
    check_unique_od_ids(
        "scenario",
        scenario.conversations.iter().map(|c| &c.od_id),
    )?;
    for conversation in &scenario.conversations {
        validate_conversation_subtree(conversation)?;
    }
    Ok(())
}

// --- arena internals ---

impl Arena {
    fn insert_template(&mut self, template: MessageTemplate) {
        let uid = template.uid.expect("uid assigned before insert");
        let parent = template.parent_intent.expect("parent assigned before insert");
        self.intent_templates.entry(parent).or_default().push(uid);
        self.templates.insert(uid, template);
    }

    fn insert_intent(&mut self, mut intent: Intent, direction: Direction) {
        let uid = intent.uid.expect("uid assigned before insert");
        let parent = intent.parent_turn.expect("parent assigned before insert");
        let side = match direction {
            Direction::Request => self.turn_requests.entry(parent).or_default(),
            Direction::Response => self.turn_responses.entry(parent).or_default(),
        };
        side.push(uid);
        self.intent_order.push(uid);
        for template in std::mem::take(&mut intent.message_templates) {
            self.insert_template(template);
        }
        self.intents.insert(uid, intent);
    }

    fn insert_turn(&mut self, mut turn: Turn) {
        let uid = turn.uid.expect("uid assigned before insert");
        let parent = turn.parent_scene.expect("parent assigned before insert");
        self.scene_turns.entry(parent).or_default().push(uid);
        self.turn_requests.entry(uid).or_default();
        self.turn_responses.entry(uid).or_default();
        for intent in std::mem::take(&mut turn.request_intents) {
            self.insert_intent(intent, Direction::Request);
        }
        for intent in std::mem::take(&mut turn.response_intents) {
            self.insert_intent(intent, Direction::Response);
        }
        self.turns.insert(uid, turn);
    }

    fn insert_scene(&mut self, mut scene: Scene) {
        let uid = scene.uid.expect("uid assigned before insert");
        let parent = scene.parent_conversation.expect("parent assigned before insert");
        self.conversation_scenes.entry(parent).or_default().push(uid);
        for turn in std::mem::take(&mut scene.turns) {
            self.insert_turn(turn);
        }
        self.scenes.insert(uid, scene);
    }

    fn insert_conversation(&mut self, mut conversation: Conversation) {
        let uid = conversation.uid.expect("uid assigned before insert");
        let parent = conversation
            .parent_scenario
            .expect("parent assigned before insert");
        self.scenario_conversations
            .entry(parent)
            .or_default()
            .push(uid);
        for scene in std::mem::take(&mut conversation.scenes) {
            self.insert_scene(scene);
        }
        self.conversations.insert(uid, conversation);
    }

    fn insert_scenario(&mut self, mut scenario: Scenario) {
        let uid = scenario.uid.expect("uid assigned before insert");
        self.scenario_order.push(uid);
        self.scenario_conversations.entry(uid).or_default();
        for conversation in std::mem::take(&mut scenario.conversations) {
            self.insert_conversation(conversation);
        }
        self.scenarios.insert(uid, scenario);
    }

    // hydration: rebuild the owned subtree from the arena

    fn hydrate_intent(&self, uid: &Uid) -> Option<Intent> {
        let mut intent = self.intents.get(uid)?.clone();
        intent.message_templates = self
            .intent_templates
            .get(uid)
            .into_iter()
            .flatten()
            .filter_map(|t| self.templates.get(t).cloned())
            .collect();
        Some(intent)
    }

    fn hydrate_turn(&self, uid: &Uid) -> Option<Turn> {
        let mut turn = self.turns.get(uid)?.clone();
        turn.request_intents = self
            .turn_requests
            .get(uid)
            .into_iter()
            .flatten()
            .filter_map(|i| self.hydrate_intent(i))
            .collect();
        turn.response_intents = self
            .turn_responses
            .get(uid)
            .into_iter()
            .flatten()
            .filter_map(|i| self.hydrate_intent(i))
            .collect();
        Some(turn)
    }

    fn hydrate_scene(&self, uid: &Uid) -> Option<Scene> {
        let mut scene = self.scenes.get(uid)?.clone();
        scene.turns = self
            .scene_turns
            .get(uid)
            .into_iter()
            .flatten()
            .filter_map(|t| self.hydrate_turn(t))
            .collect();
        Some(scene)
    }

    fn hydrate_conversation(&self, uid: &Uid) -> Option<Conversation> {
        let mut conversation = self.conversations.get(uid)?.clone();
        conversation.scenes = self
            .conversation_scenes
            .get(uid)
            .into_iter()
            .flatten()
            .filter_map(|s| self.hydrate_scene(s))
            .collect();
        Some(conversation)
    }

    fn hydrate_scenario(&self, uid: &Uid) -> Option<Scenario> {
        let mut scenario = self.scenarios.get(uid)?.clone();
        scenario.conversations = self
            .scenario_conversations
            .get(uid)
            .into_iter()
            .flatten()
            .filter_map(|c| self.hydrate_conversation(c))
            .collect();
        Some(scenario)
    }

    // cascades

    fn remove_intent_entity(&mut self, uid: &Uid) {
        if let Some(templates) = self.intent_templates.remove(uid) {
            for t in templates {
                self.templates.remove(&t);
            }
        }
        self.intents.remove(uid);
        self.intent_order.retain(|i| i != uid);
    }

    fn remove_turn_cascade(&mut self, uid: &Uid) {
        for side in [&mut self.turn_requests, &mut self.turn_responses] {
            if let Some(intents) = side.remove(uid) {
                for intent in intents {
                    if let Some(ts) = self.intent_templates.remove(&intent) {
                        for t in ts {
                            self.templates.remove(&t);
                        }
                    }
                    self.intents.remove(&intent);
                    self.intent_order.retain(|i| i != &intent);
                }
            }
        }
        self.turns.remove(uid);
    }

    fn remove_scene_cascade(&mut self, uid: &Uid) {
        if let Some(turns) = self.scene_turns.remove(uid) {
            for turn in turns {
                self.remove_turn_cascade(&turn);
            }
        }
        self.scenes.remove(uid);
    }

    fn remove_conversation_cascade(&mut self, uid: &Uid) {
        if let Some(scenes) = self.conversation_scenes.remove(uid) {
            for scene in scenes {
                self.remove_scene_cascade(&scene);
            }
        }
        self.conversations.remove(uid);
    }

    fn remove_scenario_cascade(&mut self, uid: &Uid) {
        if let Some(conversations) = self.scenario_conversations.remove(uid) {
            for conversation in conversations {
                self.remove_conversation_cascade(&conversation);
            }
        }
        self.scenarios.remove(uid);
        self.scenario_order.retain(|s| s != uid);
    }

    fn relation_side_of(&self, turn_uid: &Uid, intent_uid: &Uid) -> Option<Direction> {
        if self
            .turn_requests
            .get(turn_uid)
            .is_some_and(|v| v.contains(intent_uid))
        {
            Some(Direction::Request)
        } else if self
            .turn_responses
            .get(turn_uid)
            .is_some_and(|v| v.contains(intent_uid))
        {
            Some(Direction::Response)
        } else {
            None
        }
    }

    fn intent_is_attached(&self, intent_uid: &Uid) -> Option<Uid> {
        self.intents
            .get(intent_uid)
            .and_then(|i| i.parent_turn)
            .filter(|turn| self.relation_side_of(turn, intent_uid).is_some())
    }
}

fn page_of<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len();
    let items: Vec<T> = items
        .into_iter()
        .skip(page.offset)
        .take(page.limit)
        .collect();
    Page::new(items, total, page.offset)
}

#[async_trait]
impl DataClient for MemoryStore {
    async fn get_scenario(&self, uid: &Uid) -> Result<Scenario, StoreError> {
        self.inner
            .read()
            .hydrate_scenario(uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Scenario, uid))
    }

    async fn get_conversation(&self, uid: &Uid) -> Result<Conversation, StoreError> {
        self.inner
            .read()
            .hydrate_conversation(uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Conversation, uid))
    }

    async fn get_scene(&self, uid: &Uid) -> Result<Scene, StoreError> {
        self.inner
            .read()
            .hydrate_scene(uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Scene, uid))
    }

    async fn get_turn(&self, uid: &Uid) -> Result<Turn, StoreError> {
        self.inner
            .read()
            .hydrate_turn(uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Turn, uid))
    }

    async fn get_intent(&self, uid: &Uid) -> Result<Intent, StoreError> {
        self.inner
            .read()
            .hydrate_intent(uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Intent, uid))
    }

    async fn get_message_template(&self, uid: &Uid) -> Result<MessageTemplate, StoreError> {
        self.inner
            .read()
            .templates
            .get(uid)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::MessageTemplate, uid))
    }

    async fn list_scenarios(&self, page: PageRequest) -> Result<Page<Scenario>, StoreError> {
        let arena = self.inner.read();
        let all: Vec<Scenario> = arena
            .scenario_order
            .iter()
            .filter_map(|uid| arena.hydrate_scenario(uid))
            .collect();
        Ok(page_of(all, page))
    }

    async fn list_intents(&self, page: PageRequest) -> Result<Page<Intent>, StoreError> {
        let arena = self.inner.read();
        let all: Vec<Intent> = arena
            .intent_order
            .iter()
            .filter_map(|uid| arena.hydrate_intent(uid))
            .collect();
        Ok(page_of(all, page))
    }

    async fn conversations_of(&self, scenario_uid: &Uid) -> Result<Vec<Conversation>, StoreError> {
        let arena = self.inner.read();
        let children = arena
            .scenario_conversations
            .get(scenario_uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Scenario, scenario_uid))?;
        Ok(children
            .iter()
            .filter_map(|uid| arena.hydrate_conversation(uid))
            .collect())
    }

    async fn scenes_of(&self, conversation_uid: &Uid) -> Result<Vec<Scene>, StoreError> {
        let arena = self.inner.read();
        if !arena.conversations.contains_key(conversation_uid) {
            return Err(StoreError::not_found(
                EntityKind::Conversation,
                conversation_uid,
            ));
        }
        Ok(arena
            .conversation_scenes
            .get(conversation_uid)
            .into_iter()
            .flatten()
            .filter_map(|uid| arena.hydrate_scene(uid))
            .collect())
    }

    async fn turns_of(&self, scene_uid: &Uid) -> Result<Vec<Turn>, StoreError> {
        let arena = self.inner.read();
        if !arena.scenes.contains_key(scene_uid) {
            return Err(StoreError::not_found(EntityKind::Scene, scene_uid));
        }
        Ok(arena
            .scene_turns
            .get(scene_uid)
            .into_iter()
            .flatten()
            .filter_map(|uid| arena.hydrate_turn(uid))
            .collect())
    }

    async fn templates_of(&self, intent_uid: &Uid) -> Result<Vec<MessageTemplate>, StoreError> {
        let arena = self.inner.read();
        if !arena.intents.contains_key(intent_uid) {
            return Err(StoreError::not_found(EntityKind::Intent, intent_uid));
        }
        Ok(arena
            .intent_templates
            .get(intent_uid)
            .into_iter()
            .flatten()
            .filter_map(|uid| arena.templates.get(uid).cloned())
            .collect())
    }

    async fn get_turn_with_intent(
        &self,
        turn_uid: &Uid,
        intent_uid: &Uid,
    ) -> Result<Turn, StoreError> {
        let arena = self.inner.read();
        let mut turn = arena
            .turns
            .get(turn_uid)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Turn, turn_uid))?;
        let side = arena
            .relation_side_of(turn_uid, intent_uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::TurnIntentRelation, intent_uid))?;
        let intent = arena
            .hydrate_intent(intent_uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Intent, intent_uid))?;
        match side {
            Direction::Request => turn.request_intents = vec![intent],
            Direction::Response => turn.response_intents = vec![intent],
        }
        Ok(turn)
    }

    async fn add_conversation(
        &self,
        scenario_uid: &Uid,
        mut conversation: Conversation,
    ) -> Result<Conversation, StoreError> {
        let mut arena = self.inner.write();
        if !arena.scenarios.contains_key(scenario_uid) {
            return Err(StoreError::not_found(EntityKind::Scenario, scenario_uid));
        }
        let siblings = arena
            .scenario_conversations
            .get(scenario_uid)
            .into_iter()
            .flatten();
        if siblings
            .filter_map(|uid| arena.conversations.get(uid))
            .any(|c| c.od_id == conversation.od_id)
        {
            return Err(StoreError::Conflict(format!(
                "duplicate conversation odId '{}' within scenario",
                conversation.od_id
            )));
        }
        validate_conversation_subtree(&conversation)?;
        assign_conversation_uids(&mut conversation, *scenario_uid);
        let uid = conversation.uid.expect("uid just assigned");
        arena.insert_conversation(conversation);
        debug!(%scenario_uid, %uid, "conversation added");
        arena
            .hydrate_conversation(&uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Conversation, uid))
    }

    async fn add_request_intent(
        &self,
        turn_uid: &Uid,
        intent: Intent,
    ) -> Result<Intent, StoreError> {
        self.add_intent_on(turn_uid, intent, Direction::Request)
    }

    async fn add_response_intent(
        &self,
        turn_uid: &Uid,
        intent: Intent,
    ) -> Result<Intent, StoreError> {
        self.add_intent_on(turn_uid, intent, Direction::Response)
    }

    async fn add_message_template(
        &self,
        intent_uid: &Uid,
        mut template: MessageTemplate,
    ) -> Result<MessageTemplate, StoreError> {
        let mut arena = self.inner.write();
        if !arena.intents.contains_key(intent_uid) {
            return Err(StoreError::not_found(EntityKind::Intent, intent_uid));
        }
        let siblings = arena.intent_templates.get(intent_uid).into_iter().flatten();
        if siblings
            .filter_map(|uid| arena.templates.get(uid))
            .any(|t| t.od_id == template.od_id)
        {
            return Err(StoreError::Conflict(format!(
                "duplicate template odId '{}' within intent",
                template.od_id
            )));
        }
        assign_template_uids(&mut template, *intent_uid);
        let uid = template.uid.expect("uid just assigned");
        arena.insert_template(template.clone());
        debug!(%intent_uid, %uid, "template added");
        Ok(template)
    }

    async fn add_full_scenario_graph(
        &self,
        mut scenario: Scenario,
    ) -> Result<Scenario, StoreError> {
        let mut arena = self.inner.write();
        if arena.scenarios.values().any(|s| s.od_id == scenario.od_id) {
            return Err(StoreError::Conflict(format!(
                "duplicate scenario odId '{}'",
                scenario.od_id
            )));
        }
        // Validation happens in full before the first insertion; a reject
        // here leaves nothing of the subtree visible.
        validate_scenario_subtree(&scenario)?;
        let uid = assign_scenario_uids(&mut scenario);
        arena.insert_scenario(scenario);
        debug!(%uid, "full scenario graph persisted");
        arena
            .hydrate_scenario(&uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Scenario, uid))
    }

    async fn update_scenario(&self, scenario: Scenario) -> Result<Scenario, StoreError> {
        let uid = scenario
            .uid
            .ok_or_else(|| StoreError::not_found(EntityKind::Scenario, "<unassigned>"))?;
        check_conditions(&scenario.conditions)?;
        let mut arena = self.inner.write();
        let stored = arena
            .scenarios
            .get_mut(&uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Scenario, uid))?;
        // Whole-entity replace of the scenario's own fields; children are
        // managed through their own add/delete operations.
        stored.od_id = scenario.od_id;
        stored.name = scenario.name;
        stored.interpreter = scenario.interpreter;
        stored.conditions = scenario.conditions;
        stored.behaviors = scenario.behaviors;
        arena
            .hydrate_scenario(&uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Scenario, uid))
    }

    async fn update_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, StoreError> {
        let uid = conversation
            .uid
            .ok_or_else(|| StoreError::not_found(EntityKind::Conversation, "<unassigned>"))?;
        let mut arena = self.inner.write();
        let stored = arena
            .conversations
            .get_mut(&uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Conversation, uid))?;
        stored.od_id = conversation.od_id;
        stored.name = conversation.name;
        stored.description = conversation.description;
        stored.interpreter = conversation.interpreter;
        stored.behaviors = conversation.behaviors;
        arena
            .hydrate_conversation(&uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Conversation, uid))
    }

    async fn update_turn(&self, turn: Turn) -> Result<Turn, StoreError> {
        let uid = turn
            .uid
            .ok_or_else(|| StoreError::not_found(EntityKind::Turn, "<unassigned>"))?;
        let mut arena = self.inner.write();
        let stored = arena
            .turns
            .get_mut(&uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Turn, uid))?;
        stored.od_id = turn.od_id;
        stored.name = turn.name;
        stored.description = turn.description;
        stored.interpreter = turn.interpreter;
        stored.behaviors = turn.behaviors;
        arena
            .hydrate_turn(&uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Turn, uid))
    }

    async fn update_intent(&self, intent: Intent) -> Result<Intent, StoreError> {
        let uid = intent
            .uid
            .ok_or_else(|| StoreError::not_found(EntityKind::Intent, "<unassigned>"))?;
        let mut arena = self.inner.write();
        let stored = arena
            .intents
            .get_mut(&uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Intent, uid))?;
        // The turn relation and the owned templates are deliberately left
        // untouched here.
        stored.od_id = intent.od_id;
        stored.name = intent.name;
        stored.speaker = intent.speaker;
        stored.is_request_intent = intent.is_request_intent;
        stored.sample_utterance = intent.sample_utterance;
        stored.interpreter = intent.interpreter;
        stored.confidence = intent.confidence;
        stored.behaviors = intent.behaviors;
        stored.conditions = intent.conditions;
        arena
            .hydrate_intent(&uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Intent, uid))
    }

    async fn update_turn_intent_relation(
        &self,
        turn_uid: &Uid,
        intent_uid: &Uid,
        direction: Direction,
    ) -> Result<(), StoreError> {
        let mut arena = self.inner.write();
        let arena = &mut *arena;
        if !arena.turns.contains_key(turn_uid) {
            return Err(StoreError::not_found(EntityKind::Turn, turn_uid));
        }
        let current = arena
            .relation_side_of(turn_uid, intent_uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::TurnIntentRelation, intent_uid))?;
        if current == direction {
            return Ok(());
        }
        let (from, to) = match direction {
            Direction::Request => (&mut arena.turn_responses, &mut arena.turn_requests),
            Direction::Response => (&mut arena.turn_requests, &mut arena.turn_responses),
        };
        if let Some(side) = from.get_mut(turn_uid) {
            side.retain(|i| i != intent_uid);
        }
        to.entry(*turn_uid).or_default().push(*intent_uid);
        debug!(%turn_uid, %intent_uid, %direction, "turn-intent relation reclassified");
        Ok(())
    }

    async fn delete_scenario(&self, uid: &Uid) -> Result<(), StoreError> {
        let mut arena = self.inner.write();
        if !arena.scenarios.contains_key(uid) {
            return Err(StoreError::not_found(EntityKind::Scenario, uid));
        }
        arena.remove_scenario_cascade(uid);
        debug!(%uid, "scenario deleted (cascade)");
        Ok(())
    }

    async fn delete_turn(&self, uid: &Uid) -> Result<(), StoreError> {
        let mut arena = self.inner.write();
        if !arena.turns.contains_key(uid) {
            return Err(StoreError::not_found(EntityKind::Turn, uid));
        }
        let parent = arena.turns.get(uid).and_then(|t| t.parent_scene);
        if let Some(parent) = parent {
            if let Some(siblings) = arena.scene_turns.get_mut(&parent) {
                siblings.retain(|t| t != uid);
            }
        }
        arena.remove_turn_cascade(uid);
        debug!(%uid, "turn deleted (cascade)");
        Ok(())
    }

    async fn delete_intent(&self, uid: &Uid) -> Result<(), StoreError> {
        let mut arena = self.inner.write();
        if !arena.intents.contains_key(uid) {
            return Err(StoreError::not_found(EntityKind::Intent, uid));
        }
        if let Some(turn) = arena.intent_is_attached(uid) {
            return Err(StoreError::Conflict(format!(
                "intent {uid} is still attached to turn {turn}; detach the relation first"
            )));
        }
        arena.remove_intent_entity(uid);
        debug!(%uid, "intent deleted");
        Ok(())
    }

    async fn delete_turn_intent(
        &self,
        turn_uid: &Uid,
        intent_uid: &Uid,
    ) -> Result<(), StoreError> {
        let mut arena = self.inner.write();
        if !arena.turns.contains_key(turn_uid) {
            return Err(StoreError::not_found(EntityKind::Turn, turn_uid));
        }
        let side = arena
            .relation_side_of(turn_uid, intent_uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::TurnIntentRelation, intent_uid))?;
        let list = match side {
            Direction::Request => arena.turn_requests.get_mut(turn_uid),
            Direction::Response => arena.turn_responses.get_mut(turn_uid),
        };
        if let Some(list) = list {
            list.retain(|i| i != intent_uid);
        }
        if let Some(intent) = arena.intents.get_mut(intent_uid) {
            intent.parent_turn = None;
        }
        debug!(%turn_uid, %intent_uid, "turn-intent relation detached");
        Ok(())
    }
}

impl MemoryStore {
    fn add_intent_on(
        &self,
        turn_uid: &Uid,
        mut intent: Intent,
        direction: Direction,
    ) -> Result<Intent, StoreError> {
        check_intent_side(&intent, direction)?;
        let mut arena = self.inner.write();
        if !arena.turns.contains_key(turn_uid) {
            return Err(StoreError::not_found(EntityKind::Turn, turn_uid));
        }
        let siblings = arena
            .turn_requests
            .get(turn_uid)
            .into_iter()
            .flatten()
            .chain(arena.turn_responses.get(turn_uid).into_iter().flatten());
        if siblings
            .filter_map(|uid| arena.intents.get(uid))
            .any(|i| i.od_id == intent.od_id)
        {
            return Err(StoreError::Conflict(format!(
                "duplicate intent odId '{}' within turn",
                intent.od_id
            )));
        }
        assign_intent_uids(&mut intent, *turn_uid);
        let uid = intent.uid.expect("uid just assigned");
        arena.insert_intent(intent, direction);
        debug!(%turn_uid, %uid, %direction, "intent added");
        arena
            .hydrate_intent(&uid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Intent, uid))
    }
}
