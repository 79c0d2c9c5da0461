//! Shared fixtures for the integration tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use crimeboard::services::orchestrator::AgentStage;
use crimeboard_core::{EvidenceItem, EvidenceKind};
use crimeboard_llm::AgentClient;

/// Answers each stage with a scripted reply ("{}" when none is scripted) and
/// records the user prompt every stage received.
#[derive(Default)]
pub struct ScriptedAgent {
    replies: HashMap<AgentStage, String>,
    prompts: Mutex<Vec<(Option<AgentStage>, String)>>,
}

impl ScriptedAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, stage: AgentStage, reply: impl Into<String>) -> Self {
        self.replies.insert(stage, reply.into());
        self
    }

    /// Stages in the order they were called.
    pub fn called_stages(&self) -> Vec<Option<AgentStage>> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .map(|(stage, _)| *stage)
            .collect()
    }

    /// User prompt sent to `stage`.
    pub fn prompt_for(&self, stage: AgentStage) -> Option<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .find(|(s, _)| *s == Some(stage))
            .map(|(_, prompt)| prompt.clone())
    }
}

#[async_trait]
impl AgentClient for ScriptedAgent {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn call(&self, system_prompt: &str, user_prompt: &str) -> String {
        let stage = AgentStage::from_system_prompt(system_prompt);
        self.prompts
            .lock()
            .unwrap()
            .push((stage, user_prompt.to_string()));
        stage
            .and_then(|s| self.replies.get(&s).cloned())
            .unwrap_or_else(|| "{}".to_string())
    }
}

/// A photo and a witness statement.
pub fn two_item_evidence() -> Vec<EvidenceItem> {
    let photo = EvidenceItem::new("ev-photo", EvidenceKind::Photo, "alley_scene.jpg");
    let mut statement = EvidenceItem::new("ev-stmt", EvidenceKind::Statement, "witness_1.txt");
    statement.extracted_text = Some(serde_json::Value::String(
        "I saw a man in a grey hoodie run toward the docks".to_string(),
    ));
    vec![photo, statement]
}
