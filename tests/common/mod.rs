// Shared test doubles for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use yapbattle::claude::{ContentBlock, MessageRequest, MessageResponse};
use yapbattle::config::Config;
use yapbattle::debate::{DebateService, TurnSettings};
use yapbattle::providers::LlmProvider;
use yapbattle::rating::{MemoryProfileStore, Profile, RatingEngine};

/// Provider that replays scripted replies and records every request
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<MessageResponse, String>>>,
    requests: Mutex<Vec<MessageRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, content: Vec<ContentBlock>) {
        self.replies.lock().unwrap().push_back(Ok(response(content)));
    }

    pub fn fail(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<MessageRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn send_message(&self, request: &MessageRequest) -> anyhow::Result<MessageResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("script exhausted")),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }
}

pub fn response(content: Vec<ContentBlock>) -> MessageResponse {
    MessageResponse {
        id: "msg_test".to_string(),
        response_type: "message".to_string(),
        role: "assistant".to_string(),
        content,
        model: "scripted-model".to_string(),
        stop_reason: Some("end_turn".to_string()),
    }
}

pub fn text(s: &str) -> ContentBlock {
    ContentBlock::Text {
        text: s.to_string(),
    }
}

pub fn tool(id: &str, name: &str, input: Value) -> ContentBlock {
    ContentBlock::ToolUse {
        id: id.to_string(),
        name: name.to_string(),
        input,
    }
}

pub fn score(id: &str, clarity: f64, strength: f64, rhetoric: f64) -> ContentBlock {
    tool(
        id,
        "score_argument",
        json!({
            "clarity": clarity,
            "argument_strength": strength,
            "rhetoric": rhetoric,
            "feedback": "Solid point"
        }),
    )
}

pub fn settings() -> TurnSettings {
    TurnSettings {
        model: "scripted-model".to_string(),
        primary_max_tokens: 2048,
        follow_up_max_tokens: 1024,
    }
}

pub fn service_with(provider: Arc<ScriptedProvider>, profile: Profile) -> DebateService {
    let store = Arc::new(MemoryProfileStore::with_profile(profile));
    let ratings = RatingEngine::load(store).unwrap();
    DebateService::new(Some(provider as Arc<dyn LlmProvider>), settings(), ratings)
}

pub fn test_config(dir: &std::path::Path) -> Config {
    Config::with_data_dir(dir.to_path_buf())
}
