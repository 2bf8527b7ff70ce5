//! Session and command tests against a scripted language model

use std::sync::Arc;

use shobdo_config::Config;
use shobdo_core::MemoryStorage;
use shobdo_translator::{LanguageModel, ProviderMetadata, TranslateError};
use tokio::sync::Notify;

use crate::state::AppState;


pub const RICE_REPLY: &str =
    r#"{"translation":"আমি ভাত খাই","wordMeanings":[{"english":"rice","bangla":"ভাত"},{"english":"eat","bangla":"খাওয়া"}]}"#;

pub const SCHOOL_REPLY: &str = r#"Here you go:
{"hasErrors":true,"corrections":[{"original":"go","corrected":"goes","type":"grammar","explanation":"Third person singular"}],"correctedSentence":"She goes to school","translation":"সে স্কুলে যায়","wordMeanings":[{"english":"school","bangla":"বিদ্যালয়"}]}"#;

/// Replies by marker found in the prompt. `@slow` waits for `release`,
/// `@fail` returns an API error.
pub struct ScriptedModel {
    pub release: Notify,
}

impl ScriptedModel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            release: Notify::new(),
        })
    }
}

#[async_trait::async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String, TranslateError> {
        if prompt.contains("@fail") {
            return Err(TranslateError::ApiError("HTTP 500".to_string()));
        }

        if prompt.contains("@slow") {
            self.release.notified().await;
        }

        if prompt.contains("school") {
            Ok(SCHOOL_REPLY.to_string())
        } else {
            Ok(RICE_REPLY.to_string())
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "scripted".to_string(),
            model: "test".to_string(),
            requires_api_key: false,
        }
    }
}

pub fn test_state(model: Arc<ScriptedModel>) -> Arc<AppState> {
    Arc::new(AppState::with_parts(
        Config::default(),
        Box::new(MemoryStorage::new()),
        model,
    ))
}
