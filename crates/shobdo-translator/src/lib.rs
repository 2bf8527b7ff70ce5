mod gate;
mod gemini;
mod interpret;
mod prompt;

pub use gate::{RequestGate, Ticket};
pub use gemini::GeminiClient;
pub use interpret::{extract_json_object, interpret};
pub use prompt::compose;

use shobdo_types::{Mode, TranslationResult};

/// Shown to the user whenever a request fails, whatever the cause
pub const FAILURE_MESSAGE: &str = "Translation failed. Please check your API key and try again.";

/// Generative-language provider interface
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a free-text prompt, return the model's free-text reply
    async fn generate(&self, prompt: &str) -> Result<String, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Nothing to translate")]
    EmptyInput,

    #[error("Gemini API key not found, set GEMINI_API_KEY")]
    MissingApiKey,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

impl TranslateError {
    pub fn user_message(&self) -> &'static str {
        FAILURE_MESSAGE
    }
}

/// Compose the prompt for `mode`, call the model and interpret its reply
pub async fn request(
    model: &dyn LanguageModel,
    mode: Mode,
    text: &str,
) -> Result<TranslationResult, TranslateError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TranslateError::EmptyInput);
    }

    let prompt = compose(mode, text);
    tracing::debug!(?mode, chars = text.len(), "Sending prompt");

    let reply = model.generate(&prompt).await?;
    tracing::debug!(chars = reply.len(), "Reply received");

    let mut result = interpret(&reply)?;
    if mode == Mode::Translate {
        result.has_errors = false;
        result.corrections.clear();
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct CannedModel {
        reply: Result<String, ()>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedModel {
        fn new(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl LanguageModel for CannedModel {
        async fn generate(&self, prompt: &str) -> Result<String, TranslateError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .clone()
                .map_err(|_| TranslateError::ApiError("HTTP 500".to_string()))
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "canned".to_string(),
                model: "test".to_string(),
                requires_api_key: false,
            }
        }
    }

    #[tokio::test]
    async fn test_request_translate() {
        let model = CannedModel::new(
            r#"Sure! {"translation":"আমি ভাত খাই","wordMeanings":[{"english":"rice","bangla":"ভাত"}]}"#,
        );

        let result = request(&model, Mode::Translate, "  I eat rice  ").await.unwrap();

        assert_eq!(result.translation, "আমি ভাত খাই");
        assert_eq!(result.word_meanings.len(), 1);
        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("Text: \"I eat rice\""));
    }

    #[tokio::test]
    async fn test_request_translate_ignores_corrections() {
        let model = CannedModel::new(
            r#"{"hasErrors":true,"corrections":[{"original":"a","corrected":"b","type":"grammar","explanation":""}],"translation":"x"}"#,
        );

        let result = request(&model, Mode::Translate, "text").await.unwrap();
        assert!(!result.has_errors);
        assert!(result.corrections.is_empty());
    }

    #[tokio::test]
    async fn test_request_empty_input_skips_model() {
        let model = CannedModel::new("{}");

        let err = request(&model, Mode::Correct, "   ").await.unwrap_err();

        assert!(matches!(err, TranslateError::EmptyInput));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_request_failure_message() {
        let model = CannedModel::failing();

        let err = request(&model, Mode::Correct, "He go").await.unwrap_err();
        assert_eq!(err.user_message(), FAILURE_MESSAGE);
    }
}
