use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    /// Never written back to profile files
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl GeminiConfig {
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = var("GEMINI_API_KEY")
            .or_else(|| var("VITE_GEMINI_API_KEY"))
            .unwrap_or_default();

        let api_url = var("GEMINI_API_URL").unwrap_or_else(default_api_url);
        let model = var("GEMINI_MODEL").unwrap_or_else(default_model);

        let timeout_seconds = var("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        Self {
            api_key,
            api_url,
            model,
            timeout_seconds,
        }
    }

    /// Full `generateContent` URL for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}
