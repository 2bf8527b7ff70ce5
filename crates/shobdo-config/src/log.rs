use serde::{Deserialize, Serialize};

fn default_filter() -> String {
    "warn".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl LogConfig {
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let filter = var("SHOBDO_LOG").unwrap_or_else(default_filter);
        let json = var("SHOBDO_LOG_JSON")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self { filter, json }
    }
}
