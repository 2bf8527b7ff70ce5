use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use self::gemini::GeminiConfig;
use self::log::LogConfig;
use self::storage::StorageConfig;

pub mod gemini;
pub mod log;
pub mod storage;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

impl Config {
    /// Build config from process environment
    pub fn new() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            gemini: GeminiConfig::from_lookup(&var),
            storage: StorageConfig::from_lookup(&var),
            log: LogConfig::from_lookup(&var),
        }
    }

    /// Load a JSON config file. The API key is taken from the environment
    /// when the file doesn't carry one.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        Self::from_file_with(path, |name| env::var(name).ok())
    }

    pub fn from_file_with(
        path: &Path,
        var: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open config {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        if config.gemini.api_key.is_empty() {
            config.gemini.api_key = GeminiConfig::from_lookup(var).api_key;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(lookup(&[]));

        assert!(config.gemini.api_key.is_empty());
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.timeout_seconds, 30);
        assert_eq!(config.storage.key, "savedWords");
        assert_eq!(config.storage.path, PathBuf::from(".shobdo").join("storage.json"));
        assert_eq!(config.log.filter, "warn");
        assert!(!config.log.json);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("VITE_GEMINI_API_KEY", "legacy"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("REQUEST_TIMEOUT_SECONDS", "not-a-number"),
            ("SHOBDO_STORAGE_KEY", "words"),
            ("SHOBDO_LOG_JSON", "true"),
        ]));

        assert_eq!(config.gemini.api_key, "legacy");
        assert_eq!(config.gemini.model, "gemini-pro");
        assert_eq!(config.gemini.timeout_seconds, 30);
        assert_eq!(config.storage.key, "words");
        assert!(config.log.json);

        let preferred = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "new"),
            ("VITE_GEMINI_API_KEY", "legacy"),
        ]));
        assert_eq!(preferred.gemini.api_key, "new");
    }

    #[test]
    fn test_endpoint() {
        let mut gemini = GeminiConfig::default();
        gemini.api_url = "http://localhost:9000/models/".to_string();
        assert_eq!(
            gemini.endpoint(),
            "http://localhost:9000/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"gemini": {{"model": "gemini-1.5-pro"}}, "storage": {{"key": "mine"}}}}"#)
            .unwrap();

        let config = Config::from_file_with(file.path(), lookup(&[("GEMINI_API_KEY", "k")])).unwrap();

        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.gemini.api_key, "k");
        assert_eq!(config.gemini.timeout_seconds, 30);
        assert_eq!(config.storage.key, "mine");
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = Config::default();
        config.gemini.api_key = "secret".to_string();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
