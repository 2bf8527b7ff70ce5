use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from(".shobdo").join("storage.json")
}

fn default_key() -> String {
    "savedWords".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// File holding the key-value slots
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Slot the word list is stored under
    #[serde(default = "default_key")]
    pub key: String,
    /// Keep everything in memory, nothing touches disk
    #[serde(default)]
    pub ephemeral: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            key: default_key(),
            ephemeral: false,
        }
    }
}

impl StorageConfig {
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let path = var("SHOBDO_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_path);
        let key = var("SHOBDO_STORAGE_KEY").unwrap_or_else(default_key);

        Self {
            path,
            key,
            ephemeral: false,
        }
    }
}
