use std::sync::Arc;

use anyhow::Context;
use shobdo_config::Config;
use shobdo_core::{FileStorage, KeyValueStorage, MemoryStorage, VocabularyStore};
use shobdo_translator::{GeminiClient, LanguageModel, RequestGate};

pub type Vocabulary = VocabularyStore<Box<dyn KeyValueStorage>>;

pub struct AppState {
    pub config: Config,
    pub vocabulary: Vocabulary,
    pub model: Arc<dyn LanguageModel>,
    pub gate: RequestGate,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let storage: Box<dyn KeyValueStorage> = if config.storage.ephemeral {
            tracing::info!("Word list kept in memory only");
            Box::new(MemoryStorage::new())
        } else {
            tracing::info!("Word list stored in {}", config.storage.path.display());
            Box::new(FileStorage::new(config.storage.path.clone()))
        };

        let model = GeminiClient::new(&config.gemini).context("Failed to build HTTP client")?;

        let provider = model.metadata();
        tracing::info!("Using {} model {}", provider.name, provider.model);
        if provider.requires_api_key && config.gemini.api_key.is_empty() {
            tracing::warn!("GEMINI_API_KEY is not set, requests will fail");
        }

        Ok(Self::with_parts(config, storage, Arc::new(model)))
    }

    pub fn with_parts(
        config: Config,
        storage: Box<dyn KeyValueStorage>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        let vocabulary = VocabularyStore::with_key(storage, config.storage.key.clone());

        Self {
            config,
            vocabulary,
            model,
            gate: RequestGate::new(),
        }
    }
}
