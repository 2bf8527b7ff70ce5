use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;
use shobdo_types::{WordEntry, WordMeaning};

use crate::preprocess::fold;
use crate::storage::KeyValueStorage;

pub const DEFAULT_KEY: &str = "savedWords";

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(WordEntry),
    /// An entry with the same English word (ignoring case) was already saved
    AlreadySaved(WordEntry),
}

impl AddOutcome {
    pub fn entry(&self) -> &WordEntry {
        match self {
            AddOutcome::Added(entry) | AddOutcome::AlreadySaved(entry) => entry,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }
}

/// Saved word list kept as one JSON array under a single storage key.
///
/// Every mutation reads the whole array, changes it and writes it back.
/// Read failures count as an empty list; write failures are only logged.
pub struct VocabularyStore<S> {
    storage: S,
    key: String,
    clock: Clock,
}

impl<S: KeyValueStorage> VocabularyStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the time source used for ids and timestamps
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load(&self) -> Vec<WordEntry> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read saved words: {e}");
                return Vec::new();
            }
        };

        let items: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Saved words are unreadable, treating as empty: {e}");
                return Vec::new();
            }
        };

        // A bad element costs only itself
        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping saved word #{index}: {e}");
                    None
                }
            })
            .collect()
    }

    fn persist(&self, entries: &[WordEntry]) {
        let result = serde_json::to_string(entries)
            .map_err(Into::into)
            .and_then(|raw| self.storage.set(&self.key, &raw));

        if let Err(e) = result {
            tracing::error!("Failed to save word list: {e}");
        }
    }

    /// Save `word` unless its English form is already in the list
    pub fn add(&self, word: &WordMeaning) -> AddOutcome {
        let mut entries = self.load();
        let english = fold(&word.english);

        if let Some(existing) = entries.iter().find(|e| fold(&e.english) == english) {
            tracing::debug!("'{}' already saved as #{}", word.english, existing.id);
            return AddOutcome::AlreadySaved(existing.clone());
        }

        let now = (self.clock)();
        let id = next_id(&entries, now.timestamp_millis());

        let entry = WordEntry {
            id,
            english: word.english.clone(),
            bangla: word.bangla.clone(),
            added_at: now,
        };

        entries.push(entry.clone());
        self.persist(&entries);
        tracing::info!("Word added: {} ({})", entry.english, entry.id);

        AddOutcome::Added(entry)
    }

    /// Delete the entry with `id`, returns whether anything was removed
    pub fn remove(&self, id: i64) -> bool {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|e| e.id != id);

        if entries.len() == before {
            return false;
        }

        self.persist(&entries);
        true
    }

    /// Drop the whole list, storage key included
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(&self.key) {
            tracing::error!("Failed to clear word list: {e}");
        }
    }

    /// Case-insensitive substring match on either language, insertion order kept
    pub fn search(&self, term: &str) -> Vec<WordEntry> {
        let term = fold(term);
        self.load()
            .into_iter()
            .filter(|e| fold(&e.english).contains(&term) || fold(&e.bangla).contains(&term))
            .collect()
    }

    pub fn contains(&self, english: &str) -> bool {
        let english = fold(english);
        self.load().iter().any(|e| fold(&e.english) == english)
    }

    /// Membership of each word in one read of the list
    pub fn saved_flags(&self, words: &[WordMeaning]) -> Vec<bool> {
        let saved: HashSet<String> = self.load().iter().map(|e| fold(&e.english)).collect();
        words
            .iter()
            .map(|word| saved.contains(&fold(&word.english)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Millisecond timestamp, bumped past the newest id. A newest id at
/// `i64::MAX` (hand-edited data) falls back to the first free id from `now_ms`.
fn next_id(entries: &[WordEntry], now_ms: i64) -> i64 {
    let Some(last) = entries.iter().map(|e| e.id).max() else {
        return now_ms;
    };

    if let Some(next) = last.checked_add(1) {
        return now_ms.max(next);
    }

    let taken: HashSet<i64> = entries.iter().map(|e| e.id).collect();
    (now_ms..=i64::MAX)
        .find(|id| !taken.contains(id))
        .or_else(|| (i64::MIN..now_ms).rev().find(|id| !taken.contains(id)))
        .unwrap_or(now_ms)
}
