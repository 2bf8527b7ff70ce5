use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// English word with its Bangla meaning, as returned by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMeaning {
    pub english: String,
    pub bangla: String,
}

impl WordMeaning {
    pub fn new(english: impl Into<String>, bangla: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            bangla: bangla.into(),
        }
    }
}

/// A saved vocabulary pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Creation timestamp in milliseconds
    pub id: i64,
    pub english: String,
    pub bangla: String,
    pub added_at: DateTime<Utc>,
}

impl WordEntry {
    /// Date shown next to an entry, e.g. "Mar 5, 2025"
    pub fn added_on(&self) -> String {
        self.added_at.format("%b %-d, %Y").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionKind {
    Grammar,
    Spelling,
    Structure,
    #[serde(other)]
    Other,
}

impl CorrectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectionKind::Grammar => "grammar",
            CorrectionKind::Spelling => "spelling",
            CorrectionKind::Structure => "structure",
            CorrectionKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionItem {
    pub original: String,
    pub corrected: String,
    #[serde(rename = "type")]
    pub kind: CorrectionKind,
    pub explanation: String,
}

/// Interpreted model reply, held only in view state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub has_errors: bool,
    pub corrections: Vec<CorrectionItem>,
    pub corrected_sentence: String,
    pub translation: String,
    pub word_meanings: Vec<WordMeaning>,
}

/// Kind of request sent to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Translate,
    Correct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Translate,
    Correct,
    WordList,
}

impl View {
    pub fn mode(&self) -> Option<Mode> {
        match self {
            View::Translate => Some(Mode::Translate),
            View::Correct => Some(Mode::Correct),
            View::Home | View::WordList => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Translate & Correct",
            View::Translate => "English to Bangla Translator",
            View::Correct => "Grammar Correction & Translation",
            View::WordList => "My Word List",
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    ShowView(View),
    ShowTranslation {
        mode: Mode,
        result: TranslationResult,
        /// Parallel to `result.word_meanings`: already in the word list
        saved: Vec<bool>,
    },
    ShowWords {
        entries: Vec<WordEntry>,
        term: String,
        total: usize,
    },
    TranslationFailed(String),
    Status(String),
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Submit(String),
    Navigate(View),
    SaveWord(usize),
    RemoveWord(i64),
    Search(String),
    ClearWords,
    Quit,
}
