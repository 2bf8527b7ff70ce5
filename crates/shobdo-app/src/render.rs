use std::fmt::Write;

use shobdo_types::{Mode, TranslationResult, View, WordEntry};

pub fn home() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome to {}", View::Home.title());
    let _ = writeln!(out, "Choose a service to get started:");
    let _ = writeln!(out, "  :translate   English to Bangla translation");
    let _ = writeln!(out, "  :correct     grammar check, then translation");
    let _ = writeln!(out, "  :words       your saved words");
    let _ = writeln!(out, "  :help        all commands");
    out
}

pub fn help() -> String {
    [
        "Commands:",
        "  :home :translate :correct :words   switch view",
        "  <text>                             submit text (translate/correct views)",
        "  +N                                 save word meaning N",
        "  /term                              search saved words (empty term shows all)",
        "  -ID                                delete saved word",
        "  !clear                             delete all saved words",
        "  :quit                              exit",
        "",
    ]
    .join("\n")
}

pub fn view_banner(view: View) -> String {
    match view {
        View::Translate => format!("{}\nType your English sentence and press Enter.\n", view.title()),
        View::Correct => format!(
            "{}\nType a sentence to check it for mistakes and translate it.\n",
            view.title()
        ),
        View::Home | View::WordList => format!("{}\n", view.title()),
    }
}

pub fn translation(mode: Mode, result: &TranslationResult, saved: &[bool]) -> String {
    let mut out = String::new();

    if mode == Mode::Correct {
        if result.has_errors {
            let _ = writeln!(out, "Corrections");
            for item in &result.corrections {
                let _ = writeln!(
                    out,
                    "  {} -> {} [{}]",
                    item.original,
                    item.corrected,
                    item.kind.as_str()
                );
                if !item.explanation.is_empty() {
                    let _ = writeln!(out, "      {}", item.explanation);
                }
            }
            if !result.corrected_sentence.is_empty() {
                let _ = writeln!(out, "Corrected sentence: {}", result.corrected_sentence);
            }
        } else {
            let _ = writeln!(out, "No mistakes found.");
        }
        let _ = writeln!(out);
    }

    if !result.translation.is_empty() {
        let _ = writeln!(out, "Bangla Translation");
        let _ = writeln!(out, "  {}", result.translation);
    }

    if !result.word_meanings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Word by Word Meanings");
        for (index, word) in result.word_meanings.iter().enumerate() {
            let mark = if saved.get(index).copied().unwrap_or(false) {
                "[saved]"
            } else {
                "[+]"
            };
            let _ = writeln!(out, "  {:>2}. {} : {} {}", index + 1, word.english, word.bangla, mark);
        }
        let _ = writeln!(out, "Type +N to add a word to your list.");
    }

    out
}

pub fn words(entries: &[WordEntry], term: &str, total: usize) -> String {
    let mut out = String::new();
    let plural = if total == 1 { "" } else { "s" };
    let _ = writeln!(out, "{} ({} word{} saved)", View::WordList.title(), total, plural);

    if total == 0 {
        let _ = writeln!(out, "No Words Saved Yet");
        let _ = writeln!(
            out,
            "Start translating text and save individual words to build your personal vocabulary list."
        );
        return out;
    }

    if term.is_empty() {
        let _ = writeln!(out, "All Words");
    } else {
        let _ = writeln!(out, "Search Results ({})", entries.len());
        if entries.is_empty() {
            let _ = writeln!(out, "  No words found matching \"{term}\"");
            return out;
        }
    }

    for entry in entries {
        let _ = writeln!(
            out,
            "  {}  {} : {}  (Added on {})",
            entry.id,
            entry.english,
            entry.bangla,
            entry.added_on()
        );
    }

    out
}
