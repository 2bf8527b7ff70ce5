use kanal::AsyncSender;
use shobdo_types::{AppEvent, View};

use crate::events::ViewState;
use crate::events::submit::saved_flags;
use crate::state::AppState;

pub async fn show_words(
    state: &AppState,
    view: &ViewState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let entries = state.vocabulary.search(&view.search_term);
    let total = state.vocabulary.len();

    app_to_ui_tx
        .send(AppEvent::ShowWords {
            entries,
            term: view.search_term.clone(),
            total,
        })
        .await?;

    Ok(())
}

/// Save word meaning `index` of the result on screen
pub async fn handle_save(
    state: &AppState,
    view: &ViewState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    index: usize,
) -> anyhow::Result<()> {
    let Some(result) = view.result.as_ref() else {
        app_to_ui_tx
            .send(AppEvent::Status("Nothing to save yet".to_string()))
            .await?;
        return Ok(());
    };

    let Some(word) = result.word_meanings.get(index) else {
        app_to_ui_tx
            .send(AppEvent::Status(format!("No word #{}", index + 1)))
            .await?;
        return Ok(());
    };

    let outcome = state.vocabulary.add(word);
    let message = if outcome.is_added() {
        format!("Added '{}' to your word list", word.english)
    } else {
        format!("'{}' is already in your word list", word.english)
    };

    if let Some(mode) = view.view.mode() {
        app_to_ui_tx
            .send(AppEvent::ShowTranslation {
                mode,
                result: result.clone(),
                saved: saved_flags(state, result),
            })
            .await?;
    }

    app_to_ui_tx.send(AppEvent::Status(message)).await?;

    Ok(())
}

pub async fn handle_removal(
    state: &AppState,
    view: &ViewState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    id: i64,
) -> anyhow::Result<()> {
    let message = if state.vocabulary.remove(id) {
        format!("Deleted word {id}")
    } else {
        format!("No saved word with id {id}")
    };
    app_to_ui_tx.send(AppEvent::Status(message)).await?;

    if view.view == View::WordList {
        show_words(state, view, app_to_ui_tx).await?;
    }

    Ok(())
}

pub async fn handle_search(
    state: &AppState,
    view: &mut ViewState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    term: String,
) -> anyhow::Result<()> {
    view.search_term = term.trim().to_string();
    show_words(state, view, app_to_ui_tx).await
}

pub async fn handle_clear(
    state: &AppState,
    view: &ViewState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    state.vocabulary.clear();
    tracing::info!("Word list cleared");
    app_to_ui_tx
        .send(AppEvent::Status("All saved words deleted".to_string()))
        .await?;

    if view.view == View::WordList {
        show_words(state, view, app_to_ui_tx).await?;
    }

    Ok(())
}
