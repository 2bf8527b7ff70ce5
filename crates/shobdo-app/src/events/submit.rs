use kanal::AsyncSender;
use shobdo_core::preprocess::normalize_input;
use shobdo_translator::{TranslateError, Ticket};
use shobdo_types::{AppEvent, Mode, TranslationResult};

use crate::events::ViewState;
use crate::state::AppState;

/// Result of one model request, sent back to the event loop
pub struct Completion {
    pub ticket: Ticket,
    pub mode: Mode,
    pub result: Result<TranslationResult, TranslateError>,
}

pub async fn handle_submit(
    state: &AppState,
    view: &ViewState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    done_tx: &AsyncSender<Completion>,
    text: String,
) -> anyhow::Result<()> {
    let text = normalize_input(&text);
    if text.is_empty() {
        return Ok(());
    }

    let Some(mode) = view.view.mode() else {
        app_to_ui_tx
            .send(AppEvent::Status(
                "Open :translate or :correct to submit text".to_string(),
            ))
            .await?;
        return Ok(());
    };

    let Some(ticket) = state.gate.try_begin() else {
        tracing::debug!("Submission refused, request in flight");
        app_to_ui_tx
            .send(AppEvent::Status(
                "Still working on the previous request...".to_string(),
            ))
            .await?;
        return Ok(());
    };

    let status = match mode {
        Mode::Translate => "Translating...",
        Mode::Correct => "Checking...",
    };
    app_to_ui_tx.send(AppEvent::Status(status.to_string())).await?;

    let model = state.model.clone();
    let done_tx = done_tx.clone();
    tokio::spawn(async move {
        let result = shobdo_translator::request(model.as_ref(), mode, &text).await;
        if let Err(e) = done_tx.send(Completion { ticket, mode, result }).await {
            tracing::warn!("Dropping completed request, event loop gone: {e}");
        }
    });

    Ok(())
}

pub async fn handle_completion(
    state: &AppState,
    view: &mut ViewState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    completion: Completion,
) -> anyhow::Result<()> {
    if !state.gate.finish(completion.ticket) {
        tracing::debug!("Stale response ignored");
        return Ok(());
    }

    match completion.result {
        Ok(result) => {
            let saved = saved_flags(state, &result);
            view.result = Some(result.clone());
            app_to_ui_tx
                .send(AppEvent::ShowTranslation {
                    mode: completion.mode,
                    result,
                    saved,
                })
                .await?;
        }
        Err(e) => {
            tracing::error!("Translation error: {e}");
            view.result = None;
            app_to_ui_tx
                .send(AppEvent::TranslationFailed(e.user_message().to_string()))
                .await?;
        }
    }

    Ok(())
}

/// Which word meanings are already in the word list
pub fn saved_flags(state: &AppState, result: &TranslationResult) -> Vec<bool> {
    state.vocabulary.saved_flags(&result.word_meanings)
}
