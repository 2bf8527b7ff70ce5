use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use shobdo_types::{AppEvent, TranslationResult, UiEvent, View};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod navigate;
pub mod submit;
pub mod word_list;

use navigate::handle_navigation;
use submit::{Completion, handle_completion, handle_submit};
use word_list::{handle_clear, handle_removal, handle_save, handle_search};

/// What the current screen shows
#[derive(Debug, Default)]
pub struct ViewState {
    pub view: View,
    pub result: Option<TranslationResult>,
    pub search_term: String,
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (done_tx, done_rx) = kanal::bounded_async::<Completion>(8);
    let mut view = ViewState::default();

    app_to_ui_tx.send(AppEvent::ShowView(View::Home)).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => {
                let Ok(event) = event else {
                    tracing::info!("[EVENT_LOOP] Input closed");
                    finish_in_flight(&state, &mut view, &app_to_ui_tx, &done_rx, &cancel).await?;
                    break;
                };

                let keep_running =
                    handle_events(&state, &mut view, &app_to_ui_tx, &done_tx, event).await?;
                if !keep_running {
                    finish_in_flight(&state, &mut view, &app_to_ui_tx, &done_rx, &cancel).await?;
                    break;
                }
            }
            done = done_rx.recv() => {
                handle_completion(&state, &mut view, &app_to_ui_tx, done?).await?;
            }
        }
    }

    let _ = app_to_ui_tx.send(AppEvent::Closed).await;
    Ok(())
}

/// Show the pending request's result before closing; only cancellation
/// abandons it
async fn finish_in_flight(
    state: &AppState,
    view: &mut ViewState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    done_rx: &AsyncReceiver<Completion>,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    while state.gate.is_busy() {
        tracing::debug!("[EVENT_LOOP] Waiting for request in flight before closing");
        tokio::select! {
            _ = cancel.cancelled() => break,
            done = done_rx.recv() => {
                handle_completion(state, view, app_to_ui_tx, done?).await?;
            }
        }
    }

    Ok(())
}

/// Returns false once the session should end
async fn handle_events(
    state: &AppState,
    view: &mut ViewState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    done_tx: &AsyncSender<Completion>,
    event: AppEvent,
) -> anyhow::Result<bool> {
    let AppEvent::UiEvent(event) = event else {
        // Render-only events travel the other way
        return Ok(true);
    };

    tracing::debug!(?event, "Handling UI event");
    match event {
        UiEvent::Submit(text) if view.view == View::WordList => {
            handle_search(state, view, app_to_ui_tx, text).await?;
        }
        UiEvent::Submit(text) => {
            handle_submit(state, view, app_to_ui_tx, done_tx, text).await?;
        }
        UiEvent::Navigate(target) => {
            handle_navigation(state, view, app_to_ui_tx, target).await?;
        }
        UiEvent::SaveWord(index) => {
            handle_save(state, view, app_to_ui_tx, index).await?;
        }
        UiEvent::RemoveWord(id) => {
            handle_removal(state, view, app_to_ui_tx, id).await?;
        }
        UiEvent::Search(term) => {
            if view.view != View::WordList {
                handle_navigation(state, view, app_to_ui_tx, View::WordList).await?;
            }
            handle_search(state, view, app_to_ui_tx, term).await?;
        }
        UiEvent::ClearWords => {
            handle_clear(state, view, app_to_ui_tx).await?;
        }
        UiEvent::Quit => return Ok(false),
    }

    Ok(true)
}
