use kanal::AsyncSender;
use shobdo_types::{AppEvent, View};

use crate::events::ViewState;
use crate::events::word_list::show_words;
use crate::state::AppState;

/// Switch views. Anything still in flight belongs to the old view and is
/// dropped when it lands.
pub async fn handle_navigation(
    state: &AppState,
    view: &mut ViewState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    target: View,
) -> anyhow::Result<()> {
    state.gate.invalidate();
    *view = ViewState {
        view: target,
        ..ViewState::default()
    };

    tracing::debug!(?target, "Navigated");
    app_to_ui_tx.send(AppEvent::ShowView(target)).await?;

    if target == View::WordList {
        show_words(state, view, app_to_ui_tx).await?;
    }

    Ok(())
}
