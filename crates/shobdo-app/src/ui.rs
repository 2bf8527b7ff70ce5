use std::io::{self, BufRead, Write};
use std::thread::{self, JoinHandle};

use kanal::{AsyncReceiver, Sender};
use shobdo_types::{AppEvent, UiEvent, View};
use tokio_util::sync::CancellationToken;

use crate::render;

/// One line typed at the prompt
#[derive(Debug, PartialEq)]
pub enum Input {
    Empty,
    Help,
    ConfirmClear,
    Unknown(String),
    Event(UiEvent),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }

    match line {
        ":q" | ":quit" | ":exit" => return Input::Event(UiEvent::Quit),
        ":h" | ":help" => return Input::Help,
        ":home" => return Input::Event(UiEvent::Navigate(View::Home)),
        ":t" | ":translate" => return Input::Event(UiEvent::Navigate(View::Translate)),
        ":c" | ":correct" => return Input::Event(UiEvent::Navigate(View::Correct)),
        ":w" | ":words" => return Input::Event(UiEvent::Navigate(View::WordList)),
        "!clear" => return Input::ConfirmClear,
        _ => {}
    }

    if line.starts_with(':') || line.starts_with('!') {
        return Input::Unknown(line.to_string());
    }

    if let Some(number) = line.strip_prefix('+') {
        if let Ok(n @ 1..) = number.trim().parse::<usize>() {
            return Input::Event(UiEvent::SaveWord(n - 1));
        }
    }

    if let Some(id) = line.strip_prefix('-') {
        if let Ok(id) = id.trim().parse::<i64>() {
            return Input::Event(UiEvent::RemoveWord(id));
        }
    }

    if let Some(term) = line.strip_prefix('/') {
        return Input::Event(UiEvent::Search(term.trim().to_string()));
    }

    Input::Event(UiEvent::Submit(line.to_string()))
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Read stdin on a plain thread; a blocked read must not hold up runtime
/// shutdown. Sends `Quit` on end of input.
pub fn spawn_input(ui_to_app_tx: Sender<AppEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("shobdo-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();

            while let Some(Ok(line)) = lines.next() {
                let event = match parse_input(&line) {
                    Input::Empty => continue,
                    Input::Help => {
                        print!("{}", render::help());
                        continue;
                    }
                    Input::Unknown(command) => {
                        println!("Unknown command {command}, type :help");
                        continue;
                    }
                    Input::ConfirmClear => {
                        print!("Are you sure you want to delete all saved words? [y/N] ");
                        let _ = io::stdout().flush();
                        match lines.next() {
                            Some(Ok(answer)) if is_yes(&answer) => UiEvent::ClearWords,
                            _ => continue,
                        }
                    }
                    Input::Event(event) => event,
                };

                let quit = matches!(event, UiEvent::Quit);
                if ui_to_app_tx.send(AppEvent::UiEvent(event)).is_err() || quit {
                    return;
                }
            }

            tracing::debug!("Input closed");
            let _ = ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Quit));
        })
}

/// Text printed for an event coming from the app, `None` for events the
/// terminal doesn't show
pub fn render_event(event: &AppEvent) -> Option<String> {
    match event {
        AppEvent::ShowView(View::Home) => Some(render::home()),
        AppEvent::ShowView(View::WordList) => None,
        AppEvent::ShowView(view) => Some(render::view_banner(*view)),
        AppEvent::ShowTranslation {
            mode,
            result,
            saved,
        } => Some(render::translation(*mode, result, saved)),
        AppEvent::ShowWords {
            entries,
            term,
            total,
        } => Some(render::words(entries, term, *total)),
        AppEvent::TranslationFailed(message) => Some(format!("{message}\n")),
        AppEvent::Status(message) => Some(format!("{message}\n")),
        AppEvent::UiEvent(_) | AppEvent::Closed => None,
    }
}

fn prompt(view: View) -> &'static str {
    match view {
        View::Home => "home> ",
        View::Translate => "translate> ",
        View::Correct => "correct> ",
        View::WordList => "words> ",
    }
}

/// Terminal side of the session: prints whatever the app sends
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    interactive: bool,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut current = View::Home;

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => event?,
        };

        if let AppEvent::ShowView(view) = &event {
            current = *view;
        }

        if matches!(event, AppEvent::Closed) {
            break;
        }

        if let Some(text) = render_event(&event) {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{text}")?;
            if interactive {
                write!(stdout, "{}", prompt(current))?;
            }
            stdout.flush()?;
        }
    }

    println!();
    Ok(())
}
