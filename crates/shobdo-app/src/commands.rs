use std::io::{self, Write};
use std::process::ExitCode;

use shobdo_translator::TranslateError;
use shobdo_types::Mode;

use crate::cli::{Command, TextArgs, WordsCommand};
use crate::events::submit::saved_flags;
use crate::render;
use crate::state::AppState;
use crate::ui::is_yes;

/// Run a single subcommand and print its result to stdout
pub async fn run_command(state: &AppState, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Translate(args) => text(state, Mode::Translate, args).await,
        Command::Correct(args) => text(state, Mode::Correct, args).await,
        Command::Words(command) => words(state, command),
    }
}

async fn text(state: &AppState, mode: Mode, args: TextArgs) -> anyhow::Result<ExitCode> {
    let input = shobdo_core::preprocess::normalize_input(&args.joined());

    let result = match shobdo_translator::request(state.model.as_ref(), mode, &input).await {
        Ok(result) => result,
        Err(TranslateError::EmptyInput) => {
            eprintln!("Nothing to translate");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            tracing::error!("Translation error: {e}");
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.save {
        let added = result
            .word_meanings
            .iter()
            .filter(|word| state.vocabulary.add(word).is_added())
            .count();
        tracing::info!("Saved {added} of {} words", result.word_meanings.len());
    }

    let saved = saved_flags(state, &result);
    print!("{}", render::translation(mode, &result, &saved));

    Ok(ExitCode::SUCCESS)
}

fn words(state: &AppState, command: WordsCommand) -> anyhow::Result<ExitCode> {
    let vocabulary = &state.vocabulary;

    match command {
        WordsCommand::List { json } => {
            let entries = vocabulary.load();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", render::words(&entries, "", entries.len()));
            }
        }
        WordsCommand::Search { term } => {
            let entries = vocabulary.search(&term);
            print!("{}", render::words(&entries, term.trim(), vocabulary.len()));
        }
        WordsCommand::Add { english, bangla } => {
            let word = shobdo_types::WordMeaning::new(english.trim(), bangla.trim());
            if word.english.is_empty() {
                eprintln!("English word must not be empty");
                return Ok(ExitCode::FAILURE);
            }

            let outcome = vocabulary.add(&word);
            let entry = outcome.entry();
            if outcome.is_added() {
                println!("Added {} : {} ({})", entry.english, entry.bangla, entry.id);
            } else {
                println!("'{}' is already saved ({})", entry.english, entry.id);
            }
        }
        WordsCommand::Remove { id } => {
            if !vocabulary.remove(id) {
                eprintln!("No saved word with id {id}");
                return Ok(ExitCode::FAILURE);
            }
            println!("Deleted word {id}");
        }
        WordsCommand::Clear { yes } => {
            if !yes && !confirm_clear()? {
                println!("Nothing deleted");
                return Ok(ExitCode::SUCCESS);
            }
            vocabulary.clear();
            println!("All saved words deleted");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn confirm_clear() -> anyhow::Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        eprintln!("Refusing to clear without a terminal, pass --yes");
        return Ok(false);
    }

    print!("Are you sure you want to delete all saved words? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}
