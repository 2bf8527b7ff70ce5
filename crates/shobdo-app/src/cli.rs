use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Check English grammar, translate to Bangla and keep a personal word list
#[derive(Parser, Debug)]
#[command(name = "shobdo", version, about)]
pub struct Cli {
    /// JSON config file, environment variables are used when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage file holding the word list
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Keep the word list in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Gemini model name
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate English text to Bangla with word meanings
    Translate(TextArgs),
    /// Check text for mistakes, then translate the corrected sentence
    Correct(TextArgs),
    /// Manage saved words
    #[command(subcommand)]
    Words(WordsCommand),
}

#[derive(Args, Debug)]
pub struct TextArgs {
    /// Text to send, words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Save every returned word meaning to the word list
    #[arg(long)]
    pub save: bool,
}

impl TextArgs {
    pub fn joined(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Subcommand, Debug)]
pub enum WordsCommand {
    /// Show all saved words
    List {
        /// Print the raw JSON array
        #[arg(long)]
        json: bool,
    },
    /// Find words by English or Bangla substring
    Search { term: String },
    /// Save a word pair
    Add { english: String, bangla: String },
    /// Delete a saved word by id
    Remove { id: i64 },
    /// Delete all saved words
    Clear {
        /// Skip the confirmation question
        #[arg(long, short)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_translate() {
        let cli = Cli::parse_from(["shobdo", "--ephemeral", "translate", "I", "love", "books"]);

        assert!(cli.ephemeral);
        match cli.command {
            Some(Command::Translate(args)) => {
                assert_eq!(args.joined(), "I love books");
                assert!(!args.save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_words_remove() {
        let cli = Cli::parse_from(["shobdo", "words", "remove", "1717000000000"]);

        assert!(matches!(
            cli.command,
            Some(Command::Words(WordsCommand::Remove { id: 1_717_000_000_000 }))
        ));
    }

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = Cli::parse_from(["shobdo", "--model", "gemini-pro"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.model.as_deref(), Some("gemini-pro"));
    }
}
