//! wordplay CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wordplay_core::quiz::QuizDirection;

mod commands;

#[derive(Parser)]
#[command(
    name = "wordplay",
    version,
    about = "Vocabulary word books, quizzes, and matching games"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Word book data file (overrides the config and WORDPLAY_DATA_FILE)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter wordplay.toml
    Init,

    /// Manage word books
    Book {
        #[command(subcommand)]
        action: BookAction,
    },

    /// Manage the words of a book
    Word {
        /// Word book to use (default: the selected book)
        #[arg(long, global = true)]
        book: Option<String>,

        #[command(subcommand)]
        action: WordAction,
    },

    /// Multiple-choice quiz
    Quiz {
        /// Word book to use (default: the selected book)
        #[arg(long)]
        book: Option<String>,

        /// meaning-to-word (m2w) or word-to-meaning (w2m)
        #[arg(long)]
        direction: Option<QuizDirection>,

        /// Only quiz the weak words
        #[arg(long, conflicts_with = "words")]
        weak: bool,

        /// Only quiz these words (comma-separated)
        #[arg(long, value_delimiter = ',')]
        words: Option<Vec<String>>,
    },

    /// Pair-matching game
    Match {
        /// Word book to use (default: the selected book)
        #[arg(long)]
        book: Option<String>,
    },

    /// Show learning statistics
    Stats {
        /// Word book to use (default: the selected book)
        #[arg(long)]
        book: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export learning statistics to a file
    Export {
        /// Word book to use (default: the selected book)
        #[arg(long)]
        book: Option<String>,

        /// Output file (default: <book>_stats_<date>.txt)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum BookAction {
    /// Create an empty word book
    Create { name: String },
    /// Delete a word book and all its words
    Delete { name: String },
    /// Rename a word book
    Rename { old_name: String, new_name: String },
    /// Make a word book the default for other commands
    Select { name: String },
    /// List word books
    List,
}

#[derive(Subcommand)]
enum WordAction {
    /// Add a word and its meaning
    Add { word: String, meaning: String },
    /// Remove a word
    Remove { word: String },
    /// Change the meaning of a word
    Update { word: String, meaning: String },
    /// List every word with its counters
    List,
    /// Show one word
    Show { word: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let data = cli.data;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Book { action } => {
            let action = match action {
                BookAction::Create { name } => commands::book::Action::Create(name),
                BookAction::Delete { name } => commands::book::Action::Delete(name),
                BookAction::Rename { old_name, new_name } => {
                    commands::book::Action::Rename(old_name, new_name)
                }
                BookAction::Select { name } => commands::book::Action::Select(name),
                BookAction::List => commands::book::Action::List,
            };
            commands::book::execute(action, config, data)
        }
        Commands::Word { book, action } => {
            let action = match action {
                WordAction::Add { word, meaning } => commands::word::Action::Add(word, meaning),
                WordAction::Remove { word } => commands::word::Action::Remove(word),
                WordAction::Update { word, meaning } => {
                    commands::word::Action::Update(word, meaning)
                }
                WordAction::List => commands::word::Action::List,
                WordAction::Show { word } => commands::word::Action::Show(word),
            };
            commands::word::execute(action, book, config, data)
        }
        Commands::Quiz {
            book,
            direction,
            weak,
            words,
        } => commands::quiz::execute(book, direction, weak, words, config, data),
        Commands::Match { book } => commands::play::execute(book, config, data),
        Commands::Stats { book, format } => commands::stats::execute(book, format, config, data),
        Commands::Export {
            book,
            output,
            format,
            force,
        } => commands::export::execute(book, output, format, force, config, data),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
