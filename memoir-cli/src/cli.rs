//! CLI parser.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storage::{DisabilityType, UserType};

#[derive(Parser, Debug)]
#[command(name = "memoir")]
#[command(about = "Memory-enabled assistant: chat, journal and long-term memory", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (overrides MEMOIR_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat (/new, /image PATH, /history, /load ID, /quit).
    Chat {
        /// Image attached to the first message
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Send one message and print the answer.
    Ask {
        message: String,
        /// Continue this conversation instead of starting a new one
        #[arg(long)]
        chat_id: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Manage journal entries.
    Journal {
        #[command(subcommand)]
        command: JournalCommand,
    },
    /// List conversations, most recent first.
    History,
    /// Show or change user settings.
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    /// Inspect or wipe long-term memory.
    Memory {
        #[command(subcommand)]
        command: MemoryCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum JournalCommand {
    /// Save a new entry.
    Add {
        content: String,
        /// Analyse the entry's emotions and save the analysis with it
        #[arg(long)]
        analyze: bool,
    },
    /// List entries grouped by day.
    List {
        /// Show full content instead of previews
        #[arg(long)]
        all: bool,
    },
    /// Replace an entry's content.
    Edit { id: String, content: String },
    /// Delete an entry and its memory.
    Delete { id: String },
    /// Analyse an entry's emotions.
    Analyze {
        id: String,
        /// Save the analysis on the entry
        #[arg(long)]
        save: bool,
    },
    /// Set the saved analysis of an entry; without text it is cleared.
    SetAnalysis { id: String, analysis: Option<String> },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    Show,
    /// Regular, "Specially Abled" or Personalized.
    UserType { user_type: UserType },
    /// ASD, ADHD, Dyslexia or Speech_Delay; loads the matching system prompt.
    Disability { disability: DisabilityType },
    /// Replace the system prompt (Personalized and Specially Abled only).
    Prompt { prompt: String },
}

#[derive(Subcommand, Debug)]
pub enum MemoryCommand {
    /// Memories most similar to a query.
    Search {
        query: String,
        #[arg(short, default_value = "3")]
        k: usize,
    },
    /// Number of stored memories.
    Stats,
    /// Delete every memory, conversation and journal entry.
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}
