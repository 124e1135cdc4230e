//! Command handlers. Output goes to stdout; logs go to the log file.

use anyhow::{Context, Result};
use llm_client::ImageInput;
use memoir_runtime::{AppState, Assistant};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::cli::{Commands, JournalCommand, MemoryCommand, SettingsCommand};

pub async fn run(command: Commands, assistant: &Assistant) -> Result<()> {
    let mut state = AppState::new();
    match command {
        Commands::Chat { image } => handle_chat(assistant, &mut state, image).await,
        Commands::Ask {
            message,
            chat_id,
            image,
        } => handle_ask(assistant, &mut state, &message, chat_id, image).await,
        Commands::Journal { command } => handle_journal(assistant, &mut state, command).await,
        Commands::History => handle_history(assistant).await,
        Commands::Settings { command } => handle_settings(assistant, command).await,
        Commands::Memory { command } => handle_memory(assistant, &mut state, command).await,
    }
}

async fn load_image(path: &Path) -> Result<ImageInput> {
    ImageInput::from_path(path)
        .await
        .with_context(|| format!("Load image {}", path.display()))
}

async fn handle_ask(
    assistant: &Assistant,
    state: &mut AppState,
    message: &str,
    chat_id: Option<String>,
    image: Option<PathBuf>,
) -> Result<()> {
    match chat_id {
        Some(id) => {
            assistant.load_chat(state, &id).await?;
        }
        None => {
            assistant.new_chat(state).await?;
        }
    }
    if let Some(path) = image {
        state.pending_image = Some(load_image(&path).await?);
    }

    let response = assistant.send_message(state, message).await?;
    println!("{}", response);
    if let Some(id) = &state.current_chat_id {
        println!("\n(chat {})", id);
    }
    Ok(())
}

enum ReplInput<'a> {
    Quit,
    New,
    History,
    Load(&'a str),
    Image(&'a str),
    Message(&'a str),
    Empty,
    Unknown(&'a str),
}

fn parse_repl_line(line: &str) -> ReplInput<'_> {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return ReplInput::Message(line);
    };
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name {
        "quit" | "exit" => ReplInput::Quit,
        "new" => ReplInput::New,
        "history" => ReplInput::History,
        "load" if !arg.is_empty() => ReplInput::Load(arg),
        "image" if !arg.is_empty() => ReplInput::Image(arg),
        _ => ReplInput::Unknown(line),
    }
}

async fn handle_chat(
    assistant: &Assistant,
    state: &mut AppState,
    image: Option<PathBuf>,
) -> Result<()> {
    assistant.new_chat(state).await?;
    if let Some(path) = image {
        state.pending_image = Some(load_image(&path).await?);
    }
    println!("memoir chat. /new, /image PATH, /history, /load ID, /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_repl_line(&line) {
            ReplInput::Quit => break,
            ReplInput::Empty => {}
            ReplInput::New => {
                let id = assistant.new_chat(state).await?;
                println!("Started chat {}", id);
            }
            ReplInput::History => handle_history(assistant).await?,
            ReplInput::Load(id) => match assistant.load_chat(state, id).await {
                Ok(conversation) => {
                    println!("Loaded \"{}\"", conversation.display_title());
                    for (user, reply) in &conversation.messages {
                        println!("You: {}\nAssistant: {}", user, reply);
                    }
                }
                Err(e) => println!("Error: {}", e),
            },
            ReplInput::Image(path) => match load_image(Path::new(path)).await {
                Ok(image) => {
                    state.pending_image = Some(image);
                    println!("Image attached to your next message.");
                }
                Err(e) => println!("Error: {:#}", e),
            },
            ReplInput::Unknown(line) => println!("Unknown command: {}", line),
            ReplInput::Message(message) => match assistant.send_message(state, message).await {
                Ok(response) => println!("Assistant: {}", response),
                Err(e) => println!("Error: {}", e),
            },
        }
    }
    info!("chat session ended");
    Ok(())
}

async fn handle_history(assistant: &Assistant) -> Result<()> {
    let conversations = assistant.conversations().await?;
    if conversations.is_empty() {
        println!("No chat history yet.");
        return Ok(());
    }
    for c in conversations {
        println!(
            "{}  {}  ({} messages)  {}",
            c.id, c.timestamp, c.message_count, c.title
        );
    }
    Ok(())
}

async fn handle_journal(
    assistant: &Assistant,
    state: &mut AppState,
    command: JournalCommand,
) -> Result<()> {
    match command {
        JournalCommand::Add { content, analyze } => {
            let analysis = if analyze {
                let analysis = assistant.analyze_emotion(&content).await?;
                println!("Emotion analysis: {}", analysis);
                Some(analysis)
            } else {
                None
            };
            let entry = assistant.save_journal_entry(&content, analysis).await?;
            println!("Journal entry saved: {}", entry.id);
        }
        JournalCommand::List { all } => {
            let days = assistant.journal_by_day().await?;
            if days.is_empty() {
                println!("No journal entries yet.");
                return Ok(());
            }
            if all {
                state.toggle_all(days.iter().flat_map(|d| d.entries.iter().map(|e| e.id.clone())));
            }
            for day in days {
                let marker = if day.is_today { " (today)" } else { "" };
                println!("== Entries for {}{} ==", day.date, marker);
                for entry in day.entries {
                    println!("[{}] {}", entry.id, entry.time);
                    if state.is_expanded(&entry.id) {
                        println!("{}", entry.content);
                        if let Some(analysis) = &entry.emotion_analysis {
                            println!("Emotion analysis: {}", analysis);
                        }
                    } else {
                        println!("Preview: {}", entry.preview());
                    }
                    println!();
                }
            }
        }
        JournalCommand::Edit { id, content } => {
            let entry = assistant.update_journal_entry(&id, &content).await?;
            println!("Journal entry updated: {}", entry.id);
        }
        JournalCommand::Delete { id } => {
            if assistant.delete_journal_entry(state, &id).await? {
                println!("Journal entry deleted.");
            } else {
                println!("No journal entry {}", id);
            }
        }
        JournalCommand::Analyze { id, save } => {
            let analysis = assistant.analyze_journal_entry(state, &id).await?;
            println!("Emotion analysis: {}", analysis);
            if save && assistant.save_pending_analysis(state, &id).await?.is_some() {
                println!("Emotion analysis saved.");
            }
        }
        JournalCommand::SetAnalysis { id, analysis } => {
            let entry = assistant.set_emotion_analysis(&id, analysis).await?;
            match entry.emotion_analysis {
                Some(_) => println!("Emotion analysis saved."),
                None => println!("Emotion analysis cleared."),
            }
        }
    }
    Ok(())
}

async fn handle_settings(assistant: &Assistant, command: SettingsCommand) -> Result<()> {
    let settings = match command {
        SettingsCommand::Show => assistant.settings().await,
        SettingsCommand::UserType { user_type } => assistant.set_user_type(user_type).await?,
        SettingsCommand::Disability { disability } => {
            assistant.set_disability_type(disability).await?
        }
        SettingsCommand::Prompt { prompt } => assistant.set_system_prompt(&prompt).await?,
    };
    println!("User type: {}", settings.user_type);
    if let Some(disability) = settings.disability_type {
        println!("Disability type: {}", disability.as_str());
    }
    println!("System prompt:\n{}", settings.system_prompt);
    Ok(())
}

async fn handle_memory(
    assistant: &Assistant,
    state: &mut AppState,
    command: MemoryCommand,
) -> Result<()> {
    match command {
        MemoryCommand::Search { query, k } => {
            let hits = assistant.search_memories(&query, k).await;
            if hits.is_empty() {
                println!("No memories found.");
            }
            for hit in hits {
                println!(
                    "{:.4}  {}  {}  {}\n{}\n",
                    hit.distance,
                    hit.kind,
                    hit.id,
                    prompt::format_timestamp(&hit.timestamp),
                    hit.text
                );
            }
        }
        MemoryCommand::Stats => {
            let memory = assistant.memory();
            println!(
                "Collection: {}\nMemories: {}",
                memory.store().collection(),
                memory.count().await
            );
        }
        MemoryCommand::Clear { yes } => {
            if !yes {
                anyhow::bail!("This deletes every memory, conversation and journal entry. Re-run with --yes to confirm.");
            }
            if assistant.delete_all_memory(state).await? {
                println!("All memories have been deleted.");
            } else {
                println!("Failed to delete memories.");
            }
        }
    }
    Ok(())
}
