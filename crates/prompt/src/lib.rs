//! # Prompt
//!
//! Formats retrieved memories, recent journal entries and instructions into the single
//! prompt string sent to the generative model. Everything here is a pure function.
//!
//! ## Format
//!
//! Sections are separated by a blank line and appear in this order; each is omitted
//! entirely when empty:
//!
//! - **System prompt**: verbatim
//! - **Image description**: `Image description: {description}`
//! - **Past interactions**: [`SECTION_PAST_INTERACTIONS`] + one `Previous interaction (...)` line per memory
//! - **Journal**: [`SECTION_JOURNAL`] + one `Journal entry from ...` line per entry
//! - **User**: `User: {message}` (always present)
//!
//! ## Usage
//!
//! Used by the `memory` crate's `ContextAssembler` and by the runtime for the emotion and
//! image prompts.

mod templates;

pub use templates::{
    ADHD_TEMPLATE, ASD_TEMPLATE, DEFAULT_SYSTEM_PROMPT, DYSLEXIA_TEMPLATE, SPEECH_DELAY_TEMPLATE,
};

use chrono::{DateTime, NaiveDateTime};

/// Section title for semantically retrieved past interactions.
pub const SECTION_PAST_INTERACTIONS: &str = "Context from past interactions:";

/// Section title for the most recent journal entries.
pub const SECTION_JOURNAL: &str = "Recent journal entries:";

/// Instruction sent together with an image to obtain its description.
pub const IMAGE_DESCRIPTION_PROMPT: &str = "Describe this image:";

/// Display format for memory timestamps, e.g. `June 01, 2024 at 02:05 PM`.
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%B %d, %Y at %I:%M %p";

/// Inputs of [`format_assistant_prompt`]. Lines are already rendered with
/// [`past_interaction_line`] and [`journal_line`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptSections {
    pub system_prompt: String,
    pub image_description: Option<String>,
    pub past_interactions: Vec<String>,
    pub journal_entries: Vec<String>,
    pub user_message: String,
}

/// Builds the assistant prompt from its sections.
pub fn format_assistant_prompt(sections: &PromptSections) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(5);

    if !sections.system_prompt.is_empty() {
        parts.push(sections.system_prompt.clone());
    }
    if let Some(description) = sections
        .image_description
        .as_deref()
        .filter(|d| !d.is_empty())
    {
        parts.push(format!("Image description: {}", description));
    }
    if !sections.past_interactions.is_empty() {
        parts.push(format!(
            "{}\n{}",
            SECTION_PAST_INTERACTIONS,
            sections.past_interactions.join("\n")
        ));
    }
    if !sections.journal_entries.is_empty() {
        parts.push(format!(
            "{}\n{}",
            SECTION_JOURNAL,
            sections.journal_entries.join("\n")
        ));
    }
    parts.push(format!("User: {}", sections.user_message));

    parts.join("\n\n")
}

/// `Previous interaction ({formatted timestamp}): {text}`
pub fn past_interaction_line(timestamp: &str, text: &str) -> String {
    format!("Previous interaction ({}): {}", format_timestamp(timestamp), text)
}

/// `Journal entry from {date}: {content}`
pub fn journal_line(date: &str, content: &str) -> String {
    format!("Journal entry from {}: {}", date, content)
}

/// Document stored as memory after a chat turn: both sides of the round-trip.
pub fn interaction_memory_text(message: &str, response: &str) -> String {
    format!("User: {}\nAssistant: {}", message, response)
}

/// Renders an ISO-8601 timestamp as `Month DD, YYYY at HH:MM AM/PM`.
///
/// Accepts RFC 3339 (with offset) or a naive `YYYY-MM-DDTHH:MM:SS[.f]` value and uses the
/// wall-clock fields as written, without converting time zones. Input that parses as neither
/// is returned unchanged.
pub fn format_timestamp(iso: &str) -> String {
    let iso = iso.trim();
    let naive = DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%d %H:%M:%S%.f"));

    match naive {
        Ok(dt) => dt.format(TIMESTAMP_DISPLAY_FORMAT).to_string(),
        Err(_) => iso.to_string(),
    }
}

/// One-shot instruction asking for a short, name-aware summary of the writer's emotional state.
pub fn emotion_analysis_prompt(journal_text: &str) -> String {
    format!(
        "Analyze the emotional state of the person mentioned in this journal entry.\n\
         Look for mentions of their name, and refer to them by name if available.\n\
         If no name is mentioned, use neutral terms like \"the person\" or \"they\".\n\
         \n\
         Give a brief, empathetic summary of their emotional state, activities, and mood.\n\
         Be conversational but insightful. Keep it to 2-3 sentences.\n\
         \n\
         Journal entry: {}",
        journal_text
    )
}
