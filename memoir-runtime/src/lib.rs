//! memoir runtime: session state, the generative responder, emotion analysis and the
//! [`Assistant`] service the CLI drives.

pub mod assistant;
pub mod components;
pub mod emotion;
pub mod responder;
pub mod state;

pub use assistant::{Assistant, ConversationSummary, JournalDay};
pub use components::{
    build_assistant, create_embedding_service, create_llm_client, create_vector_store,
    initialize_assistant,
};
pub use emotion::EmotionAnalyzer;
pub use responder::{GenerativeResponder, IMAGE_ERROR_PREFIX};
pub use state::AppState;
