pub mod models;

// Re-export commonly used types
pub use models::{
    decode_snippets_metadata, filter_raw_snippets, parse_snippets_metadata, Conversation,
    ConversationNotFound, Snippet,
};
