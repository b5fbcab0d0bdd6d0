pub mod conversation;
pub mod snippet;

pub use conversation::{Conversation, ConversationNotFound};
pub use snippet::{decode_snippets_metadata, filter_raw_snippets, parse_snippets_metadata, Snippet};
