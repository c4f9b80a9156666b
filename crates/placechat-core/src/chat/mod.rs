//! Conversation types: messages, context views, and per-session state.
//!
//! # Module Structure
//!
//! - `message`: chat message and role types
//! - `context`: the read-only view the intent resolver consumes
//! - `state`: the mutable per-session conversation state

pub mod context;
pub mod message;
pub mod state;

// Re-export public API
pub use context::{ConversationContext, HISTORY_WINDOW};
pub use message::{ChatMessage, MessageRole};
pub use state::ConversationState;
