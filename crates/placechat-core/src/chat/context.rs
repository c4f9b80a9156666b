//! Read-only conversation context consumed by the intent resolver.

use crate::business::BusinessRecord;
use crate::chat::message::ChatMessage;

/// How many of the most recent messages are exposed to the resolver (and
/// embedded into the model prompt).
pub const HISTORY_WINDOW: usize = 6;

/// A borrowed snapshot of the session handed to the intent resolver.
///
/// The resolver never mutates state; it reads the prior query, the current
/// result set, the recent history window, and the pending-confirmation flag,
/// and produces a canonical intent from them.
#[derive(Debug, Clone, Copy)]
pub struct ConversationContext<'a> {
    /// The query behind the current result set, if a search has run.
    pub prior_query: Option<&'a str>,
    /// Current result snapshot (read-only; may be empty).
    pub businesses: &'a [BusinessRecord],
    /// The last [`HISTORY_WINDOW`] messages, oldest first.
    pub recent_history: &'a [ChatMessage],
    /// True when the previous turn asked the user to confirm a search.
    pub pending_confirmation: bool,
}

impl<'a> ConversationContext<'a> {
    /// True once at least one search has produced results.
    pub fn has_results(&self) -> bool {
        !self.businesses.is_empty()
    }
}
