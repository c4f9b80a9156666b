//! Mutable per-session conversation state.

use crate::business::BusinessRecord;
use crate::chat::context::{ConversationContext, HISTORY_WINDOW};
use crate::chat::message::ChatMessage;
use crate::intent::Intent;

/// Holds the running chat history, the last search query, the current result
/// snapshot, and the pending-confirmation flag for one session.
///
/// The state is rebuilt from scratch each session start and mutated only by
/// recording messages and applying resolved intents. Invariants:
///
/// - `pending_confirmation` is set true only by [`Intent::AskConfirmation`]
///   and cleared by any `ExecuteSearch`, `ApplySort`, or plain `Chat` that
///   follows. An `Error` intent leaves it untouched so the user can still
///   answer the outstanding confirmation after a retry.
/// - `prior_query` is updated whenever an `ExecuteSearch` is applied, or when
///   the reply explicitly carries a `previousQuery` (see
///   [`ConversationState::set_prior_query`]).
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    history: Vec<ChatMessage>,
    businesses: Vec<BusinessRecord>,
    prior_query: Option<String>,
    pending_confirmation: bool,
}

impl ConversationState {
    /// Creates an empty state for a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message to the history.
    pub fn record_user(&mut self, content: impl Into<String>) {
        self.history.push(ChatMessage::user(content));
    }

    /// Appends an assistant message to the history.
    pub fn record_assistant(&mut self, content: impl Into<String>) {
        self.history.push(ChatMessage::assistant(content));
    }

    /// Replaces the current result snapshot.
    pub fn set_businesses(&mut self, businesses: Vec<BusinessRecord>) {
        self.businesses = businesses;
    }

    /// Explicitly updates the prior query (used when a reply supplies
    /// `previousQuery` on the wire).
    pub fn set_prior_query(&mut self, query: impl Into<String>) {
        self.prior_query = Some(query.into());
    }

    /// Applies a resolved intent to the session flags.
    pub fn apply(&mut self, intent: &Intent) {
        match intent {
            Intent::AskConfirmation { .. } => {
                self.pending_confirmation = true;
            }
            Intent::ExecuteSearch { query } => {
                self.pending_confirmation = false;
                self.prior_query = Some(query.clone());
            }
            Intent::ApplySort { .. } | Intent::Chat { .. } => {
                self.pending_confirmation = false;
            }
            Intent::Error { .. } => {}
        }
    }

    /// Returns the read-only view the intent resolver consumes: the last
    /// [`HISTORY_WINDOW`] messages plus the session flags.
    pub fn context(&self) -> ConversationContext<'_> {
        let start = self.history.len().saturating_sub(HISTORY_WINDOW);
        ConversationContext {
            prior_query: self.prior_query.as_deref(),
            businesses: &self.businesses,
            recent_history: &self.history[start..],
            pending_confirmation: self.pending_confirmation,
        }
    }

    /// Full message history, oldest first.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Current result snapshot.
    pub fn businesses(&self) -> &[BusinessRecord] {
        &self.businesses
    }

    /// The query behind the current result set, if any.
    pub fn prior_query(&self) -> Option<&str> {
        self.prior_query.as_deref()
    }

    /// True when the previous turn asked for confirmation.
    pub fn pending_confirmation(&self) -> bool {
        self.pending_confirmation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business::SortKey;

    #[test]
    fn test_ask_confirmation_sets_pending_flag() {
        let mut state = ConversationState::new();
        state.apply(&Intent::AskConfirmation {
            message: "Search for sushi?".to_string(),
            proposed_query: Some("sushi".to_string()),
            options: vec![],
        });
        assert!(state.pending_confirmation());
    }

    #[test]
    fn test_execute_search_clears_pending_and_updates_prior_query() {
        let mut state = ConversationState::new();
        state.apply(&Intent::AskConfirmation {
            message: "m".to_string(),
            proposed_query: None,
            options: vec![],
        });
        state.apply(&Intent::ExecuteSearch {
            query: "sushi".to_string(),
        });
        assert!(!state.pending_confirmation());
        assert_eq!(state.prior_query(), Some("sushi"));
    }

    #[test]
    fn test_chat_and_sort_clear_pending_flag() {
        for intent in [
            Intent::Chat {
                message: "hi".to_string(),
                options: vec![],
            },
            Intent::ApplySort {
                sort_key: SortKey::Rating,
            },
        ] {
            let mut state = ConversationState::new();
            state.apply(&Intent::AskConfirmation {
                message: "m".to_string(),
                proposed_query: None,
                options: vec![],
            });
            state.apply(&intent);
            assert!(!state.pending_confirmation());
        }
    }

    #[test]
    fn test_error_leaves_pending_flag_untouched() {
        let mut state = ConversationState::new();
        state.apply(&Intent::AskConfirmation {
            message: "m".to_string(),
            proposed_query: None,
            options: vec![],
        });
        state.apply(&Intent::Error {
            message: "search is down".to_string(),
        });
        assert!(state.pending_confirmation());
    }

    #[test]
    fn test_context_windows_history_to_last_six() {
        let mut state = ConversationState::new();
        for i in 0..10 {
            state.record_user(format!("message {i}"));
        }
        let ctx = state.context();
        assert_eq!(ctx.recent_history.len(), HISTORY_WINDOW);
        assert_eq!(ctx.recent_history[0].content, "message 4");
        assert_eq!(state.history().len(), 10);
    }
}
