//! Per-session turn orchestration.
//!
//! One utterance is resolved to completion before the next is accepted: the
//! session state sits behind a mutex and a second utterance arriving while a
//! turn is in flight is rejected with [`PlacechatError::TurnInProgress`]
//! (the UI disables input while a turn is pending, so this only fires on
//! misbehaving callers). Dropping the returned future before it completes
//! discards the in-flight model result; the user message is already in the
//! history at that point, but no intent is applied and no reply is recorded.

use tokio::sync::Mutex;

use placechat_core::business::BusinessRecord;
use placechat_core::chat::{ChatMessage, ConversationState};
use placechat_core::error::PlacechatError;
use placechat_core::intent::Intent;

use crate::dispatch::{SearchDispatchPolicy, TurnOutcome};
use crate::resolver::IntentResolver;

/// Owns one conversation session end to end: state, resolution, dispatch.
pub struct ChatTurnUsecase {
    session_id: String,
    state: Mutex<ConversationState>,
    resolver: IntentResolver,
    dispatch: SearchDispatchPolicy,
}

impl ChatTurnUsecase {
    /// Creates a fresh session with empty conversation state.
    pub fn new(resolver: IntentResolver, dispatch: SearchDispatchPolicy) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            state: Mutex::new(ConversationState::new()),
            resolver,
            dispatch,
        }
    }

    /// Returns the session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Processes one user utterance and returns what to surface to the
    /// caller.
    ///
    /// `is_confirmation` marks the turn as the user's answer to a prior
    /// confirmation request (the caller knows because it rendered the
    /// confirmation UI).
    ///
    /// # Errors
    ///
    /// - [`PlacechatError::InvalidUtterance`] for empty/whitespace input,
    ///   rejected before any state change.
    /// - [`PlacechatError::TurnInProgress`] when a turn is already running.
    pub async fn handle_utterance(
        &self,
        utterance: &str,
        is_confirmation: bool,
    ) -> Result<TurnOutcome, PlacechatError> {
        let trimmed = utterance.trim();
        if trimmed.is_empty() {
            return Err(PlacechatError::InvalidUtterance);
        }

        let mut state = self
            .state
            .try_lock()
            .map_err(|_| PlacechatError::TurnInProgress)?;

        state.record_user(trimmed);

        let resolution = {
            let context = state.context();
            self.resolver.resolve(trimmed, &context, is_confirmation).await
        };

        tracing::debug!(
            session_id = %self.session_id,
            intent = ?resolution.intent,
            "utterance resolved"
        );

        // Explicit previousQuery on the wire updates the prior query even
        // when no search runs this turn.
        if let Some(previous) = resolution.reply.previous_query.clone() {
            state.set_prior_query(previous);
        }

        let outcome = self
            .dispatch
            .dispatch(&resolution.intent, state.businesses())
            .await;

        match &resolution.intent {
            // A failed search must not mutate prior_query or the flags.
            Intent::ExecuteSearch { .. } if outcome.search_failed => {}
            intent => state.apply(intent),
        }

        if let Some(businesses) = &outcome.businesses {
            state.set_businesses(businesses.clone());
        }

        state.record_assistant(&outcome.message);
        Ok(outcome)
    }

    /// Full message history, oldest first.
    pub async fn history(&self) -> Vec<ChatMessage> {
        self.state.lock().await.history().to_vec()
    }

    /// Current result snapshot.
    pub async fn businesses(&self) -> Vec<BusinessRecord> {
        self.state.lock().await.businesses().to_vec()
    }

    /// The query behind the current results, if any.
    pub async fn prior_query(&self) -> Option<String> {
        self.state.lock().await.prior_query().map(str::to_string)
    }

    /// True when the previous turn asked the user to confirm a search.
    pub async fn pending_confirmation(&self) -> bool {
        self.state.lock().await.pending_confirmation()
    }
}
