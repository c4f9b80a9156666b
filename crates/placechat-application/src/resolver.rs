//! Intent resolution: model path first, rule fallback always.
//!
//! The resolver owns the only suspension point of a turn (the gateway call).
//! Every failure along the model path (unconfigured gateway, transport or
//! timeout errors, unparseable output) degrades to the deterministic rule
//! engine for the same turn; the next turn tries the model again.

use std::sync::Arc;

use placechat_core::chat::ConversationContext;
use placechat_core::gateway::ModelGateway;
use placechat_core::intent::{AssistantReply, Intent};
use placechat_interaction::parser::ResponseParser;

use crate::fallback::FallbackRuleEngine;
use crate::prompt::build_prompt;

/// The outcome of resolving one utterance: the canonical intent plus the raw
/// reply it was normalized from (the reply carries side-channel hints such as
/// `previousQuery` that the intent deliberately does not).
#[derive(Debug, Clone)]
pub struct Resolution {
    pub intent: Intent,
    pub reply: AssistantReply,
}

/// Turns an utterance plus conversation context into a canonical [`Intent`].
pub struct IntentResolver {
    gateway: Option<Arc<dyn ModelGateway>>,
}

impl IntentResolver {
    /// Creates a resolver backed by the given gateway, or none at all.
    pub fn new(gateway: Option<Arc<dyn ModelGateway>>) -> Self {
        Self { gateway }
    }

    /// Creates a resolver that always uses the rule fallback.
    pub fn without_model() -> Self {
        Self { gateway: None }
    }

    /// Resolves one utterance. `is_confirmation` marks the turn as the
    /// user's answer to a prior confirmation request.
    pub async fn resolve(
        &self,
        utterance: &str,
        context: &ConversationContext<'_>,
        is_confirmation: bool,
    ) -> Resolution {
        let reply = match &self.gateway {
            None => {
                tracing::debug!("model gateway unconfigured; using rule fallback");
                FallbackRuleEngine::respond(utterance, context)
            }
            Some(gateway) => {
                let prompt = build_prompt(utterance, context);
                match gateway.generate(&prompt).await {
                    Ok(raw) => match ResponseParser::parse(&raw) {
                        Ok(reply) => reply,
                        Err(err) => {
                            tracing::warn!(error = %err, "model output unparseable; using rule fallback");
                            FallbackRuleEngine::respond(utterance, context)
                        }
                    },
                    Err(err) => {
                        tracing::warn!(error = %err, "model call failed; using rule fallback");
                        FallbackRuleEngine::respond(utterance, context)
                    }
                }
            }
        };

        let intent = normalize(&reply, is_confirmation);
        Resolution { intent, reply }
    }
}

/// Normalizes a reply (model or fallback) into exactly one intent variant.
///
/// Priority order matters: a confirmed search always wins, then a confirmed
/// proposal, then a confirmation request, then a sort directive. A search and
/// a sort signaled together resolve to the search.
pub fn normalize(reply: &AssistantReply, is_confirmation: bool) -> Intent {
    if let Some(query) = &reply.confirmed_search {
        return Intent::ExecuteSearch {
            query: query.clone(),
        };
    }

    if is_confirmation {
        if let Some(query) = &reply.search_query {
            return Intent::ExecuteSearch {
                query: query.clone(),
            };
        }
    }

    if reply.needs_confirmation {
        return Intent::AskConfirmation {
            message: reply.message.clone(),
            proposed_query: reply.search_query.clone(),
            options: reply.options.clone(),
        };
    }

    if let Some(sort_key) = reply.requested_sort() {
        return Intent::ApplySort { sort_key };
    }

    Intent::Chat {
        message: reply.message.clone(),
        options: reply.options.clone(),
    }
}
