//! Canonical intents and the assistant reply wire shape.
//!
//! `AssistantReply` is the single JSON contract used three ways: it is what
//! the caller receives, what the model is asked to emit, and what the
//! fallback rule engine produces. `Intent` is the normalized decision both
//! paths converge to: exactly one variant per utterance.

use serde::{Deserialize, Serialize};

use crate::business::SortKey;

/// Upper bound on follow-up options surfaced to the caller.
pub const MAX_OPTIONS: usize = 4;

/// The canonical decision produced for one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Intent {
    /// Continue the conversation; no side effect.
    Chat {
        message: String,
        options: Vec<String>,
    },
    /// Propose a search and wait for explicit user confirmation.
    AskConfirmation {
        message: String,
        proposed_query: Option<String>,
        options: Vec<String>,
    },
    /// Execute a search immediately.
    ExecuteSearch { query: String },
    /// Reorder the existing result set; no new search.
    ApplySort { sort_key: SortKey },
    /// Upstream failure surfaced as a chat message with a retry option.
    Error { message: String },
}

/// The structured reply exchanged with the caller and requested from the
/// model (camelCase on the wire).
///
/// Deserialization is strict-but-forgiving: `message` is required, every
/// other field defaults to absent/false, and unknown fields are ignored so
/// newer model outputs keep parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    /// The conversational message shown to the user. Required.
    pub message: String,
    /// Suggested follow-up options (0 to [`MAX_OPTIONS`] entries).
    #[serde(default)]
    pub options: Vec<String>,
    /// A search the assistant proposes but has not been told to run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    /// True when the assistant wants explicit confirmation before searching.
    #[serde(default)]
    pub needs_confirmation: bool,
    /// A search the assistant has decided to run right away.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_search: Option<String>,
    /// Explicit carry-over of the query behind the current results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_query: Option<String>,
    /// Side-channel action directive; currently only "sort" is understood.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Wire-format sort key accompanying `action == "sort"`. Kept as a raw
    /// string so unknown keys degrade to a no-op instead of a parse failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}

impl AssistantReply {
    /// Creates a plain chat reply.
    pub fn chat(message: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            message: message.into(),
            options,
            ..Self::default()
        }
    }

    /// The sort key requested by this reply, if `action == "sort"` carries a
    /// recognized key.
    pub fn requested_sort(&self) -> Option<SortKey> {
        if self.action.as_deref() != Some("sort") {
            return None;
        }
        self.sort_by.as_deref().and_then(SortKey::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_deserializes_with_defaults() {
        let reply: AssistantReply =
            serde_json::from_str(r#"{"message": "Hi there"}"#).unwrap();
        assert_eq!(reply.message, "Hi there");
        assert!(reply.options.is_empty());
        assert!(!reply.needs_confirmation);
        assert!(reply.search_query.is_none());
        assert!(reply.confirmed_search.is_none());
    }

    #[test]
    fn test_reply_missing_message_is_an_error() {
        let result = serde_json::from_str::<AssistantReply>(r#"{"options": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_reply_ignores_unknown_fields() {
        let reply: AssistantReply = serde_json::from_str(
            r#"{"message": "ok", "confidence": 0.9, "chainOfThought": "…"}"#,
        )
        .unwrap();
        assert_eq!(reply.message, "ok");
    }

    #[test]
    fn test_requested_sort_requires_sort_action() {
        let mut reply = AssistantReply::chat("ok", vec![]);
        reply.sort_by = Some("rating".to_string());
        assert_eq!(reply.requested_sort(), None);

        reply.action = Some("sort".to_string());
        assert_eq!(reply.requested_sort(), Some(SortKey::Rating));

        reply.sort_by = Some("popularity".to_string());
        assert_eq!(reply.requested_sort(), None);
    }

    #[test]
    fn test_intent_serde_round_trip() {
        let intent = Intent::AskConfirmation {
            message: "Search for sushi?".to_string(),
            proposed_query: Some("sushi".to_string()),
            options: vec!["Yes, search".to_string()],
        };
        let json = serde_json::to_string(&intent).unwrap();
        let back: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, intent);
    }
}
