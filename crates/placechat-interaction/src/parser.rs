//! Validation of untrusted model output into the structured reply shape.
//!
//! Model output is treated as untrusted input: the parser strips markdown
//! code fences, requires the `message` field, defaults everything else, and
//! ignores fields it does not know so newer model revisions keep parsing.

use thiserror::Error;

use placechat_core::intent::{AssistantReply, MAX_OPTIONS};

/// The model produced text that is not a valid structured reply.
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),
}

/// Parses raw model text into an [`AssistantReply`].
pub struct ResponseParser;

impl ResponseParser {
    /// Attempts to parse model output as a structured reply.
    ///
    /// Accepts the JSON either bare or wrapped in a markdown code fence.
    /// A missing or empty `message` is fatal; all other fields default.
    pub fn parse(raw: &str) -> Result<AssistantReply, ParseError> {
        let candidate = strip_code_fences(raw);
        if candidate.is_empty() {
            return Err(ParseError::MalformedOutput(
                "model returned empty output".to_string(),
            ));
        }

        let mut reply: AssistantReply = serde_json::from_str(candidate)
            .map_err(|e| ParseError::MalformedOutput(e.to_string()))?;

        if reply.message.trim().is_empty() {
            return Err(ParseError::MalformedOutput(
                "required field `message` is empty".to_string(),
            ));
        }

        reply.options.truncate(MAX_OPTIONS);
        Ok(reply)
    }
}

/// Strips a surrounding markdown code fence (``` or ```json) if present.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_json() {
        let reply = ResponseParser::parse(
            r#"{"message": "Want me to search?", "needsConfirmation": true, "searchQuery": "sushi"}"#,
        )
        .unwrap();
        assert_eq!(reply.message, "Want me to search?");
        assert!(reply.needs_confirmation);
        assert_eq!(reply.search_query.as_deref(), Some("sushi"));
    }

    #[test]
    fn test_parses_fenced_json() {
        let raw = "```json\n{\"message\": \"hi\", \"options\": [\"a\", \"b\"]}\n```";
        let reply = ResponseParser::parse(raw).unwrap();
        assert_eq!(reply.message, "hi");
        assert_eq!(reply.options, vec!["a", "b"]);
    }

    #[test]
    fn test_non_json_is_malformed() {
        assert!(matches!(
            ResponseParser::parse("not json"),
            Err(ParseError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_missing_message_is_malformed() {
        assert!(ResponseParser::parse(r#"{"options": ["a"]}"#).is_err());
        assert!(ResponseParser::parse(r#"{"message": "   "}"#).is_err());
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let reply = ResponseParser::parse(
            r#"{"message": "ok", "temperature": 0.2, "model": "gemini"}"#,
        )
        .unwrap();
        assert_eq!(reply.message, "ok");
    }

    #[test]
    fn test_options_are_capped_at_four() {
        let reply = ResponseParser::parse(
            r#"{"message": "ok", "options": ["1", "2", "3", "4", "5", "6"]}"#,
        )
        .unwrap();
        assert_eq!(reply.options.len(), 4);
    }

    #[test]
    fn test_empty_output_is_malformed() {
        assert!(ResponseParser::parse("").is_err());
        assert!(ResponseParser::parse("```\n```").is_err());
    }
}
