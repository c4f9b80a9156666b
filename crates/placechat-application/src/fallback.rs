//! Deterministic keyword-based intent resolution.
//!
//! This is the availability backstop: whenever the generative model is
//! unconfigured, fails, or returns unparseable output, the rule engine
//! produces a usable, forward-progressing reply from the utterance and the
//! conversation context alone. It is a pure function of its inputs.

use placechat_core::chat::ConversationContext;
use placechat_core::intent::AssistantReply;

/// The rule-based substitute for the model path.
///
/// Rules are evaluated in precedence order; the first match wins:
/// 1. With prior results: refinement phrases ("higher rated", "closer",
///    "different", "recommend") map to confirmed or proposed searches.
/// 2. Without results: greeting/small-talk phrases get canned replies.
/// 3. Anything else becomes a confirmation request echoing the utterance
///    back as a proposed search.
pub struct FallbackRuleEngine;

impl FallbackRuleEngine {
    /// Resolves an utterance against the context. Pure and stateless.
    pub fn respond(utterance: &str, context: &ConversationContext<'_>) -> AssistantReply {
        let trimmed = utterance.trim();
        let lower = trimmed.to_lowercase();

        if context.has_results() {
            if let Some(reply) = Self::refinement_reply(&lower, context) {
                return reply;
            }
        } else if let Some(reply) = Self::small_talk_reply(&lower) {
            return reply;
        }

        Self::proposed_search_reply(trimmed)
    }

    /// Rules that refine an existing result set.
    fn refinement_reply(
        lower: &str,
        context: &ConversationContext<'_>,
    ) -> Option<AssistantReply> {
        let subject = context.prior_query.unwrap_or("businesses");

        if contains_any(lower, &["higher rated", "better", "top rated"]) {
            return Some(AssistantReply {
                message: format!("Let me find the best rated {subject} for you."),
                options: vec![
                    "Only show 4+ stars".to_string(),
                    "Keep them close to me".to_string(),
                    "Something different instead".to_string(),
                ],
                confirmed_search: Some(format!("best rated {subject}")),
                ..AssistantReply::default()
            });
        }

        if contains_any(lower, &["closer", "nearby", "near me"]) {
            return Some(AssistantReply {
                message: format!("Looking for {subject} right around you."),
                options: vec![
                    "Are there any good deals nearby?".to_string(),
                    "Any popular spots?".to_string(),
                    "Places within walking distance".to_string(),
                ],
                confirmed_search: Some(format!("{subject} very close to me")),
                ..AssistantReply::default()
            });
        }

        if contains_any(lower, &["different", "something else"]) {
            return Some(AssistantReply::chat(
                "Sure — what kind of place are you in the mood for instead?",
                vec![
                    "Restaurants".to_string(),
                    "Coffee shops".to_string(),
                    "Gyms".to_string(),
                    "Salons".to_string(),
                ],
            ));
        }

        if contains_any(lower, &["recommend", "suggestion"]) {
            return Some(AssistantReply {
                message: format!(
                    "I can pull up the most recommended {subject} around you. Want me to?"
                ),
                options: vec![
                    "Yes, show recommendations".to_string(),
                    "No, something different".to_string(),
                ],
                search_query: Some(format!("top recommended {subject}")),
                needs_confirmation: true,
                ..AssistantReply::default()
            });
        }

        None
    }

    /// Greeting and small-talk rules, applied only before any search has run.
    fn small_talk_reply(lower: &str) -> Option<AssistantReply> {
        // Short greetings match as standalone words so queries like
        // "sushi in this area" don't trip the "hi" rule.
        if contains_word(lower, &["hello", "hi", "hey"]) {
            return Some(AssistantReply::chat(
                "Hi! I can help you find businesses near you. What are you looking for?",
                vec![
                    "Find a restaurant".to_string(),
                    "Find a coffee shop".to_string(),
                    "Find a plumber".to_string(),
                    "Find a gym".to_string(),
                ],
            ));
        }

        if lower.contains("how are you") {
            return Some(AssistantReply::chat(
                "Doing great, thanks for asking! Tell me what you need and I'll find it nearby.",
                vec![
                    "Find food nearby".to_string(),
                    "Find services nearby".to_string(),
                ],
            ));
        }

        if lower.contains("thank") {
            return Some(AssistantReply::chat(
                "You're welcome! Anything else I can find for you?",
                vec![
                    "Find something else".to_string(),
                    "That's all for now".to_string(),
                ],
            ));
        }

        None
    }

    /// Default rule: echo the utterance back as a proposed search.
    fn proposed_search_reply(trimmed: &str) -> AssistantReply {
        AssistantReply {
            message: format!("Should I search for \"{trimmed}\" near you?"),
            options: vec![
                "Yes, search".to_string(),
                "No, let me rephrase".to_string(),
            ],
            search_query: Some(trimmed.to_string()),
            needs_confirmation: true,
            ..AssistantReply::default()
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn contains_word(haystack: &str, words: &[&str]) -> bool {
    haystack
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| words.contains(&token))
}
