//! Prompt construction for the model path.
//!
//! The prompt embeds the static persona instructions, up to three sample
//! businesses from the current results for grounding, the recent history
//! window, and the current utterance, and requests a structured JSON reply
//! matching the `AssistantReply` wire shape.

use std::fmt::Write;

use placechat_core::chat::{ConversationContext, MessageRole};

/// How many businesses from the current results are embedded for grounding.
const SAMPLE_BUSINESSES: usize = 3;

const PERSONA_INSTRUCTIONS: &str = "You are PlaceChat, a friendly assistant that helps people find \
local businesses. You chat naturally, ask at most one clarifying question at a time, and propose \
a concrete search whenever the user's need is clear. Never invent businesses that are not in the \
provided context.";

const RESPONSE_SCHEMA: &str = r#"Reply with a JSON object matching this schema:
{
  "message": string,            // required: what to say to the user
  "options": [string],          // up to 4 suggested follow-ups
  "searchQuery": string?,       // a search you propose but have not run
  "needsConfirmation": bool,    // true when the user must confirm searchQuery first
  "confirmedSearch": string?,   // a search to run immediately, no confirmation
  "previousQuery": string?,     // carry-over of the query behind the current results
  "action": string?,            // "sort" to reorder current results
  "sortBy": string?             // "distance" | "rating" | "name" when action is "sort"
}"#;

/// Builds the full prompt for one turn.
pub fn build_prompt(utterance: &str, context: &ConversationContext<'_>) -> String {
    let mut prompt = String::new();
    prompt.push_str(PERSONA_INSTRUCTIONS);
    prompt.push_str("\n\n");

    if let Some(query) = context.prior_query {
        let _ = writeln!(prompt, "The current results came from the search: \"{query}\".");
    }
    if context.pending_confirmation {
        prompt.push_str("The previous turn proposed a search and is awaiting the user's confirmation.\n");
    }

    if !context.businesses.is_empty() {
        let _ = writeln!(
            prompt,
            "Sample of the {} current results:",
            context.businesses.len()
        );
        for business in context.businesses.iter().take(SAMPLE_BUSINESSES) {
            let rating = business
                .rating
                .map(|r| format!("{r:.1}"))
                .unwrap_or_else(|| "unrated".to_string());
            let _ = writeln!(
                prompt,
                "- {} | {} | rating {}",
                business.name, business.address, rating
            );
        }
        prompt.push('\n');
    }

    if !context.recent_history.is_empty() {
        prompt.push_str("Recent conversation:\n");
        for message in context.recent_history {
            let speaker = match message.role {
                MessageRole::User => "User",
                MessageRole::Assistant => "Assistant",
            };
            let _ = writeln!(prompt, "{speaker}: {}", message.content);
        }
        prompt.push('\n');
    }

    let _ = writeln!(prompt, "User: {utterance}\n");
    prompt.push_str(RESPONSE_SCHEMA);
    prompt.push_str("\n\nIMPORTANT: Output ONLY valid JSON, no markdown formatting or code blocks.");
    prompt
}
