//! Side-effect dispatch for resolved intents.

use std::sync::Arc;

use serde::Serialize;

use placechat_core::business::{sort_businesses, BusinessRecord, SortKey};
use placechat_core::gateway::PlaceSearch;
use placechat_core::intent::Intent;

/// What one turn surfaces back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    /// Conversational message to display.
    pub message: String,
    /// Suggested follow-up options.
    pub options: Vec<String>,
    /// New or reordered result set, when the turn produced one.
    pub businesses: Option<Vec<BusinessRecord>>,
    /// The query that actually ran, present only on a successful search.
    pub executed_query: Option<String>,
    /// True when a search was attempted and the collaborator failed.
    pub search_failed: bool,
}

impl TurnOutcome {
    fn message_only(message: String, options: Vec<String>) -> Self {
        Self {
            message,
            options,
            businesses: None,
            executed_query: None,
            search_failed: false,
        }
    }
}

/// Decides and performs the side effect for a canonical intent.
///
/// `ExecuteSearch` invokes the place-search collaborator; `ApplySort`
/// reorders the current results with the pure sorter; everything else only
/// surfaces its message and options.
pub struct SearchDispatchPolicy {
    search: Arc<dyn PlaceSearch>,
}

impl SearchDispatchPolicy {
    pub fn new(search: Arc<dyn PlaceSearch>) -> Self {
        Self { search }
    }

    /// Executes the effect for `intent` against the current result snapshot.
    pub async fn dispatch(
        &self,
        intent: &Intent,
        current_results: &[BusinessRecord],
    ) -> TurnOutcome {
        match intent {
            Intent::ExecuteSearch { query } => self.run_search(query).await,
            Intent::ApplySort { sort_key } => {
                let sorted = sort_businesses(current_results.to_vec(), *sort_key);
                TurnOutcome {
                    message: sort_message(*sort_key),
                    options: vec![],
                    businesses: Some(sorted),
                    executed_query: None,
                    search_failed: false,
                }
            }
            Intent::Chat { message, options }
            | Intent::AskConfirmation {
                message, options, ..
            } => TurnOutcome::message_only(message.clone(), options.clone()),
            Intent::Error { message } => {
                TurnOutcome::message_only(message.clone(), vec!["Try again".to_string()])
            }
        }
    }

    async fn run_search(&self, query: &str) -> TurnOutcome {
        match self.search.search(query).await {
            Ok(businesses) if businesses.is_empty() => TurnOutcome {
                message: format!(
                    "I couldn't find anything for \"{query}\". Want to try different wording?"
                ),
                options: vec!["Try a different search".to_string()],
                businesses: Some(businesses),
                executed_query: Some(query.to_string()),
                search_failed: false,
            },
            Ok(businesses) => TurnOutcome {
                message: format!(
                    "Here's what I found for \"{query}\" — {} places.",
                    businesses.len()
                ),
                options: vec![
                    "Show higher rated".to_string(),
                    "Show closer options".to_string(),
                    "Something different".to_string(),
                ],
                businesses: Some(businesses),
                executed_query: Some(query.to_string()),
                search_failed: false,
            },
            Err(err) => {
                tracing::warn!(error = %err, query, "place search failed");
                TurnOutcome {
                    message: "I couldn't complete that search right now. Please try again in a moment."
                        .to_string(),
                    options: vec!["Try again".to_string()],
                    businesses: None,
                    executed_query: None,
                    search_failed: true,
                }
            }
        }
    }
}

fn sort_message(key: SortKey) -> String {
    match key {
        SortKey::Distance => "Sorted your results by distance, closest first.".to_string(),
        SortKey::Rating => "Sorted your results by rating, best first.".to_string(),
        SortKey::Name => "Sorted your results alphabetically.".to_string(),
    }
}
