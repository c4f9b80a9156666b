//! Orchestration layer for PlaceChat: the fallback rule engine, the intent
//! resolver, the search dispatch policy, and the per-session turn usecase.

pub mod chat_usecase;
pub mod dispatch;
pub mod fallback;
pub mod prompt;
pub mod resolver;

pub use chat_usecase::ChatTurnUsecase;
pub use dispatch::{SearchDispatchPolicy, TurnOutcome};
pub use fallback::FallbackRuleEngine;
pub use resolver::{IntentResolver, Resolution};
