//! HTTP-facing collaborators for PlaceChat: the Gemini model gateway, the
//! places-search client, structured-output parsing, and secret loading.

pub mod config;
pub mod gemini_gateway;
pub mod parser;
pub mod places_client;

pub use gemini_gateway::GeminiChatGateway;
pub use parser::{ParseError, ResponseParser};
pub use places_client::PlacesApiClient;
