pub mod business;
pub mod chat;
pub mod error;
pub mod gateway;
pub mod intent;

// Re-export common error type
pub use error::PlacechatError;
