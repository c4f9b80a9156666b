//! Error types for the PlaceChat application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire PlaceChat application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Everything here degrades to
/// a conversational message at the boundary; nothing is fatal to the process.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PlacechatError {
    /// The incoming utterance was empty or whitespace-only. Rejected before
    /// any state change.
    #[error("Utterance is empty")]
    InvalidUtterance,

    /// A turn is already being resolved for this session. The caller must
    /// wait for it to complete before submitting another utterance.
    #[error("A turn is already in progress for this session")]
    TurnInProgress,

    /// The place-search collaborator failed (network, timeout, upstream).
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlacechatError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a SearchFailed error
    pub fn search_failed(message: impl Into<String>) -> Self {
        Self::SearchFailed(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an InvalidUtterance error
    pub fn is_invalid_utterance(&self) -> bool {
        matches!(self, Self::InvalidUtterance)
    }

    /// Check if this is a TurnInProgress error
    pub fn is_turn_in_progress(&self) -> bool {
        matches!(self, Self::TurnInProgress)
    }

    /// Check if this is a SearchFailed error
    pub fn is_search_failed(&self) -> bool {
        matches!(self, Self::SearchFailed(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for PlacechatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for PlacechatError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, PlacechatError>`.
pub type Result<T> = std::result::Result<T, PlacechatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(PlacechatError::InvalidUtterance.is_invalid_utterance());
        assert!(PlacechatError::TurnInProgress.is_turn_in_progress());
        assert!(PlacechatError::search_failed("boom").is_search_failed());
        assert!(!PlacechatError::internal("x").is_search_failed());
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let converted: PlacechatError = err.into();
        assert!(matches!(
            converted,
            PlacechatError::Serialization { ref format, .. } if format == "JSON"
        ));
    }
}
