//! Error types for editor operations.

use thiserror::Error;

/// Result type for editor operations.
pub type CraftResult<T> = Result<T, CraftError>;

/// Errors that can occur in editor operations.
///
/// Interactive gestures never produce these: an invalid pointer target is
/// ignored rather than reported. Errors only surface from operations that
/// consume external input (persisted layouts, suggested layouts).
#[derive(Debug, Error)]
pub enum CraftError {
    /// A persisted layout document failed validation.
    #[error("Invalid layout document: {0}")]
    InvalidLayout(String),

    /// A suggested layout returned by the inference service is malformed.
    #[error("Invalid suggested layout: {0}")]
    InvalidSuggestion(String),

    /// Layout serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::LayoutDocument;
    use crate::suggestion::parse_suggestions;

    fn kind(err: &CraftError) -> &'static str {
        match err {
            CraftError::InvalidLayout(_) => "layout",
            CraftError::InvalidSuggestion(_) => "suggestion",
            CraftError::Serialization(_) => "serialization",
        }
    }

    #[test]
    fn test_external_input_errors() {
        let err = LayoutDocument::from_json("{\"version\": 9, \"elements\": []}").unwrap_err();
        assert_eq!(kind(&err), "layout");
        assert!(err.to_string().starts_with("Invalid layout document:"));

        let err = LayoutDocument::from_json("not json").unwrap_err();
        assert_eq!(kind(&err), "serialization");

        let err = parse_suggestions("[1]").unwrap_err();
        assert_eq!(kind(&err), "suggestion");
        assert!(err.to_string().starts_with("Invalid suggested layout:"));
    }
}
