//! Assessment result and follow-up conversation types.

use serde::{Deserialize, Serialize};

/// The model's text response to one structured submission.
///
/// The text is treated as opaque formatted output (the prompt contract
/// asks for a numbered list, but nothing locally parses or validates it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Raw text returned by the model.
    pub text: String,
    /// Timestamp when the assessment was produced (ISO 8601 format).
    pub created_at: String,
}

impl Assessment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// One follow-up exchange, appended to the session in arrival order.
///
/// Pairs are never mutated or removed once added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QAPair {
    pub question: String,
    pub answer: String,
    /// Timestamp when the pair was recorded (ISO 8601 format).
    pub timestamp: String,
}

impl QAPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
