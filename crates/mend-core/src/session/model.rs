//! Session domain model.
//!
//! This module contains the core Session entity that represents one user
//! visit in the application's domain layer.

use super::page::Page;
use crate::assessment::{Assessment, QAPair};
use serde::{Deserialize, Serialize};

/// Represents one user visit in the application's domain layer.
///
/// A session contains:
/// - The accepted-terms flag gating every other operation
/// - The current page (Input or Results)
/// - The last generated assessment, if any
/// - The ordered log of follow-up question/answer pairs
///
/// Sessions are created per user connection, owned by the controller, and
/// discarded on disconnect. Nothing is persisted across restarts and no
/// state is shared between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
    /// Whether the user has accepted the terms of use
    pub terms_accepted: bool,
    /// The view the session is currently showing
    pub page: Page,
    /// The most recent assessment, if one has been generated
    pub last_assessment: Option<Assessment>,
    /// Follow-up exchanges in arrival order
    pub follow_ups: Vec<QAPair>,
}

impl Session {
    /// Creates a fresh session at the terms gate.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now.clone(),
            updated_at: now,
            terms_accepted: false,
            page: Page::Input,
            last_assessment: None,
            follow_ups: Vec::new(),
        }
    }

    /// Stamps the session as updated now.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_terms_gate() {
        let session = Session::new();
        assert!(!session.terms_accepted);
        assert_eq!(session.page, Page::Input);
        assert!(session.last_assessment.is_none());
        assert!(session.follow_ups.is_empty());
    }

    #[test]
    fn test_sessions_have_unique_ids() {
        assert_ne!(Session::new().id, Session::new().id);
    }
}
