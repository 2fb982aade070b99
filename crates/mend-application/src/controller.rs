//! Form/session controller.
//!
//! Owns one `Session` and drives its lifecycle through named transitions.
//! Session state is created per user connection and discarded on
//! disconnect; there are no ambient globals and no state shared across
//! sessions.

use mend_core::assessment::{Assessment, AssessmentRequest, QAPair};
use mend_core::client::AssessmentClient;
use mend_core::error::{MendError, Result};
use mend_core::session::{Page, Session};
use mend_interaction::prompt;

/// Drives one user session: terms gate, submission, follow-ups, and the
/// `Input -> Results -> Input` page transitions.
///
/// The controller is synchronous from the session's point of view: a new
/// submission is only reachable after the previous one completes, so no
/// parallel in-flight requests exist per session.
pub struct SessionController<C: AssessmentClient> {
    session: Session,
    client: C,
}

impl<C: AssessmentClient> SessionController<C> {
    /// Creates a controller with a fresh session at the terms gate.
    pub fn new(client: C) -> Self {
        Self {
            session: Session::new(),
            client,
        }
    }

    /// Read access to the owned session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn page(&self) -> Page {
        self.session.page
    }

    pub fn last_assessment(&self) -> Option<&Assessment> {
        self.session.last_assessment.as_ref()
    }

    pub fn follow_ups(&self) -> &[QAPair] {
        &self.session.follow_ups
    }

    /// Opens the terms gate; every other operation requires this first.
    pub fn accept_terms(&mut self) {
        self.session.terms_accepted = true;
        self.session.touch();
        tracing::info!(session_id = %self.session.id, "Terms accepted");
    }

    /// Records a declined gate. The session stays locked.
    pub fn decline_terms(&mut self) {
        self.session.terms_accepted = false;
        self.session.touch();
        tracing::info!(session_id = %self.session.id, "Terms declined");
    }

    pub fn terms_accepted(&self) -> bool {
        self.session.terms_accepted
    }

    fn ensure_terms_accepted(&self) -> Result<()> {
        if self.session.terms_accepted {
            Ok(())
        } else {
            Err(MendError::validation(
                "You must accept the terms to use this application.",
            ))
        }
    }

    /// Submits one structured request to the assessment model.
    ///
    /// Validation failures (empty supplies, missing image) are reported
    /// without invoking the remote client and without mutating session
    /// state. On success the result is stored, the page transitions to
    /// Results, and the follow-up log is reset.
    pub async fn submit_assessment(&mut self, request: AssessmentRequest) -> Result<&Assessment> {
        self.ensure_terms_accepted()?;
        request.validate()?;

        let text = self.client.request_assessment(&request).await?;

        self.session.last_assessment = Some(Assessment::new(text));
        self.session.follow_ups.clear();
        self.session.page = Page::Results;
        self.session.touch();
        tracing::info!(session_id = %self.session.id, "Assessment stored; page Input -> Results");

        // Safe to unwrap because we just stored the assessment
        Ok(self.session.last_assessment.as_ref().unwrap())
    }

    /// Asks one freeform follow-up question against the accumulated
    /// transcript.
    ///
    /// Empty or whitespace-only questions are rejected with a warning and
    /// leave the follow-up log untouched. The context sent to the client
    /// contains the original assessment text and every prior pair in
    /// arrival order.
    pub async fn ask_follow_up(&mut self, question: &str) -> Result<&QAPair> {
        self.ensure_terms_accepted()?;

        let question = question.trim();
        if question.is_empty() {
            return Err(MendError::validation(
                "Please enter a question before asking.",
            ));
        }

        let assessment = self.session.last_assessment.as_ref().ok_or_else(|| {
            MendError::validation("Generate an assessment before asking follow-up questions.")
        })?;

        let context = prompt::follow_up_context(&assessment.text, &self.session.follow_ups);
        let answer = self.client.request_follow_up(&context, question).await?;

        self.session.follow_ups.push(QAPair::new(question, answer));
        self.session.touch();
        tracing::info!(
            session_id = %self.session.id,
            follow_ups = self.session.follow_ups.len(),
            "Follow-up answered"
        );

        // Safe to unwrap because we just pushed an element
        Ok(self.session.follow_ups.last().unwrap())
    }

    /// Named transition Results -> Input.
    ///
    /// Stored form values are NOT cleared; the front-end keeps its draft
    /// so the form stays pre-filled when the user returns.
    pub fn back_to_input(&mut self) -> Result<()> {
        self.ensure_terms_accepted()?;
        self.session.page = Page::Input;
        self.session.touch();
        tracing::info!(session_id = %self.session.id, "Page Results -> Input");
        Ok(())
    }
}
