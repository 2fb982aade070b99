//! Assessment client trait.
//!
//! Defines the seam between the session controller and the hosted model.
//! The production implementation lives in `mend-interaction`; tests use
//! recording mocks.

use crate::assessment::AssessmentRequest;
use crate::error::Result;

/// Client for the hosted multimodal completion endpoint.
///
/// Both operations are synchronous from the session's point of view and
/// non-retrying: any failure is returned as a typed error and handled at
/// the call boundary.
#[async_trait::async_trait]
pub trait AssessmentClient: Send + Sync {
    /// Issues one multimodal completion request (instruction text plus
    /// inline base64 image) and returns the model's raw text.
    async fn request_assessment(&self, request: &AssessmentRequest) -> Result<String>;

    /// Issues one text-only completion request for a follow-up question,
    /// carrying the accumulated conversation transcript as context.
    async fn request_follow_up(&self, context: &str, question: &str) -> Result<String>;
}
