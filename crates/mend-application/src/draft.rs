//! Draft form state for the questionnaire.
//!
//! The draft survives the `Results -> Input` transition so the form stays
//! pre-filled when the user goes back to edit an answer. Source revisions
//! disagreed on this; keeping the draft is the decided behavior (see
//! DESIGN.md).

use mend_core::assessment::{
    AssessmentRequest, Expertise, InfectionStatus, Moisture, WoundImage,
};
use mend_core::error::{MendError, Result};
use std::path::PathBuf;

/// In-progress questionnaire answers, owned by the front-end.
///
/// Every field is optional until submission; `to_request` checks the
/// answered questions and reads the image file, producing the immutable
/// `AssessmentRequest` the controller validates.
#[derive(Debug, Clone, Default)]
pub struct AssessmentDraft {
    pub supplies: Vec<String>,
    pub setting: Option<String>,
    pub expertise: Option<Expertise>,
    pub hospital_willingness: Option<bool>,
    pub visit_frequency: Option<String>,
    pub infection: Option<InfectionStatus>,
    pub moisture: Option<Moisture>,
    pub image_path: Option<PathBuf>,
}

impl AssessmentDraft {
    /// True once every question has an answer (the image may still be
    /// missing; that is the controller's validation to report).
    pub fn questions_answered(&self) -> bool {
        self.setting.is_some()
            && self.expertise.is_some()
            && self.hospital_willingness.is_some()
            && self.visit_frequency.is_some()
            && self.infection.is_some()
            && self.moisture.is_some()
    }

    /// Builds the immutable request, reading the wound image from disk.
    ///
    /// An unreadable or non-JPEG/PNG file is a validation error; a missing
    /// path produces a request without an image so the controller reports
    /// the canonical message.
    pub fn to_request(&self) -> Result<AssessmentRequest> {
        let missing = |question: &str| {
            MendError::validation(format!("Please answer the {question} question."))
        };

        let image = match &self.image_path {
            Some(path) => Some(WoundImage::from_path(path)?),
            None => None,
        };

        Ok(AssessmentRequest {
            supplies: self.supplies.clone(),
            setting: self.setting.clone().ok_or_else(|| missing("care setting"))?,
            expertise: self.expertise.ok_or_else(|| missing("provider expertise"))?,
            hospital_willingness: self
                .hospital_willingness
                .ok_or_else(|| missing("hospital access"))?,
            visit_frequency: self
                .visit_frequency
                .clone()
                .ok_or_else(|| missing("clinic visits"))?,
            infection: self.infection.ok_or_else(|| missing("infection status"))?,
            moisture: self.moisture.ok_or_else(|| missing("moisture level"))?,
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn answered_draft() -> AssessmentDraft {
        AssessmentDraft {
            supplies: vec!["Sterile gauze pads".to_string()],
            setting: Some("Home".to_string()),
            expertise: Some(Expertise::NonProfessional),
            hospital_willingness: Some(true),
            visit_frequency: Some("Daily".to_string()),
            infection: Some(InfectionStatus::No),
            moisture: Some(Moisture::Dry),
            image_path: None,
        }
    }

    fn write_jpeg(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("wound.jpg");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
        file.write_all(b"test-jpeg-payload").unwrap();
        path
    }

    #[test]
    fn test_to_request_reads_image() {
        let dir = TempDir::new().unwrap();
        let mut draft = answered_draft();
        draft.image_path = Some(write_jpeg(&dir));

        let request = draft.to_request().unwrap();
        assert!(request.image.is_some());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_to_request_without_image_defers_to_controller() {
        let request = answered_draft().to_request().unwrap();
        assert!(request.image.is_none());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unanswered_question_is_reported() {
        let mut draft = answered_draft();
        draft.moisture = None;

        let result = draft.to_request();
        match result {
            Err(MendError::Validation(message)) => {
                assert!(message.contains("moisture level"));
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_image_is_validation_error() {
        let mut draft = answered_draft();
        draft.image_path = Some(PathBuf::from("/nonexistent/wound.jpg"));

        assert!(matches!(
            draft.to_request(),
            Err(MendError::Validation(_))
        ));
    }

    #[test]
    fn test_questions_answered() {
        assert!(answered_draft().questions_answered());

        let mut draft = answered_draft();
        draft.setting = None;
        assert!(!draft.questions_answered());
    }
}
