//! Structured assessment request model.
//!
//! One request carries the seven questionnaire answers plus the wound
//! photo. Requests are immutable once submitted; validation runs before
//! any remote call is made.

use super::image::WoundImage;
use crate::error::{MendError, Result};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Provider expertise level declared by the user.
///
/// The display string is embedded verbatim in the outbound prompt so the
/// model can calibrate its vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Expertise {
    #[strum(serialize = "Healthcare professional with wound care experience")]
    ExperiencedProfessional,
    #[strum(serialize = "Healthcare professional without wound care experience")]
    InexperiencedProfessional,
    #[strum(serialize = "Non-healthcare professional")]
    NonProfessional,
}

/// Whether the wound shows signs of infection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum InfectionStatus {
    #[strum(serialize = "Yes")]
    Yes,
    #[strum(serialize = "No")]
    No,
    #[strum(serialize = "Not sure")]
    Unsure,
}

/// The wound's moisture condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Moisture {
    #[strum(serialize = "Dry")]
    Dry,
    #[strum(serialize = "Wet")]
    Wet,
    #[strum(serialize = "Normal")]
    Normal,
}

/// A complete structured submission: questionnaire answers plus photo.
#[derive(Debug, Clone)]
pub struct AssessmentRequest {
    /// Available supplies; must contain at least one entry.
    pub supplies: Vec<String>,
    /// Where care is being provided (free text for "Other" settings).
    pub setting: String,
    pub expertise: Expertise,
    /// Whether the individual is willing to go to hospital if needed.
    pub hospital_willingness: bool,
    /// How often the individual can visit a clinic.
    pub visit_frequency: String,
    pub infection: InfectionStatus,
    pub moisture: Moisture,
    /// The wound photo; required for submission.
    pub image: Option<WoundImage>,
}

impl AssessmentRequest {
    /// Checks the submission invariants: at least one supply and a photo.
    ///
    /// Called by the controller before the remote client is invoked, so a
    /// failing request never leaves the process.
    pub fn validate(&self) -> Result<()> {
        if self.image.is_none() {
            return Err(MendError::validation("Please upload an image first."));
        }
        if self.supplies.iter().all(|s| s.trim().is_empty()) {
            return Err(MendError::validation(
                "Please select at least one available supply.",
            ));
        }
        Ok(())
    }

    /// Renders the hospital willingness answer the way the form asked it.
    pub fn willingness_label(&self) -> &'static str {
        if self.hospital_willingness { "Yes" } else { "No" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg_image() -> WoundImage {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        bytes.extend_from_slice(b"test");
        WoundImage::from_bytes(bytes).unwrap()
    }

    fn valid_request() -> AssessmentRequest {
        AssessmentRequest {
            supplies: vec!["Sterile gauze pads".to_string()],
            setting: "Home".to_string(),
            expertise: Expertise::NonProfessional,
            hospital_willingness: true,
            visit_frequency: "Daily".to_string(),
            infection: InfectionStatus::No,
            moisture: Moisture::Dry,
            image: Some(jpeg_image()),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_empty_supplies_rejected() {
        let mut request = valid_request();
        request.supplies.clear();
        assert!(matches!(request.validate(), Err(MendError::Validation(_))));
    }

    #[test]
    fn test_blank_supplies_rejected() {
        let mut request = valid_request();
        request.supplies = vec!["   ".to_string()];
        assert!(matches!(request.validate(), Err(MendError::Validation(_))));
    }

    #[test]
    fn test_missing_image_rejected() {
        let mut request = valid_request();
        request.image = None;
        assert!(matches!(request.validate(), Err(MendError::Validation(_))));
    }

    #[test]
    fn test_expertise_labels() {
        assert_eq!(
            Expertise::ExperiencedProfessional.to_string(),
            "Healthcare professional with wound care experience"
        );
        assert_eq!(
            Expertise::NonProfessional.to_string(),
            "Non-healthcare professional"
        );
    }

    #[test]
    fn test_infection_and_moisture_labels() {
        assert_eq!(InfectionStatus::Unsure.to_string(), "Not sure");
        assert_eq!(Moisture::Normal.to_string(), "Normal");
    }
}
