//! Assessment domain module.
//!
//! This module contains the structured request model, the wound image
//! payload, the opaque assessment result, and the fixed questionnaire
//! catalogs.
//!
//! # Module Structure
//!
//! - `request`: Structured submission (`AssessmentRequest` and its enums)
//! - `image`: Wound photo payload (`WoundImage`, `ImageFormat`)
//! - `model`: Result types (`Assessment`, `QAPair`)
//! - `catalog`: Fixed questionnaire option lists

mod catalog;
mod image;
mod model;
mod request;

pub use catalog::{CARE_SETTINGS, SUPPLY_OPTIONS, VISIT_FREQUENCIES, other_entry};
pub use image::{ImageFormat, WoundImage};
pub use model::{Assessment, QAPair};
pub use request::{AssessmentRequest, Expertise, InfectionStatus, Moisture};
