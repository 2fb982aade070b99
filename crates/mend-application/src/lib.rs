pub mod controller;
pub mod draft;

pub use controller::SessionController;
pub use draft::AssessmentDraft;
