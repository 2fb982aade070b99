//! Fixed questionnaire catalogs.
//!
//! The supply, setting, and frequency options mirror the questionnaire the
//! form presents. Entries named "Other" accept user free text, recorded as
//! `Other: <text>` so the prompt keeps the distinction visible.

/// Wound care supplies the user can mark as available.
pub const SUPPLY_OPTIONS: &[&str] = &[
    "Sterile gauze pads",
    "Non-stick wound pads",
    "Sterile gauze rolls",
    "Adhesive wound dressings",
    "Transparent film dressings",
    "Fabric or elastic bandages",
    "Medical adhesive tape",
    "Sterile saline solution",
    "Antiseptic wipes",
    "Antibacterial or antibiotic ointment",
    "Barrier cream or ointment",
    "Disposable gloves",
];

/// Where care is being provided.
pub const CARE_SETTINGS: &[&str] = &["Harm reduction clinic", "Outpatient clinic", "Home"];

/// How often the individual can visit a clinic.
pub const VISIT_FREQUENCIES: &[&str] = &["Daily", "Weekly"];

/// Formats a user-specified "Other" answer for a catalog question.
pub fn other_entry(text: &str) -> String {
    format!("Other: {}", text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_entry_trims_free_text() {
        assert_eq!(other_entry("  hydrogel sheets "), "Other: hydrogel sheets");
    }

    #[test]
    fn test_catalogs_are_non_empty() {
        assert!(!SUPPLY_OPTIONS.is_empty());
        assert!(!CARE_SETTINGS.is_empty());
        assert!(!VISIT_FREQUENCIES.is_empty());
    }
}
