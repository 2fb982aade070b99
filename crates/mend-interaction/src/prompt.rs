//! Prompt composition for assessment and follow-up requests.
//!
//! The instruction text is the entire output contract: the model, not the
//! application, is responsible for formatting, so the content rules below
//! (visible landmarks, supply restraint, no dash separators, expertise
//! calibration, numbered list) must reach it verbatim.

use mend_core::assessment::{AssessmentRequest, QAPair};
use mend_core::error::{MendError, Result};
use minijinja::{Environment, context};
use once_cell::sync::Lazy;

const ASSESSMENT_TEMPLATE: &str = r#"You are an educational AI assistant helping to identify visual features in wound images for research and model development.

Your goal is to generate a step-by-step treatment plan based on both the text context and the visible landmarks in the image.

User-provided context:
- Supplies available: {{ supplies }}
- Setting: {{ setting }}
- Expertise-level: {{ expertise }}
- Willing to visit hospital: {{ willingness }}
- Frequency of clinic visits: {{ frequency }}
- Wound infection status: {{ infection }}
- Wound moisture: {{ moisture }}

### Instructions ###
1. Carefully examine visual landmarks in the wound image, e.g., color changes, necrotic tissue, swelling, drainage, redness, or exposed structures.
2. Incorporate those landmarks explicitly into the treatment plan (e.g., "Clean around the dark necrotic edge" or "Protect the red granulating area").
3. Use only supplies the user has available. Do not use supplies if it is excessive for the severity of the wound.
4. Do not use em dashes, en dashes, or hyphens for separating phrases; instead use commas or semicolons.
5. Carefully consider the expertise-level when choosing the language for the instructions.
6. Keep your output as a numbered list (1., 2., 3., etc.) with concise, actionable wound-care steps.
"#;

const FOLLOW_UP_TEMPLATE: &str = r#"The assistant previously generated the following assessment:

{{ context }}

User follow-up question: {{ question }}

Please answer the user's question clearly, referencing the assessment where helpful. Be concise and actionable. Keep the answer one paragraph long at maximum.
"#;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template("assessment", ASSESSMENT_TEMPLATE)
        .expect("assessment template must parse");
    env.add_template("follow_up", FOLLOW_UP_TEMPLATE)
        .expect("follow_up template must parse");
    env
});

/// Renders the multimodal assessment instruction block, embedding all
/// seven structured fields verbatim.
pub fn assessment_prompt(request: &AssessmentRequest) -> Result<String> {
    let template = TEMPLATES
        .get_template("assessment")
        .map_err(|e| MendError::internal(e.to_string()))?;

    template
        .render(context! {
            supplies => request.supplies.join(", "),
            setting => request.setting,
            expertise => request.expertise.to_string(),
            willingness => request.willingness_label(),
            frequency => request.visit_frequency,
            infection => request.infection.to_string(),
            moisture => request.moisture.to_string(),
        })
        .map_err(|e| MendError::internal(format!("Failed to render assessment prompt: {e}")))
}

/// Renders the text-only follow-up instruction block.
pub fn follow_up_prompt(context: &str, question: &str) -> Result<String> {
    let template = TEMPLATES
        .get_template("follow_up")
        .map_err(|e| MendError::internal(e.to_string()))?;

    template
        .render(context! { context, question })
        .map_err(|e| MendError::internal(format!("Failed to render follow-up prompt: {e}")))
}

/// Builds the conversation context for a follow-up request: the original
/// assessment text followed by every prior exchange in arrival order.
pub fn follow_up_context(assessment_text: &str, follow_ups: &[QAPair]) -> String {
    let mut transcript = String::from(assessment_text);

    for pair in follow_ups {
        transcript.push_str("\n\nQ: ");
        transcript.push_str(&pair.question);
        transcript.push_str("\nA: ");
        transcript.push_str(&pair.answer);
    }

    transcript
}

#[cfg(test)]
mod tests {
    use super::*;
    use mend_core::assessment::{Expertise, InfectionStatus, Moisture, WoundImage};

    fn request() -> AssessmentRequest {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        bytes.extend_from_slice(b"test");
        AssessmentRequest {
            supplies: vec![
                "Sterile gauze pads".to_string(),
                "Antiseptic wipes".to_string(),
            ],
            setting: "Home".to_string(),
            expertise: Expertise::NonProfessional,
            hospital_willingness: true,
            visit_frequency: "Daily".to_string(),
            infection: InfectionStatus::No,
            moisture: Moisture::Dry,
            image: Some(WoundImage::from_bytes(bytes).unwrap()),
        }
    }

    #[test]
    fn test_assessment_prompt_embeds_all_fields() {
        let prompt = assessment_prompt(&request()).unwrap();

        assert!(prompt.contains("Sterile gauze pads, Antiseptic wipes"));
        assert!(prompt.contains("Setting: Home"));
        assert!(prompt.contains("Expertise-level: Non-healthcare professional"));
        assert!(prompt.contains("Willing to visit hospital: Yes"));
        assert!(prompt.contains("Frequency of clinic visits: Daily"));
        assert!(prompt.contains("Wound infection status: No"));
        assert!(prompt.contains("Wound moisture: Dry"));
    }

    #[test]
    fn test_assessment_prompt_carries_content_rules() {
        let prompt = assessment_prompt(&request()).unwrap();

        assert!(prompt.contains("visual landmarks"));
        assert!(prompt.contains("Use only supplies the user has available"));
        assert!(prompt.contains("instead use commas or semicolons"));
        assert!(prompt.contains("expertise-level when choosing the language"));
        assert!(prompt.contains("numbered list"));
    }

    #[test]
    fn test_follow_up_prompt_includes_context_and_question() {
        let prompt = follow_up_prompt("1. Clean the wound.", "How often reapply?").unwrap();

        assert!(prompt.contains("1. Clean the wound."));
        assert!(prompt.contains("User follow-up question: How often reapply?"));
        assert!(prompt.contains("one paragraph long at maximum"));
    }

    #[test]
    fn test_follow_up_context_preserves_order() {
        let pairs = vec![
            QAPair::new("What if it gets red?", "Watch for spreading redness."),
            QAPair::new("How often reapply?", "Once daily."),
        ];
        let transcript = follow_up_context("1. Clean the wound.", &pairs);

        let assessment_pos = transcript.find("1. Clean the wound.").unwrap();
        let first_q = transcript.find("Q: What if it gets red?").unwrap();
        let first_a = transcript.find("A: Watch for spreading redness.").unwrap();
        let second_q = transcript.find("Q: How often reapply?").unwrap();

        assert!(assessment_pos < first_q);
        assert!(first_q < first_a);
        assert!(first_a < second_q);
    }

    #[test]
    fn test_follow_up_context_without_prior_pairs() {
        let transcript = follow_up_context("1. Clean the wound.", &[]);
        assert_eq!(transcript, "1. Clean the wound.");
    }
}
