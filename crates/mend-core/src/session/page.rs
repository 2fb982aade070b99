//! Page state for the two-view session flow.

use serde::{Deserialize, Serialize};

/// The view a session is currently showing.
///
/// Transitions are named and triggered by discrete controller events:
/// `Input -> Results` on a successful submission, `Results -> Input` when
/// the user goes back to edit the form. Rendering is independent of this
/// state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// The questionnaire form is being filled out.
    #[default]
    Input,
    /// An assessment has been produced and follow-ups are available.
    Results,
}
