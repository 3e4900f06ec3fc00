use crate::model::content::ChoiceText;
use crate::model::ids::ChoiceId;

/// One answer option as shown to the learner, in presentation order.
///
/// Correctness travels with the option so shuffling never loses track of
/// which entry is the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedChoice {
    pub id: ChoiceId,
    pub text: ChoiceText,
    pub is_correct: bool,
}

impl PresentedChoice {
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}
