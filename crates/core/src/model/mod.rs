mod choice;
pub mod content;
mod ids;
mod quiz;

pub use content::{ChoiceText, PromptText, TextError};
pub use ids::{ChoiceId, ParseIdError, QuizId};

pub use choice::PresentedChoice;
pub use quiz::{
    QuizDataError, QuizQuestion, QuizQuestionDraft, QuizSet, QuizSetDraft, QuizVariant,
    QuizVariantDraft,
};
