use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::choice::PresentedChoice;
use crate::model::content::{ChoiceText, PromptText, TextError};
use crate::model::ids::ChoiceId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Malformed quiz content. Positions are 0-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizDataError {
    #[error("quiz has no variants")]
    NoVariants,

    #[error("variant {variant} has no questions")]
    EmptyVariant { variant: usize },

    #[error("variant {variant}, question {question} has no distractors")]
    NoDistractors { variant: usize, question: usize },

    #[error("variant {variant}, question {question}: prompt text is invalid: {source}")]
    InvalidPrompt {
        variant: usize,
        question: usize,
        #[source]
        source: TextError,
    },

    #[error("variant {variant}, question {question}: answer text is invalid: {source}")]
    InvalidAnswer {
        variant: usize,
        question: usize,
        #[source]
        source: TextError,
    },

    #[error(
        "variant {variant}, question {question}: distractor {distractor} is invalid: {source}"
    )]
    InvalidDistractor {
        variant: usize,
        question: usize,
        distractor: usize,
        #[source]
        source: TextError,
    },

    #[error("variant {variant}, question {question}: duplicate choice text {text:?}")]
    DuplicateChoice {
        variant: usize,
        question: usize,
        text: String,
    },

    #[error(
        "variant {variant}, question {question}: choices must have unique ids and exactly one correct option"
    )]
    InconsistentChoices { variant: usize, question: usize },

    #[error("quiz title cannot be empty")]
    EmptyTitle,
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// Raw quiz content as delivered by the content layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSetDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "quizzes")]
    pub variants: Vec<QuizVariantDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizVariantDraft {
    pub questions: Vec<QuizQuestionDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestionDraft {
    pub text: String,
    pub answer: String,
    pub distractors: Vec<String>,
}

impl QuizSetDraft {
    /// Validate raw content into an immutable `QuizSet`.
    ///
    /// # Errors
    ///
    /// Returns `QuizDataError` for a blank title, zero variants, an empty variant,
    /// a question without distractors, blank text, or duplicate choices.
    pub fn validate(self) -> Result<QuizSet, QuizDataError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(QuizDataError::EmptyTitle);
        }
        if self.variants.is_empty() {
            return Err(QuizDataError::NoVariants);
        }

        let variants = self
            .variants
            .into_iter()
            .enumerate()
            .map(|(variant, draft)| draft.validate(variant))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QuizSet {
            title,
            description: self.description,
            variants,
        })
    }
}

impl QuizVariantDraft {
    fn validate(self, variant: usize) -> Result<QuizVariant, QuizDataError> {
        if self.questions.is_empty() {
            return Err(QuizDataError::EmptyVariant { variant });
        }

        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(question, draft)| draft.validate(variant, question))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QuizVariant { questions })
    }
}

impl QuizQuestionDraft {
    fn validate(self, variant: usize, question: usize) -> Result<QuizQuestion, QuizDataError> {
        let text = PromptText::parse(self.text).map_err(|source| QuizDataError::InvalidPrompt {
            variant,
            question,
            source,
        })?;
        let answer =
            ChoiceText::parse(self.answer).map_err(|source| QuizDataError::InvalidAnswer {
                variant,
                question,
                source,
            })?;

        if self.distractors.is_empty() {
            return Err(QuizDataError::NoDistractors { variant, question });
        }

        let distractors = self
            .distractors
            .into_iter()
            .enumerate()
            .map(|(distractor, raw)| {
                ChoiceText::parse(raw).map_err(|source| QuizDataError::InvalidDistractor {
                    variant,
                    question,
                    distractor,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::with_capacity(distractors.len() + 1);
        for choice in std::iter::once(&answer).chain(distractors.iter()) {
            if !seen.insert(choice.normalized()) {
                return Err(QuizDataError::DuplicateChoice {
                    variant,
                    question,
                    text: choice.normalized().to_string(),
                });
            }
        }

        Ok(QuizQuestion {
            text,
            answer,
            distractors,
        })
    }
}

//
// ─── VALIDATED CONTENT ─────────────────────────────────────────────────────────
//

/// A quiz challenge with one or more interchangeable variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSet {
    title: String,
    description: String,
    variants: Vec<QuizVariant>,
}

impl QuizSet {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn variants(&self) -> &[QuizVariant] {
        &self.variants
    }

    #[must_use]
    pub fn variant(&self, index: usize) -> Option<&QuizVariant> {
        self.variants.get(index)
    }

    /// Always at least 1 for a validated set.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}

/// One selectable version of a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizVariant {
    questions: Vec<QuizQuestion>,
}

impl QuizVariant {
    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Always at least 1 for a validated variant.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    text: PromptText,
    answer: ChoiceText,
    distractors: Vec<ChoiceText>,
}

impl QuizQuestion {
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        self.answer.as_str()
    }

    #[must_use]
    pub fn distractors(&self) -> &[ChoiceText] {
        &self.distractors
    }

    /// Identity assigned to the correct answer.
    #[must_use]
    pub fn correct_choice(&self) -> ChoiceId {
        ChoiceId::new(choice_number(self.distractors.len()))
    }

    /// Every option in canonical order: distractors first, then the answer.
    #[must_use]
    pub fn choices(&self) -> Vec<PresentedChoice> {
        let correct = self.correct_choice();
        self.distractors
            .iter()
            .enumerate()
            .map(|(index, text)| PresentedChoice {
                id: ChoiceId::new(choice_number(index)),
                text: text.clone(),
                is_correct: false,
            })
            .chain(std::iter::once(PresentedChoice {
                id: correct,
                text: self.answer.clone(),
                is_correct: true,
            }))
            .collect()
    }
}

fn choice_number(index: usize) -> u32 {
    u32::try_from(index).map_or(u32::MAX, |n| n.saturating_add(1))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, answer: &str, distractors: &[&str]) -> QuizQuestionDraft {
        QuizQuestionDraft {
            text: text.to_string(),
            answer: answer.to_string(),
            distractors: distractors.iter().map(ToString::to_string).collect(),
        }
    }

    fn draft(questions: Vec<QuizQuestionDraft>) -> QuizSetDraft {
        QuizSetDraft {
            title: "HTML Basics Quiz".to_string(),
            description: String::new(),
            variants: vec![QuizVariantDraft { questions }],
        }
    }

    #[test]
    fn valid_draft_builds_quiz_set() {
        let set = draft(vec![question("Which tag?", "<p>", &["<a>", "<b>", "<i>"])])
            .validate()
            .unwrap();

        assert_eq!(set.title(), "HTML Basics Quiz");
        assert_eq!(set.variant_count(), 1);
        let q = &set.variants()[0].questions()[0];
        assert_eq!(q.text(), "Which tag?");
        assert_eq!(q.correct_choice(), ChoiceId::new(4));
    }

    #[test]
    fn choices_tag_exactly_one_correct_option() {
        let set = draft(vec![question("Q", "A", &["D1", "D2", "D3"])])
            .validate()
            .unwrap();
        let choices = set.variants()[0].questions()[0].choices();

        assert_eq!(choices.len(), 4);
        let correct: Vec<_> = choices.iter().filter(|c| c.is_correct).collect();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].text(), "A");
        assert_eq!(correct[0].id, ChoiceId::new(4));
        assert_eq!(choices[0].id, ChoiceId::new(1));
    }

    #[test]
    fn zero_variants_is_rejected() {
        let mut set = draft(Vec::new());
        set.variants.clear();
        assert_eq!(set.validate().unwrap_err(), QuizDataError::NoVariants);
    }

    #[test]
    fn empty_variant_is_rejected() {
        let err = draft(Vec::new()).validate().unwrap_err();
        assert_eq!(err, QuizDataError::EmptyVariant { variant: 0 });
    }

    #[test]
    fn question_without_distractors_is_rejected() {
        let err = draft(vec![
            question("Q1", "A", &["B"]),
            question("Q2", "A", &[]),
        ])
        .validate()
        .unwrap_err();
        assert_eq!(
            err,
            QuizDataError::NoDistractors {
                variant: 0,
                question: 1
            }
        );
    }

    #[test]
    fn duplicate_choice_text_is_rejected() {
        let err = draft(vec![question("Q", "Same", &["Other", " Same "])])
            .validate()
            .unwrap_err();
        assert!(matches!(err, QuizDataError::DuplicateChoice { text, .. } if text == "Same"));
    }

    #[test]
    fn blank_distractor_is_rejected() {
        let err = draft(vec![question("Q", "A", &["B", "  "])])
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            QuizDataError::InvalidDistractor { distractor: 1, .. }
        ));
    }

    #[test]
    fn draft_deserializes_from_content_json() {
        let raw = r#"{
            "title": "CSS Quiz",
            "quizzes": [
                { "questions": [ { "text": "Q", "answer": "A", "distractors": ["B", "C"] } ] }
            ]
        }"#;
        let draft: QuizSetDraft = serde_json::from_str(raw).unwrap();
        let set = draft.validate().unwrap();
        assert_eq!(set.description(), "");
        assert_eq!(set.variants()[0].question_count(), 1);
    }
}
