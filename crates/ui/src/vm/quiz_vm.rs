use quiz_core::model::ChoiceId;
use services::{QuizFlow, QuizModal, QuizProgress, QuizSession};

use crate::vm::rich_text::quiz_text_to_html;

pub const CORRECT_ANSWER: &str = "Correct!";
pub const INCORRECT_ANSWER: &str = "Incorrect.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub id: ChoiceId,
    pub label_html: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionValidationVm {
    pub correct: bool,
    pub message: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    /// 1-based, as shown to the learner.
    pub number: usize,
    pub prompt_html: String,
    pub choices: Vec<ChoiceVm>,
    pub validation: Option<QuestionValidationVm>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonVm {
    pub visible: bool,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub title: String,
    /// Shown under the title; empty when the quiz has no description.
    pub description_html: String,
    pub progress: QuizProgress,
    pub questions: Vec<QuestionVm>,
    pub status_message: String,
    /// Options can no longer be changed.
    pub quiz_disabled: bool,
    pub finish_button: ButtonVm,
    pub submit_and_go_button: ButtonVm,
    pub exit_button: ButtonVm,
    pub modal: QuizModal,
}

#[must_use]
pub fn map_quiz(title: &str, description: &str, flow: &QuizFlow) -> QuizVm {
    let session = flow.session();
    let passed = session.passed();
    let submitted = session.has_submitted();

    QuizVm {
        title: title.to_string(),
        description_html: if description.trim().is_empty() {
            String::new()
        } else {
            quiz_text_to_html(description)
        },
        progress: session.progress(),
        questions: map_questions(session),
        status_message: status_message(flow),
        quiz_disabled: submitted,
        finish_button: ButtonVm {
            visible: !passed,
            enabled: !submitted,
        },
        submit_and_go_button: ButtonVm {
            visible: passed,
            enabled: passed,
        },
        exit_button: ButtonVm {
            visible: true,
            enabled: true,
        },
        modal: flow.modal(),
    }
}

fn map_questions(session: &QuizSession) -> Vec<QuestionVm> {
    session
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = session.selected_answer(index);
            QuestionVm {
                number: index + 1,
                prompt_html: quiz_text_to_html(&question.text),
                choices: question
                    .choices
                    .iter()
                    .map(|choice| ChoiceVm {
                        id: choice.id,
                        label_html: quiz_text_to_html(choice.text()),
                        selected: selected == Some(choice.id),
                    })
                    .collect(),
                validation: session
                    .is_answer_correct(index)
                    .map(|correct| QuestionValidationVm {
                        correct,
                        message: if correct {
                            CORRECT_ANSWER
                        } else {
                            INCORRECT_ANSWER
                        },
                    }),
            }
        })
        .collect()
}

/// Guidance under the quiz: open questions first, then the score once graded.
#[must_use]
pub fn status_message(flow: &QuizFlow) -> String {
    let unanswered = flow.last_unanswered();
    if !unanswered.is_empty() {
        let numbers = unanswered
            .iter()
            .map(|index| (index + 1).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return format!(
            "The following questions are unanswered: {numbers}. You must answer every question."
        );
    }

    match flow.session().outcome() {
        Some(outcome) => format!(
            "You have {} out of {} questions correct.",
            outcome.score.correct(),
            outcome.score.total()
        ),
        None => String::new(),
    }
}
