use quiz_core::model::ChoiceId;
use services::{AdvanceStep, FinishStep, QuizFlow, QuizOutcome, QuizSessionError};
use tracing::debug;

/// Everything the learner can do on the quiz page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    SelectAnswer { question: usize, choice: ChoiceId },
    Finish,
    ConfirmFinish,
    CancelFinish,
    SubmitAndGo,
    Exit,
    ConfirmExit,
    CancelExit,
    /// Keyboard shortcut: finish before passing, submit and go afterwards.
    Execute,
}

/// What the host must do after an intent is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntentEffect {
    Render,
    /// Some questions are open (0-based); the status message lists them.
    ShowUnanswered(Vec<usize>),
    Graded(QuizOutcome),
    AdvanceToNext(QuizOutcome),
    LeaveQuiz,
}

/// Dispatch one intent against the flow.
///
/// # Errors
///
/// Propagates `QuizSessionError` for invalid answer selections or a finish
/// confirmation without a pending request.
pub fn apply_intent(flow: &mut QuizFlow, intent: QuizIntent) -> Result<IntentEffect, QuizSessionError> {
    debug!(?intent, "applying quiz intent");
    let effect = match intent {
        QuizIntent::SelectAnswer { question, choice } => {
            flow.select_answer(question, choice)?;
            IntentEffect::Render
        }
        QuizIntent::Finish => finish(flow),
        QuizIntent::ConfirmFinish => IntentEffect::Graded(flow.confirm_finish()?),
        QuizIntent::CancelFinish => {
            flow.cancel_finish();
            IntentEffect::Render
        }
        QuizIntent::SubmitAndGo => submit_and_go(flow),
        QuizIntent::Exit => {
            flow.request_exit();
            IntentEffect::Render
        }
        QuizIntent::ConfirmExit => {
            if flow.confirm_exit() {
                IntentEffect::LeaveQuiz
            } else {
                IntentEffect::Render
            }
        }
        QuizIntent::CancelExit => {
            flow.cancel_exit();
            IntentEffect::Render
        }
        QuizIntent::Execute => {
            if flow.session().passed() {
                submit_and_go(flow)
            } else {
                finish(flow)
            }
        }
    };
    Ok(effect)
}

fn finish(flow: &mut QuizFlow) -> IntentEffect {
    match flow.finish() {
        FinishStep::Unanswered(unanswered) => IntentEffect::ShowUnanswered(unanswered),
        FinishStep::AwaitingConfirmation | FinishStep::AlreadySubmitted => IntentEffect::Render,
    }
}

fn submit_and_go(flow: &QuizFlow) -> IntentEffect {
    match flow.submit_and_go() {
        AdvanceStep::Advance(outcome) => IntentEffect::AdvanceToNext(outcome),
        AdvanceStep::Blocked => IntentEffect::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::PassingGrade;
    use quiz_core::model::{QuizQuestionDraft, QuizSetDraft, QuizVariantDraft};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use services::{NoopReporter, QuizModal, QuizSession};
    use std::sync::Arc;

    fn flow() -> QuizFlow {
        let draft = QuizSetDraft {
            title: "Intent".to_string(),
            description: String::new(),
            variants: vec![QuizVariantDraft {
                questions: vec![
                    QuizQuestionDraft {
                        text: "First".to_string(),
                        answer: "yes".to_string(),
                        distractors: vec!["no".to_string()],
                    },
                    QuizQuestionDraft {
                        text: "Second".to_string(),
                        answer: "yes".to_string(),
                        distractors: vec!["no".to_string()],
                    },
                ],
            }],
        };
        let session =
            QuizSession::from_draft(draft, PassingGrade::default(), &mut StdRng::seed_from_u64(4))
                .unwrap();
        QuizFlow::new(session, Arc::new(NoopReporter))
    }

    fn select_correct(flow: &mut QuizFlow, question: usize) {
        let choice = flow.session().question(question).unwrap().correct;
        let effect = apply_intent(flow, QuizIntent::SelectAnswer { question, choice }).unwrap();
        assert_eq!(effect, IntentEffect::Render);
    }

    #[test]
    fn execute_walks_through_finish_and_advance() {
        let mut flow = flow();
        select_correct(&mut flow, 1);
        assert_eq!(
            apply_intent(&mut flow, QuizIntent::Execute).unwrap(),
            IntentEffect::ShowUnanswered(vec![0])
        );

        select_correct(&mut flow, 0);
        assert_eq!(
            apply_intent(&mut flow, QuizIntent::Execute).unwrap(),
            IntentEffect::Render
        );
        assert_eq!(flow.modal(), QuizModal::FinishConfirmation);

        let IntentEffect::Graded(outcome) =
            apply_intent(&mut flow, QuizIntent::ConfirmFinish).unwrap()
        else {
            panic!("expected graded effect");
        };
        assert!(outcome.passed);

        assert_eq!(
            apply_intent(&mut flow, QuizIntent::Execute).unwrap(),
            IntentEffect::AdvanceToNext(outcome)
        );
    }

    #[test]
    fn confirm_finish_without_request_is_error() {
        let mut flow = flow();
        let err = apply_intent(&mut flow, QuizIntent::ConfirmFinish).unwrap_err();
        assert_eq!(err, QuizSessionError::NotPendingConfirmation);
    }

    #[test]
    fn exit_requires_confirmation() {
        let mut flow = flow();
        assert_eq!(
            apply_intent(&mut flow, QuizIntent::ConfirmExit).unwrap(),
            IntentEffect::Render
        );
        apply_intent(&mut flow, QuizIntent::Exit).unwrap();
        assert_eq!(flow.modal(), QuizModal::ExitConfirmation);
        assert_eq!(
            apply_intent(&mut flow, QuizIntent::ConfirmExit).unwrap(),
            IntentEffect::LeaveQuiz
        );
    }

    #[test]
    fn submit_and_go_before_passing_does_nothing() {
        let mut flow = flow();
        assert_eq!(
            apply_intent(&mut flow, QuizIntent::SubmitAndGo).unwrap(),
            IntentEffect::Render
        );
    }
}
