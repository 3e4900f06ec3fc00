use std::sync::Arc;

use quiz_core::model::ChoiceId;
use tracing::{debug, info};

use super::report::{QuizOutcome, QuizReporter};
use super::service::{QuizPhase, QuizSession};
use crate::error::QuizSessionError;

/// Confirmation dialog the host should currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizModal {
    None,
    FinishConfirmation,
    ExitConfirmation,
}

/// Result of pressing "finish".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishStep {
    /// Some questions are open (0-based indices); no dialog opens.
    Unanswered(Vec<usize>),
    AwaitingConfirmation,
    AlreadySubmitted,
}

/// Result of pressing "submit and go".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceStep {
    Advance(QuizOutcome),
    Blocked,
}

/// What the host's navigation hooks should do with a leave attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    Allow,
    Confirm,
}

/// Drives one attempt the way the quiz page does: finish and exit both go
/// through a confirmation dialog, and the outcome is reported on submission.
pub struct QuizFlow {
    session: QuizSession,
    reporter: Arc<dyn QuizReporter>,
    unanswered: Vec<usize>,
    exit_pending: bool,
    exit_confirmed: bool,
}

impl QuizFlow {
    #[must_use]
    pub fn new(session: QuizSession, reporter: Arc<dyn QuizReporter>) -> Self {
        Self {
            session,
            reporter,
            unanswered: Vec::new(),
            exit_pending: false,
            exit_confirmed: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Unanswered questions found by the last finish attempt.
    #[must_use]
    pub fn last_unanswered(&self) -> &[usize] {
        &self.unanswered
    }

    #[must_use]
    pub fn modal(&self) -> QuizModal {
        if self.exit_pending {
            QuizModal::ExitConfirmation
        } else if self.session.phase() == QuizPhase::PendingConfirmation {
            QuizModal::FinishConfirmation
        } else {
            QuizModal::None
        }
    }

    /// # Errors
    ///
    /// Propagates `QuizSessionError` from `QuizSession::select_answer`.
    pub fn select_answer(&mut self, question: usize, choice: ChoiceId) -> Result<(), QuizSessionError> {
        self.session.select_answer(question, choice)?;
        Ok(())
    }

    pub fn finish(&mut self) -> FinishStep {
        if self.session.has_submitted() {
            return FinishStep::AlreadySubmitted;
        }
        let request = self.session.request_finish();
        self.unanswered.clone_from(&request.unanswered);
        if request.ready {
            FinishStep::AwaitingConfirmation
        } else {
            FinishStep::Unanswered(request.unanswered)
        }
    }

    pub fn cancel_finish(&mut self) {
        self.session.cancel_finish();
    }

    /// Grade the attempt after the learner confirmed, then notify the reporter.
    ///
    /// Repeated calls return the same outcome without reporting again.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NotPendingConfirmation` if finish was not
    /// confirmed from the pending state.
    pub fn confirm_finish(&mut self) -> Result<QuizOutcome, QuizSessionError> {
        if let Some(outcome) = self.session.outcome() {
            return Ok(outcome);
        }
        if self.session.phase() != QuizPhase::PendingConfirmation {
            return Err(QuizSessionError::NotPendingConfirmation);
        }

        let outcome = self
            .session
            .validate()?
            .outcome()
            .ok_or(QuizSessionError::NotPendingConfirmation)?;
        self.unanswered.clear();
        if outcome.passed {
            self.reporter.on_passed(&outcome);
        } else {
            self.reporter.on_failed(&outcome);
        }
        Ok(outcome)
    }

    /// Move on to the next unit. Only a passed attempt may advance.
    pub fn submit_and_go(&self) -> AdvanceStep {
        match self.session.outcome() {
            Some(outcome) if outcome.passed => {
                info!("advancing after passed quiz");
                self.reporter.on_advance(&outcome);
                AdvanceStep::Advance(outcome)
            }
            _ => AdvanceStep::Blocked,
        }
    }

    /// Open the exit dialog.
    pub fn request_exit(&mut self) {
        self.exit_pending = true;
    }

    /// Returns true when an exit dialog was open and the learner may now leave.
    pub fn confirm_exit(&mut self) -> bool {
        if !self.exit_pending {
            return false;
        }
        debug!("exit confirmed");
        self.exit_pending = false;
        self.exit_confirmed = true;
        true
    }

    pub fn cancel_exit(&mut self) {
        self.exit_pending = false;
    }

    /// Decision for a tab close or page unload.
    #[must_use]
    pub fn on_window_close(&self) -> LeaveDecision {
        self.leave_decision()
    }

    /// Decision for an in-app route change. A confirmed exit is not asked twice.
    #[must_use]
    pub fn on_history_change(&self) -> LeaveDecision {
        self.leave_decision()
    }

    fn leave_decision(&self) -> LeaveDecision {
        if self.exit_confirmed || self.session.can_leave_without_confirmation() {
            LeaveDecision::Allow
        } else {
            LeaveDecision::Confirm
        }
    }
}
