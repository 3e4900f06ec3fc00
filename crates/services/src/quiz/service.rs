use std::fmt;

use quiz_core::model::{ChoiceId, QuizDataError, QuizSet, QuizSetDraft};
use quiz_core::{PassingGrade, Score};
use rand::Rng;
use tracing::{debug, info, warn};

use super::plan::{PlannedQuestion, QuizPlan};
use super::progress::QuizProgress;
use super::report::QuizOutcome;
use crate::error::QuizSessionError;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where an attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Answering,
    PendingConfirmation,
    Submitted { passed: bool },
}

/// Answer to "can I finish now?".
///
/// `unanswered` holds 0-based question indices in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishRequest {
    pub ready: bool,
    pub unanswered: Vec<usize>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz attempt, from variant selection to submission.
///
/// Option order is fixed when the session is created. Answers can change freely
/// until `validate` runs; after that the session is locked.
pub struct QuizSession {
    variant_index: usize,
    questions: Vec<PlannedQuestion>,
    selected: Vec<Option<ChoiceId>>,
    passing_grade: PassingGrade,
    pending_confirmation: bool,
    validated: bool,
    correct_count: usize,
    passed: bool,
    has_submitted: bool,
}

impl QuizSession {
    /// Start an attempt: pick a variant and shuffle every question's options.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::InvalidQuizData` if the set has no variants or
    /// the picked variant has no questions.
    pub fn initialize<R: Rng>(
        quiz: &QuizSet,
        passing_grade: PassingGrade,
        rng: &mut R,
    ) -> Result<Self, QuizSessionError> {
        let plan = QuizPlan::build(quiz, rng).ok_or(QuizDataError::NoVariants)?;
        let session = Self::from_plan(plan, passing_grade)?;
        info!(
            title = quiz.title(),
            variant = session.variant_index,
            variants = quiz.variant_count(),
            questions = session.total_questions(),
            "quiz session initialized"
        );
        Ok(session)
    }

    /// Validate raw content and start an attempt in one step.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::InvalidQuizData` if the content is malformed.
    pub fn from_draft<R: Rng>(
        draft: QuizSetDraft,
        passing_grade: PassingGrade,
        rng: &mut R,
    ) -> Result<Self, QuizSessionError> {
        let quiz = draft.validate()?;
        Self::initialize(&quiz, passing_grade, rng)
    }

    /// Build a session from a precomputed plan.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::InvalidQuizData` if the plan has no questions
    /// or a question's options cannot be graded (see `PlannedQuestion::check`).
    pub fn from_plan(plan: QuizPlan, passing_grade: PassingGrade) -> Result<Self, QuizSessionError> {
        if plan.questions.is_empty() {
            return Err(QuizDataError::EmptyVariant {
                variant: plan.variant_index,
            }
            .into());
        }
        for (question, planned) in plan.questions.iter().enumerate() {
            planned.check(plan.variant_index, question)?;
        }

        let selected = vec![None; plan.questions.len()];
        Ok(Self {
            variant_index: plan.variant_index,
            questions: plan.questions,
            selected,
            passing_grade,
            pending_confirmation: false,
            validated: false,
            correct_count: 0,
            passed: false,
            has_submitted: false,
        })
    }

    #[must_use]
    pub fn variant_index(&self) -> usize {
        self.variant_index
    }

    #[must_use]
    pub fn passing_grade(&self) -> PassingGrade {
        self.passing_grade
    }

    #[must_use]
    pub fn questions(&self) -> &[PlannedQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&PlannedQuestion> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn selected_answer(&self, index: usize) -> Option<ChoiceId> {
        self.selected.get(index).copied().flatten()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selected.iter().filter(|s| s.is_some()).count()
    }

    /// 0-based indices of questions without an answer, ascending.
    #[must_use]
    pub fn unanswered(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(index, s)| s.is_none().then_some(index))
            .collect()
    }

    #[must_use]
    pub fn validated(&self) -> bool {
        self.validated
    }

    #[must_use]
    pub fn has_submitted(&self) -> bool {
        self.has_submitted
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Number of correct answers; 0 until validation.
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.has_submitted {
            QuizPhase::Submitted {
                passed: self.passed,
            }
        } else if self.pending_confirmation {
            QuizPhase::PendingConfirmation
        } else {
            QuizPhase::Answering
        }
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let answered = self.answered_count();
        QuizProgress {
            total: self.total_questions(),
            answered,
            remaining: self.total_questions().saturating_sub(answered),
            is_submitted: self.has_submitted,
        }
    }

    /// Score and verdict, available once validated.
    #[must_use]
    pub fn outcome(&self) -> Option<QuizOutcome> {
        self.validated.then(|| QuizOutcome {
            score: Score::new(self.correct_count, self.total_questions()),
            passing_grade: self.passing_grade,
            passed: self.passed,
        })
    }

    /// Whether the stored answer for `index` is correct; `None` before validation.
    #[must_use]
    pub fn is_answer_correct(&self, index: usize) -> Option<bool> {
        if !self.validated {
            return None;
        }
        let question = self.questions.get(index)?;
        Some(self.selected_answer(index) == Some(question.correct))
    }

    /// Leaving before submission must be confirmed by the learner.
    #[must_use]
    pub fn can_leave_without_confirmation(&self) -> bool {
        self.has_submitted
    }

    /// Record the learner's choice for a question, replacing any earlier one.
    ///
    /// Ignored once the attempt is submitted. Choosing an answer while a finish
    /// confirmation is pending drops back to answering.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::IndexOutOfRange` for an unknown question and
    /// `QuizSessionError::UnknownChoice` for an option the question does not offer.
    pub fn select_answer(
        &mut self,
        index: usize,
        choice: ChoiceId,
    ) -> Result<&Self, QuizSessionError> {
        let len = self.questions.len();
        let Some(question) = self.questions.get(index) else {
            warn!(index, len, "answer selected for unknown question");
            return Err(QuizSessionError::IndexOutOfRange { index, len });
        };
        if !question.offers(choice) {
            warn!(index, %choice, "answer selected that the question does not offer");
            return Err(QuizSessionError::UnknownChoice {
                question: index,
                choice,
            });
        }

        if self.has_submitted {
            debug!(index, "answer change ignored after submission");
            return Ok(&*self);
        }

        self.selected[index] = Some(choice);
        self.pending_confirmation = false;
        debug!(index, %choice, "answer selected");
        Ok(&*self)
    }

    /// Check whether every question has an answer.
    ///
    /// When ready, the session waits for the learner to confirm. Nothing changes
    /// when questions are still open or the attempt is already submitted.
    pub fn request_finish(&mut self) -> FinishRequest {
        if self.has_submitted {
            return FinishRequest {
                ready: false,
                unanswered: Vec::new(),
            };
        }

        let unanswered = self.unanswered();
        let ready = unanswered.is_empty();
        if ready {
            self.pending_confirmation = true;
        } else {
            debug!(?unanswered, "finish requested with unanswered questions");
        }
        FinishRequest { ready, unanswered }
    }

    /// Back out of a pending finish confirmation.
    pub fn cancel_finish(&mut self) {
        if self.pending_confirmation {
            debug!("finish confirmation cancelled");
            self.pending_confirmation = false;
        }
    }

    /// Grade the attempt and lock it.
    ///
    /// Calling again after validation returns the existing result unchanged.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Unanswered` if any question has no answer.
    pub fn validate(&mut self) -> Result<&Self, QuizSessionError> {
        if self.validated {
            return Ok(&*self);
        }

        let unanswered = self.unanswered();
        if !unanswered.is_empty() {
            warn!(?unanswered, "validation attempted with unanswered questions");
            return Err(QuizSessionError::Unanswered {
                questions: unanswered,
            });
        }

        self.correct_count = self
            .questions
            .iter()
            .zip(&self.selected)
            .filter(|(question, selected)| **selected == Some(question.correct))
            .count();
        let score = Score::new(self.correct_count, self.questions.len());
        self.passed = score.passes(self.passing_grade);
        self.validated = true;
        self.has_submitted = true;
        self.pending_confirmation = false;

        info!(
            correct = score.correct(),
            total = score.total(),
            passing_grade = self.passing_grade.percent(),
            passed = self.passed,
            "quiz validated"
        );
        Ok(&*self)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("variant_index", &self.variant_index)
            .field("questions_len", &self.questions.len())
            .field("answered", &self.answered_count())
            .field("phase", &self.phase())
            .field("correct_count", &self.correct_count)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
