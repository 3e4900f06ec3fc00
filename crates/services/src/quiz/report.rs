use quiz_core::{PassingGrade, Score};

/// Final result of a submitted attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: Score,
    pub passing_grade: PassingGrade,
    pub passed: bool,
}

/// Host hooks fired when an attempt reaches a terminal state.
///
/// Passing unlocks advancement to the next unit; failing leaves exit as the only option.
pub trait QuizReporter: Send + Sync {
    fn on_passed(&self, outcome: &QuizOutcome);

    fn on_failed(&self, outcome: &QuizOutcome);

    /// The learner chose to move on after passing.
    fn on_advance(&self, outcome: &QuizOutcome);
}

/// Reporter that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl QuizReporter for NoopReporter {
    fn on_passed(&self, _outcome: &QuizOutcome) {}

    fn on_failed(&self, _outcome: &QuizOutcome) {}

    fn on_advance(&self, _outcome: &QuizOutcome) {}
}
