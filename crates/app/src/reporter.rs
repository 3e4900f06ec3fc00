use services::{QuizOutcome, QuizReporter};
use tracing::info;

/// Reports terminal quiz states through the log.
#[derive(Debug, Default)]
pub struct LogReporter;

impl QuizReporter for LogReporter {
    fn on_passed(&self, outcome: &QuizOutcome) {
        info!(
            correct = outcome.score.correct(),
            total = outcome.score.total(),
            percent = outcome.score.percent(),
            "quiz passed"
        );
    }

    fn on_failed(&self, outcome: &QuizOutcome) {
        info!(
            correct = outcome.score.correct(),
            total = outcome.score.total(),
            percent = outcome.score.percent(),
            passing_grade = outcome.passing_grade.percent(),
            "quiz failed"
        );
    }

    fn on_advance(&self, _outcome: &QuizOutcome) {
        info!("learner advanced to the next unit");
    }
}
