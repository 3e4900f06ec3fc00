mod launcher;
mod plan;
mod progress;
mod report;
mod service;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizSessionError;
pub use launcher::QuizLauncher;
pub use plan::{PlannedQuestion, QuizPlan};
pub use progress::QuizProgress;
pub use report::{NoopReporter, QuizOutcome, QuizReporter};
pub use service::{FinishRequest, QuizPhase, QuizSession};
pub use workflow::{AdvanceStep, FinishStep, LeaveDecision, QuizFlow, QuizModal};
