#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;
pub mod settings;

pub use error::{QuizLoadError, QuizSessionError, SettingsError};
pub use settings::{QuizSettings, QuizSettingsDraft};

pub use quiz::{
    AdvanceStep, FinishRequest, FinishStep, LeaveDecision, NoopReporter, PlannedQuestion,
    QuizFlow, QuizLauncher, QuizModal, QuizOutcome, QuizPhase, QuizPlan, QuizProgress,
    QuizReporter, QuizSession,
};
