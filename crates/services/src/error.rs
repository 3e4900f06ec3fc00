//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::GradeError;
use quiz_core::model::{ChoiceId, QuizDataError};
use storage::repository::StorageError;

/// Errors emitted by `QuizSession` and `QuizFlow`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("invalid quiz data: {0}")]
    InvalidQuizData(#[from] QuizDataError),
    #[error("question index {index} is out of range (quiz has {len} questions)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("choice {choice} is not offered for question {question}")]
    UnknownChoice { question: usize, choice: ChoiceId },
    #[error("questions {questions:?} are unanswered")]
    Unanswered { questions: Vec<usize> },
    #[error("finish has not been requested")]
    NotPendingConfirmation,
}

/// Errors emitted while reading `QuizSettings`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("invalid passing grade {raw:?}")]
    InvalidPassingGrade { raw: String },
    #[error(transparent)]
    PassingGradeRange(#[from] GradeError),
    #[error("invalid seed {raw:?}")]
    InvalidSeed { raw: String },
}

/// Errors emitted while loading a quiz into a new session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizLoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Session(#[from] QuizSessionError),
}
