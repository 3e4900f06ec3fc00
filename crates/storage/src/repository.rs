use async_trait::async_trait;
use quiz_core::model::{QuizDataError, QuizId, QuizSet};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    InvalidContent(#[from] QuizDataError),
}

/// Repository contract for quiz content.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Persist or replace a quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the quiz cannot be stored.
    async fn upsert_quiz(&self, id: QuizId, quiz: &QuizSet) -> Result<(), StorageError>;

    /// Fetch a quiz by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_quiz(&self, id: QuizId) -> Result<QuizSet, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    quizzes: Arc<Mutex<HashMap<QuizId, QuizSet>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn upsert_quiz(&self, id: QuizId, quiz: &QuizSet) -> Result<(), StorageError> {
        let mut guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(id, quiz.clone());
        Ok(())
    }

    async fn get_quiz(&self, id: QuizId) -> Result<QuizSet, StorageError> {
        let guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(&id).cloned().ok_or(StorageError::NotFound)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub quizzes: Arc<dyn QuizRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let quizzes: Arc<dyn QuizRepository> = Arc::new(InMemoryRepository::new());
        Self { quizzes }
    }
}
