use std::sync::Arc;

use quiz_core::model::QuizId;
use storage::repository::QuizRepository;
use tracing::info;

use super::report::{NoopReporter, QuizReporter};
use super::service::QuizSession;
use super::workflow::QuizFlow;
use crate::error::QuizLoadError;
use crate::settings::QuizSettings;

/// Loads quiz content and opens a fresh attempt for it.
#[derive(Clone)]
pub struct QuizLauncher {
    quizzes: Arc<dyn QuizRepository>,
    settings: QuizSettings,
    reporter: Arc<dyn QuizReporter>,
}

impl QuizLauncher {
    #[must_use]
    pub fn new(quizzes: Arc<dyn QuizRepository>, settings: QuizSettings) -> Self {
        Self {
            quizzes,
            settings,
            reporter: Arc::new(NoopReporter),
        }
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn QuizReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Start a new attempt for the given quiz.
    ///
    /// Every call draws a new variant and option order unless a seed is configured.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoadError::Storage` if the quiz cannot be fetched and
    /// `QuizLoadError::Session` if its content cannot start a session.
    pub async fn start(&self, id: QuizId) -> Result<QuizFlow, QuizLoadError> {
        let quiz = self.quizzes.get_quiz(id).await?;
        let mut rng = self.settings.rng();
        let session = QuizSession::initialize(&quiz, self.settings.passing_grade(), &mut rng)?;
        info!(quiz_id = %id, "quiz attempt started");
        Ok(QuizFlow::new(session, Arc::clone(&self.reporter)))
    }
}
