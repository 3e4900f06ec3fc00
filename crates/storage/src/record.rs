use std::path::Path;

use quiz_core::model::{QuizId, QuizSet, QuizSetDraft};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

/// On-disk shape of a quiz challenge.
///
/// Content stays in draft form until `into_quiz_set` so malformed files are
/// reported as content errors rather than decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSetRecord {
    pub id: QuizId,
    #[serde(flatten)]
    pub content: QuizSetDraft,
}

impl QuizSetRecord {
    /// Decode a record from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the text is not a valid record.
    pub fn from_json_str(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Read and decode a record from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the file cannot be read, or
    /// `StorageError::Serialization` if it cannot be decoded.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StorageError::Connection(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    /// Validate the content into a domain `QuizSet`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidContent` if validation fails.
    pub fn into_quiz_set(self) -> Result<(QuizId, QuizSet), StorageError> {
        let set = self.content.validate()?;
        Ok((self.id, set))
    }
}
