use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("Text must not be empty.")]
    Empty,
}

/// Non-blank text tagged with the role it plays in a question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Text<T>(String, std::marker::PhantomData<T>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prompt;
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Choice;

pub type PromptText = Text<Prompt>;
pub type ChoiceText = Text<Choice>;

impl<T> Text<T> {
    pub fn parse(s: impl Into<String>) -> Result<Self, TextError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(s, std::marker::PhantomData))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text with surrounding whitespace removed, used for duplicate detection.
    pub fn normalized(&self) -> &str {
        self.0.trim()
    }
}
