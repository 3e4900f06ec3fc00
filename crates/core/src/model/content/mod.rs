mod text;

pub use text::{Choice, ChoiceText, Prompt, PromptText, Text, TextError};
