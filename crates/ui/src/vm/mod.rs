mod quiz_intent;
mod quiz_vm;
mod rich_text;

pub use quiz_intent::{IntentEffect, QuizIntent, apply_intent};
pub use quiz_vm::{
    ButtonVm, ChoiceVm, QuestionValidationVm, QuestionVm, QuizVm, map_quiz, status_message,
};
pub use rich_text::{
    looks_like_html, markdown_to_html, quiz_text_to_html, quiz_text_to_plain, sanitize_html,
    strip_html_tags,
};
