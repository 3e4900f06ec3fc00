#![forbid(unsafe_code)]

pub mod nav;
pub mod vm;

pub use nav::{NAVIGATION_WARNING, leave_prompt};
pub use vm::{IntentEffect, QuizIntent, QuizVm, apply_intent, map_quiz};
