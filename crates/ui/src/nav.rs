use services::{LeaveDecision, QuizFlow};

pub const NAVIGATION_WARNING: &str =
    "Are you sure you want to leave? Your quiz answers will not be saved.";

/// Message to show before leaving, or `None` when leaving needs no prompt.
#[must_use]
pub fn leave_prompt(decision: LeaveDecision) -> Option<&'static str> {
    match decision {
        LeaveDecision::Allow => None,
        LeaveDecision::Confirm => Some(NAVIGATION_WARNING),
    }
}

/// Prompt for a tab close or reload.
#[must_use]
pub fn window_close_prompt(flow: &QuizFlow) -> Option<&'static str> {
    leave_prompt(flow.on_window_close())
}

/// Prompt for an in-app route change; the host re-navigates back if declined.
#[must_use]
pub fn history_change_prompt(flow: &QuizFlow) -> Option<&'static str> {
    leave_prompt(flow.on_history_change())
}
