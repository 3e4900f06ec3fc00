//! Pass/fail rules for a completed quiz attempt.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GradeError {
    #[error("passing grade must be between 0 and 100, got {0}")]
    OutOfRange(u32),
}

/// Minimum percentage of correct answers needed to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassingGrade(u32);

impl PassingGrade {
    pub const DEFAULT_PERCENT: u32 = 80;

    /// # Errors
    ///
    /// Returns `GradeError::OutOfRange` if `percent` exceeds 100.
    pub fn new(percent: u32) -> Result<Self, GradeError> {
        if percent > 100 {
            return Err(GradeError::OutOfRange(percent));
        }
        Ok(Self(percent))
    }

    #[must_use]
    pub fn percent(&self) -> u32 {
        self.0
    }
}

impl Default for PassingGrade {
    fn default() -> Self {
        Self(Self::DEFAULT_PERCENT)
    }
}

/// Correct answers out of the questions in one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    correct: usize,
    total: usize,
}

impl Score {
    /// `correct` is clamped to `total`.
    #[must_use]
    pub fn new(correct: usize, total: usize) -> Self {
        Self {
            correct: correct.min(total),
            total,
        }
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Percentage for display. Pass/fail never goes through this value.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }

    /// Exact comparison of `correct / total * 100 >= grade`, without rounding.
    #[must_use]
    pub fn passes(&self, grade: PassingGrade) -> bool {
        if self.total == 0 {
            return false;
        }
        let lhs = (self.correct as u128) * 100;
        let rhs = u128::from(grade.percent()) * (self.total as u128);
        lhs >= rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grade_is_eighty() {
        assert_eq!(PassingGrade::default().percent(), 80);
    }

    #[test]
    fn grade_above_hundred_is_rejected() {
        assert_eq!(PassingGrade::new(101), Err(GradeError::OutOfRange(101)));
        assert!(PassingGrade::new(100).is_ok());
    }

    #[test]
    fn exactly_eighty_percent_passes() {
        let grade = PassingGrade::default();
        assert!(Score::new(4, 5).passes(grade));
        assert!(!Score::new(3, 5).passes(grade));
        assert!(Score::new(8, 10).passes(grade));
    }

    #[test]
    fn non_multiple_of_five_uses_exact_fraction() {
        let grade = PassingGrade::default();
        // 5/6 = 83.3%, 4/6 = 66.7%
        assert!(Score::new(5, 6).passes(grade));
        assert!(!Score::new(4, 6).passes(grade));
        // 79.9...% must fail without rounding up
        assert!(!Score::new(799, 1000).passes(grade));
        assert!(Score::new(800, 1000).passes(grade));
    }

    #[test]
    fn empty_score_never_passes() {
        assert!(!Score::new(0, 0).passes(PassingGrade::new(0).unwrap()));
        assert!((Score::new(0, 0).percent() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn correct_is_clamped_to_total() {
        let score = Score::new(7, 5);
        assert_eq!(score.correct(), 5);
        assert!((score.percent() - 100.0).abs() < f64::EPSILON);
    }
}
