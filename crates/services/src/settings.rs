//! Quiz configuration read from the environment.

use quiz_core::PassingGrade;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

pub const PASSING_GRADE_VAR: &str = "QUIZ_PASSING_GRADE";
pub const SEED_VAR: &str = "QUIZ_SEED";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuizSettings {
    passing_grade: PassingGrade,
    seed: Option<u64>,
}

/// Unparsed settings, e.g. straight from environment variables or CLI flags.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QuizSettingsDraft {
    pub passing_grade: Option<String>,
    pub seed: Option<String>,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the draft from the process environment, loading `.env` first if present.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the draft through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            passing_grade: lookup(PASSING_GRADE_VAR),
            seed: lookup(SEED_VAR),
        }
    }

    /// Fill unset fields from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            passing_grade: normalize_optional(self.passing_grade)
                .or_else(|| normalize_optional(fallback.passing_grade)),
            seed: normalize_optional(self.seed).or_else(|| normalize_optional(fallback.seed)),
        }
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a present value does not parse or the passing
    /// grade is above 100.
    pub fn validate(self) -> Result<QuizSettings, SettingsError> {
        let passing_grade = match normalize_optional(self.passing_grade) {
            Some(raw) => {
                let percent = raw
                    .trim_end_matches('%')
                    .parse::<u32>()
                    .map_err(|_| SettingsError::InvalidPassingGrade { raw: raw.clone() })?;
                PassingGrade::new(percent)?
            }
            None => PassingGrade::default(),
        };

        let seed = normalize_optional(self.seed)
            .map(|raw| {
                raw.parse::<u64>()
                    .map_err(|_| SettingsError::InvalidSeed { raw: raw.clone() })
            })
            .transpose()?;

        Ok(QuizSettings {
            passing_grade,
            seed,
        })
    }
}

impl QuizSettings {
    #[must_use]
    pub fn new(passing_grade: PassingGrade, seed: Option<u64>) -> Self {
        Self {
            passing_grade,
            seed,
        }
    }

    #[must_use]
    pub fn passing_grade(&self) -> PassingGrade {
        self.passing_grade
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Random source for one attempt: seeded when configured, otherwise fresh entropy.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
