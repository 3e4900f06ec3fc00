use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{ChoiceId, PresentedChoice, QuizDataError, QuizQuestion, QuizSet};

/// A question with its options in the order they are shown for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedQuestion {
    pub text: String,
    pub choices: Vec<PresentedChoice>,
    pub correct: ChoiceId,
}

impl PlannedQuestion {
    fn shuffled<R: Rng>(question: &QuizQuestion, rng: &mut R) -> Self {
        let mut choices = question.choices();
        choices.as_mut_slice().shuffle(rng);
        Self {
            text: question.text().to_string(),
            choices,
            correct: question.correct_choice(),
        }
    }

    /// Check that the options can be graded: at least two, unique ids, and
    /// exactly one correct option whose id is `correct`.
    ///
    /// # Errors
    ///
    /// Returns `QuizDataError::NoDistractors` for fewer than two options and
    /// `QuizDataError::InconsistentChoices` otherwise.
    pub fn check(&self, variant: usize, question: usize) -> Result<(), QuizDataError> {
        if self.choices.len() < 2 {
            return Err(QuizDataError::NoDistractors { variant, question });
        }

        let mut ids = HashSet::with_capacity(self.choices.len());
        let unique = self.choices.iter().all(|c| ids.insert(c.id));
        let mut correct = self.choices.iter().filter(|c| c.is_correct);
        let single_correct = matches!(
            (correct.next(), correct.next()),
            (Some(choice), None) if choice.id == self.correct
        );
        if !unique || !single_correct {
            return Err(QuizDataError::InconsistentChoices { variant, question });
        }
        Ok(())
    }

    /// Returns true when `choice` is one of this question's options.
    #[must_use]
    pub fn offers(&self, choice: ChoiceId) -> bool {
        self.choices.iter().any(|c| c.id == choice)
    }
}

/// Randomized selection for one quiz attempt: which variant, and in what
/// order each question's options appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPlan {
    pub variant_index: usize,
    pub questions: Vec<PlannedQuestion>,
}

impl QuizPlan {
    /// Pick a variant uniformly at random and shuffle every question's options.
    ///
    /// Returns `None` when the set has no variants.
    pub fn build<R: Rng>(quiz: &QuizSet, rng: &mut R) -> Option<Self> {
        let count = quiz.variant_count();
        if count == 0 {
            return None;
        }
        let variant_index = rng.random_range(0..count);
        let variant = quiz.variant(variant_index)?;

        let questions = variant
            .questions()
            .iter()
            .map(|question| PlannedQuestion::shuffled(question, rng))
            .collect();

        Some(Self {
            variant_index,
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuizQuestionDraft, QuizSetDraft, QuizVariantDraft};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn variant(tag: &str) -> QuizVariantDraft {
        QuizVariantDraft {
            questions: vec![QuizQuestionDraft {
                text: format!("Question {tag}"),
                answer: "A".to_string(),
                distractors: vec!["D1".to_string(), "D2".to_string(), "D3".to_string()],
            }],
        }
    }

    fn quiz(variants: usize) -> QuizSet {
        QuizSetDraft {
            title: "Plan".to_string(),
            description: String::new(),
            variants: (0..variants).map(|i| variant(&i.to_string())).collect(),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn plan_keeps_every_choice_and_one_correct() {
        let mut rng = StdRng::seed_from_u64(7);
        let plan = QuizPlan::build(&quiz(1), &mut rng).unwrap();

        let question = &plan.questions[0];
        assert_eq!(question.choices.len(), 4);
        let correct: Vec<_> = question.choices.iter().filter(|c| c.is_correct).collect();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].id, question.correct);
        assert_eq!(correct[0].text(), "A");
        assert!(question.offers(question.correct));
        assert_eq!(question.check(0, 0), Ok(()));
        assert!(!question.offers(ChoiceId::new(99)));
    }

    #[test]
    fn same_seed_gives_same_plan() {
        let set = quiz(3);
        let a = QuizPlan::build(&set, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = QuizPlan::build(&set, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn plan_text_matches_selected_variant() {
        let set = quiz(3);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let plan = QuizPlan::build(&set, &mut rng).unwrap();
            assert_eq!(
                plan.questions[0].text,
                format!("Question {}", plan.variant_index)
            );
        }
    }

    #[test]
    fn variant_selection_covers_all_variants_evenly() {
        let set = quiz(4);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0_usize; 4];
        let trials = 8_000;
        for _ in 0..trials {
            let plan = QuizPlan::build(&set, &mut rng).unwrap();
            counts[plan.variant_index] += 1;
        }
        for count in counts {
            // expected 2000 each
            assert!((1_800..=2_200).contains(&count), "skewed counts: {counts:?}");
        }
    }

    #[test]
    fn shuffle_is_uniform_over_permutations() {
        let set = quiz(1);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let trials = 24_000_usize;
        let mut counts: HashMap<Vec<u32>, usize> = HashMap::new();
        for _ in 0..trials {
            let plan = QuizPlan::build(&set, &mut rng).unwrap();
            let order = plan.questions[0]
                .choices
                .iter()
                .map(|c| c.id.value())
                .collect::<Vec<_>>();
            *counts.entry(order).or_default() += 1;
        }

        // 4 options -> 24 permutations, all of them must show up.
        assert_eq!(counts.len(), 24);

        #[allow(clippy::cast_precision_loss)]
        let expected = trials as f64 / 24.0;
        #[allow(clippy::cast_precision_loss)]
        let chi_square: f64 = counts
            .values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();

        // 23 degrees of freedom; critical value at p = 0.001 is 49.73.
        assert!(chi_square < 49.73, "chi-square too large: {chi_square}");
    }
}
