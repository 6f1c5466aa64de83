//! Session parameters for the weighted solver.

use crate::error::{Result, SolverError};

pub const DEFAULT_PUZZLE_SIZE: usize = 5;
pub const DEFAULT_TOP_K: usize = 7;
pub const DEFAULT_GREEN_COEFF: f64 = 1.6;
pub const DEFAULT_MAX_PROB: f64 = 1.0;

/// How letter frequencies are turned into initial weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Weighting {
    /// Counts divided by the number of source words.
    #[default]
    Probability,
    /// Raw occurrence counts.
    Counts,
}

/// How a letter that occurs more than once in a word is scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Duplicates {
    /// Only the best scoring occurrence counts; confirmed and excluded
    /// occurrences are always kept.
    #[default]
    KeepHighest,
    /// Every occurrence counts.
    CountAll,
}

/// When to stop nudging confirmed letters and lock them in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvergencePolicy {
    pub after_guess: usize,
    pub max_missing: usize,
}

impl Default for ConvergencePolicy {
    fn default() -> Self {
        Self {
            after_guess: 3,
            max_missing: 2,
        }
    }
}

impl ConvergencePolicy {
    #[must_use]
    pub fn is_aggressive(&self, guess_number: usize, missing_count: usize) -> bool {
        guess_number > self.after_guess || missing_count <= self.max_missing
    }
}

/// Which best score means no lexicon word fits the constraints any more.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExhaustionPolicy {
    /// A best score of zero or below.
    #[default]
    NonPositive,
    /// Only a best score strictly below zero.
    Negative,
}

impl ExhaustionPolicy {
    #[must_use]
    pub fn is_exhausted(&self, best_score: f64) -> bool {
        match self {
            Self::NonPositive => best_score <= 0.0,
            Self::Negative => best_score < 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    pub puzzle_size: usize,
    pub top_k: usize,
    pub green_coeff: f64,
    pub max_prob: f64,
    pub weighting: Weighting,
    pub duplicates: Duplicates,
    pub convergence: ConvergencePolicy,
    pub exhaustion: ExhaustionPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            puzzle_size: DEFAULT_PUZZLE_SIZE,
            top_k: DEFAULT_TOP_K,
            green_coeff: DEFAULT_GREEN_COEFF,
            max_prob: DEFAULT_MAX_PROB,
            weighting: Weighting::default(),
            duplicates: Duplicates::default(),
            convergence: ConvergencePolicy::default(),
            exhaustion: ExhaustionPolicy::default(),
        }
    }
}

impl SolverConfig {
    pub fn validate(self) -> Result<Self> {
        if self.puzzle_size == 0 {
            return Err(SolverError::Configuration(
                "puzzle size must be at least 1".to_string(),
            ));
        }
        if self.top_k == 0 {
            return Err(SolverError::Configuration(
                "number of suggestions must be at least 1".to_string(),
            ));
        }
        if !(self.green_coeff.is_finite() && self.green_coeff > 0.0) {
            return Err(SolverError::Configuration(format!(
                "green coefficient must be a positive number, got {}",
                self.green_coeff
            )));
        }
        if !(self.max_prob.is_finite() && self.max_prob > 0.0) {
            return Err(SolverError::Configuration(format!(
                "maximum probability must be a positive number, got {}",
                self.max_prob
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.puzzle_size, 5);
        assert_eq!(config.top_k, 7);
        assert!((config.green_coeff - 1.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_convergence_policy() {
        let policy = ConvergencePolicy::default();
        assert!(!policy.is_aggressive(1, 4));
        assert!(!policy.is_aggressive(3, 3));
        assert!(policy.is_aggressive(4, 5));
        assert!(policy.is_aggressive(1, 2));
    }

    #[test]
    fn test_exhaustion_policy() {
        assert!(ExhaustionPolicy::NonPositive.is_exhausted(0.0));
        assert!(!ExhaustionPolicy::Negative.is_exhausted(0.0));
        assert!(ExhaustionPolicy::Negative.is_exhausted(-0.1));
        assert!(!ExhaustionPolicy::NonPositive.is_exhausted(0.01));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_size = SolverConfig {
            puzzle_size: 0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            zero_size.validate(),
            Err(SolverError::Configuration(_))
        ));

        let zero_top = SolverConfig {
            top_k: 0,
            ..SolverConfig::default()
        };
        assert!(zero_top.validate().is_err());

        let negative_coeff = SolverConfig {
            green_coeff: -1.0,
            ..SolverConfig::default()
        };
        assert!(negative_coeff.validate().is_err());

        let nan_prob = SolverConfig {
            max_prob: f64::NAN,
            ..SolverConfig::default()
        };
        assert!(nan_prob.validate().is_err());

        assert!(SolverConfig::default().validate().is_ok());
    }
}
