//! Folding one round of feedback into the weight table.

use crate::config::SolverConfig;
use crate::constraints::{ConstraintState, Feedback, Round};
use crate::error::Result;
use crate::scoring::{ScoredWord, top_words};
use crate::weights::{Weight, WeightTable};
use crate::wordbank::{LexiconSource, Word};
use crate::{debug_log, info_log};

/// Everything one solving session knows.
///
/// Rounds never edit a state in place: [`SessionState::apply_feedback`]
/// returns the next state and leaves `self` untouched, so a rejected round
/// cannot leave half-applied changes behind.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub weights: WeightTable,
    pub constraints: ConstraintState,
}

impl SessionState {
    #[must_use]
    pub fn new(frequency_source: &[Word], config: &SolverConfig) -> Self {
        Self {
            weights: WeightTable::from_frequency_source(frequency_source, config),
            constraints: ConstraintState::new(config.puzzle_size),
        }
    }

    #[must_use]
    pub fn from_lexicon<L: LexiconSource + ?Sized>(lexicon: &L, config: &SolverConfig) -> Self {
        Self::new(lexicon.frequency_source(), config)
    }

    /// Best guesses under the current weights.
    pub fn suggestions(&self, words: &[Word], config: &SolverConfig) -> Result<Vec<ScoredWord>> {
        top_words(words, &self.weights, config)
    }

    pub fn apply_feedback(
        &self,
        guess: &Word,
        feedback: &[Feedback],
        config: &SolverConfig,
    ) -> Result<Self> {
        let round = Round::parse(guess, feedback, config.puzzle_size)?;
        let mut next = self.clone();
        next.constraints.guess_number += 1;
        info_log!(
            "Round {}: {} -> {}",
            next.constraints.guess_number,
            guess,
            feedback.iter().map(|f| f.to_char()).collect::<String>()
        );

        let (newly_confirmed, retracted) = next.confirm(&round)?;
        next.reinstate(&retracted);
        next.exclude(&round);
        let missing = next.constraints.missing_count();
        next.apply_misplaced(&round, missing, config);
        next.apply_confirmed(&newly_confirmed, missing, config);

        debug_log!("State after round: {}", next.constraints);
        Ok(next)
    }

    /// Records green letters and retracts them from the misplaced sets.
    fn confirm(&mut self, round: &Round) -> Result<(Vec<usize>, Vec<char>)> {
        let mut newly_confirmed = Vec::new();
        let mut retracted = Vec::new();
        for (i, letter) in round.confirmed.iter().enumerate() {
            let Some(letter) = *letter else { continue };
            if self.constraints.confirm(i, letter)? {
                newly_confirmed.push(i);
                if self.constraints.retract_misplaced(letter) && !retracted.contains(&letter) {
                    retracted.push(letter);
                }
            }
        }
        Ok((newly_confirmed, retracted))
    }

    /// Undoes earlier misplaced boosts of letters that are now confirmed.
    fn reinstate(&mut self, retracted: &[char]) {
        for &letter in retracted {
            let neutral = self.weights.neutral(letter);
            for i in 0..self.weights.puzzle_size() {
                if !self.weights.lookup(i, letter).is_hard() {
                    self.weights.set(i, letter, Weight::Unknown(neutral));
                }
            }
            debug_log!("Reinstated {} to {:.3}", letter, neutral);
        }
    }

    /// Gray letters. A letter that is known to be in the word is only ruled
    /// out where it cannot be: at the gray position if it is also misplaced,
    /// or everywhere but its confirmed positions otherwise.
    fn exclude(&mut self, round: &Round) {
        let size = self.weights.puzzle_size();
        for &(position, letter) in &round.absent {
            if self.constraints.confirmed[position] == Some(letter) {
                continue;
            }
            let misplaced = round.misplaced.contains(&Some(letter))
                || self.constraints.is_misplaced_anywhere(letter);
            if misplaced {
                self.weights.set(position, letter, Weight::Excluded);
                continue;
            }
            for i in 0..size {
                if self.constraints.confirmed[i] != Some(letter) {
                    self.weights.set(i, letter, Weight::Excluded);
                }
            }
            self.constraints.exclude(letter);
        }
    }

    /// Yellow letters: ruled out at their position, concentrated on the
    /// remaining open positions.
    fn apply_misplaced(&mut self, round: &Round, missing: usize, config: &SolverConfig) {
        let boost = config.max_prob / missing.max(1) as f64;
        for (i, letter) in round.misplaced.iter().enumerate() {
            let Some(letter) = *letter else { continue };
            if !self.constraints.record_misplaced(i, letter) {
                continue;
            }
            self.weights.set(i, letter, Weight::Excluded);
            for j in 0..self.weights.puzzle_size() {
                if j == i || self.constraints.confirmed[j].is_some() {
                    continue;
                }
                if let Weight::Unknown(value) = self.weights.lookup(j, letter)
                    && value > 0.0
                {
                    self.weights.set(j, letter, Weight::Unknown(boost));
                }
            }
        }
    }

    /// Green letters: either locked in for good, or nudged up by the green
    /// coefficient while the game is still young.
    fn apply_confirmed(
        &mut self,
        newly_confirmed: &[usize],
        missing: usize,
        config: &SolverConfig,
    ) {
        if config
            .convergence
            .is_aggressive(self.constraints.guess_number, missing)
        {
            for (i, confirmed) in self.constraints.confirmed.iter().enumerate() {
                if let Some(confirmed) = *confirmed {
                    self.weights.lock(i, confirmed);
                }
            }
            debug_log!("Locked confirmed letters ({} missing)", missing);
            return;
        }

        for &i in newly_confirmed {
            let Some(letter) = self.constraints.confirmed[i] else {
                continue;
            };
            if let Weight::Unknown(value) = self.weights.lookup(i, letter) {
                self.weights
                    .set(i, letter, Weight::Unknown(value * config.green_coeff));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::parse_feedback;
    use crate::error::SolverError;
    use crate::weights::Position;
    use crate::wordbank::load_wordbank_from_str;

    const SOURCE: &str = "stare\nslate\nshine\nsnore\nsport\nheart\nbeast\ncrane\nplant\nmatch";

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn start() -> (SessionState, SolverConfig) {
        let config = SolverConfig::default();
        let words = load_wordbank_from_str(SOURCE, 5);
        (SessionState::new(&words, &config), config)
    }

    fn play(
        state: &SessionState,
        guess: &str,
        marks: &str,
        config: &SolverConfig,
    ) -> Result<SessionState> {
        let guess = Word::parse(guess, 5).unwrap();
        let feedback = parse_feedback(marks, 5).unwrap();
        state.apply_feedback(&guess, &feedback, config)
    }

    #[test]
    fn test_first_round_updates() {
        let (state, config) = start();
        let before_a = state.weights.partial_score(2, 'A');
        let next = play(&state, "stare", "XYGXX", &config).unwrap();

        assert_eq!(next.constraints.guess_number, 1);
        assert_eq!(next.constraints.confirmed[2], Some('A'));
        assert!(next.constraints.possible[1].contains(&'T'));
        for letter in ['S', 'R', 'E'] {
            assert!(next.constraints.excluded.contains(&letter));
            for i in 0..5 {
                assert_eq!(next.weights.lookup(i, letter), Weight::Excluded);
            }
        }
        assert_eq!(next.weights.lookup(1, 'T'), Weight::Excluded);
        // Four open positions share the misplaced T.
        for i in [0, 3, 4] {
            assert_eq!(next.weights.lookup(i, 'T'), Weight::Unknown(0.25));
        }
        // Early confirmation is only boosted.
        assert!(approx(next.weights.partial_score(2, 'A'), before_a * 1.6));

        // The input state is untouched.
        assert_eq!(state.constraints.guess_number, 0);
        assert_eq!(state.constraints.confirmed[2], None);
    }

    #[test]
    fn test_contradiction_is_an_error() {
        let (state, config) = start();
        let next = play(&state, "stare", "XXGXX", &config).unwrap();
        let result = play(&next, "shore", "XXGXX", &config);
        assert!(matches!(
            result,
            Err(SolverError::InconsistentFeedback {
                position: 2,
                previous: 'A',
                latest: 'O'
            })
        ));
    }

    #[test]
    fn test_malformed_feedback_is_rejected() {
        let (state, config) = start();
        let guess = Word::parse("stare", 5).unwrap();
        let result = state.apply_feedback(&guess, &[Feedback::Match; 4], &config);
        assert!(matches!(result, Err(SolverError::MalformedFeedback(_))));
    }

    #[test]
    fn test_promotion_retracts_and_reinstates() {
        let (state, config) = start();
        let round1 = play(&state, "stare", "XYXXX", &config).unwrap();
        assert_eq!(round1.weights.lookup(3, 'T'), Weight::Unknown(0.2));

        // T turns out to be at position 4.
        let round2 = play(&round1, "plant", "XXXXG", &config).unwrap();
        assert!(!round2.constraints.is_misplaced_anywhere('T'));
        assert_eq!(round2.constraints.confirmed[4], Some('T'));

        let neutral = round2.weights.neutral('T');
        assert_eq!(round2.weights.lookup(0, 'T'), Weight::Unknown(neutral));
        assert_eq!(round2.weights.lookup(3, 'T'), Weight::Unknown(neutral));
        // The yellow position stays ruled out.
        assert_eq!(round2.weights.lookup(1, 'T'), Weight::Excluded);
        assert!(approx(round2.weights.partial_score(4, 'T'), neutral * 1.6));
    }

    #[test]
    fn test_confirmed_letter_never_stays_misplaced() {
        let (state, config) = start();
        // E is both green and yellow in the same guess.
        let next = play(&state, "eerie", "YXXXG", &config).unwrap();
        assert_eq!(next.constraints.confirmed[4], Some('E'));
        assert!(!next.constraints.is_misplaced_anywhere('E'));
        assert_eq!(next.weights.lookup(0, 'E'), Weight::Excluded);
        // The gray E only rules out its own position.
        assert_eq!(next.weights.lookup(1, 'E'), Weight::Excluded);
        assert!(!next.constraints.excluded.contains(&'E'));
        assert!(next.weights.partial_score(2, 'E') > 0.0);
    }

    #[test]
    fn test_gray_duplicate_of_green_letter() {
        let (state, config) = start();
        // Only one S, and it is the first letter.
        let next = play(&state, "sassy", "GXXXX", &config).unwrap();
        assert_ne!(next.weights.lookup(0, 'S'), Weight::Excluded);
        for i in 1..5 {
            assert_eq!(next.weights.lookup(i, 'S'), Weight::Excluded);
        }
        assert!(next.constraints.excluded.contains(&'S'));
        assert_eq!(next.constraints.confirmed[0], Some('S'));
    }

    #[test]
    fn test_late_game_locks_confirmations() {
        let (state, config) = start();
        let mut current = state;
        for _ in 0..3 {
            current = play(&current, "plant", "XXXXX", &config).unwrap();
        }
        let locked = play(&current, "stare", "GXXXX", &config).unwrap();
        assert_eq!(locked.constraints.guess_number, 4);
        assert_eq!(locked.weights.lookup(0, 'S'), Weight::Confirmed);
        assert_eq!(locked.weights.lookup(0, 'H'), Weight::Excluded);
        assert_eq!(locked.weights.lookup(0, 'B'), Weight::Excluded);
    }

    #[test]
    fn test_near_solved_locks_confirmations() {
        let (state, config) = start();
        let next = play(&state, "snore", "GXGGG", &config).unwrap();
        assert_eq!(next.constraints.missing_count(), 1);
        assert_eq!(next.weights.lookup(0, 'S'), Weight::Confirmed);
        assert_eq!(next.weights.lookup(2, 'O'), Weight::Confirmed);
        assert_eq!(next.weights.lookup(2, 'A'), Weight::Excluded);
    }

    #[test]
    fn test_convergence_threshold_is_configurable() {
        let words = load_wordbank_from_str(SOURCE, 5);
        let config = SolverConfig {
            convergence: crate::config::ConvergencePolicy {
                after_guess: 0,
                max_missing: 0,
            },
            ..SolverConfig::default()
        };
        let state = SessionState::new(&words, &config);
        let next = play(&state, "stare", "GXXXX", &config).unwrap();
        assert_eq!(next.weights.lookup(0, 'S'), Weight::Confirmed);
    }

    #[test]
    fn test_lock_covers_letters_missing_from_the_source() {
        let config = SolverConfig {
            convergence: crate::config::ConvergencePolicy {
                after_guess: 0,
                max_missing: 0,
            },
            ..SolverConfig::default()
        };
        let source = load_wordbank_from_str("stare\nslate\nsorry", 5);
        let guesses = load_wordbank_from_str("sorry\nzorro", 5);
        let state = SessionState::new(&source, &config);

        let next = play(&state, "slate", "GXXXX", &config).unwrap();
        assert_eq!(next.weights.lookup(0, 'S'), Weight::Confirmed);
        assert_eq!(next.weights.lookup(0, 'Z'), Weight::Excluded);

        let top = next.suggestions(&guesses, &config).unwrap();
        assert_eq!(top[0].word, "SORRY");
        assert!(top[1].score < 0.0);
    }

    #[test]
    fn test_any_position_weights_are_never_rewritten() {
        let (state, config) = start();
        let before = state.weights.get(Position::Any, 'S');
        let next = play(&state, "stare", "XXXXX", &config).unwrap();
        assert_eq!(next.weights.get(Position::Any, 'S'), before);
    }
}
