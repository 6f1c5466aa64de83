//! Feedback colors and the knowledge accumulated from them.

use crate::error::{Result, SolverError};
use crate::wordbank::Word;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Right letter, right position (green).
    Match,
    /// Letter is in the word somewhere else (yellow).
    PartialMatch,
    /// Letter is not in the word (gray/black).
    NoMatch,
}

impl Feedback {
    /// Parses G, Y, or X/B, in either case.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(Self::Match),
            'Y' => Some(Self::PartialMatch),
            'X' | 'B' => Some(Self::NoMatch),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Match => 'G',
            Self::PartialMatch => 'Y',
            Self::NoMatch => 'X',
        }
    }
}

/// Parses a feedback line such as `GYXXG`.
pub fn parse_feedback(text: &str, size: usize) -> Result<Vec<Feedback>> {
    let text = text.trim();
    let feedback: Option<Vec<Feedback>> = text.chars().map(Feedback::from_char).collect();
    match feedback {
        Some(feedback) if feedback.len() == size => Ok(feedback),
        Some(feedback) => Err(SolverError::MalformedFeedback(format!(
            "expected {size} marks, got {}",
            feedback.len()
        ))),
        None => Err(SolverError::MalformedFeedback(format!(
            "'{text}' may only contain G, Y, and X (or B)"
        ))),
    }
}

#[must_use]
pub fn is_solved(feedback: &[Feedback]) -> bool {
    !feedback.is_empty() && feedback.iter().all(|f| *f == Feedback::Match)
}

/// One guess's feedback split by color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub confirmed: Vec<Option<char>>,
    pub misplaced: Vec<Option<char>>,
    /// Position and letter of every gray mark.
    pub absent: Vec<(usize, char)>,
}

impl Round {
    /// Aligns `feedback` with the letters of `guess`.
    pub fn parse(guess: &Word, feedback: &[Feedback], size: usize) -> Result<Self> {
        if guess.len() != size {
            return Err(SolverError::InvalidWord {
                word: guess.to_string(),
                expected: size,
            });
        }
        if feedback.len() != size {
            return Err(SolverError::MalformedFeedback(format!(
                "expected {size} marks for {guess}, got {}",
                feedback.len()
            )));
        }
        let mut round = Self {
            confirmed: vec![None; size],
            misplaced: vec![None; size],
            absent: Vec::new(),
        };
        for (i, (&letter, mark)) in guess.letters().iter().zip(feedback).enumerate() {
            match mark {
                Feedback::Match => round.confirmed[i] = Some(letter),
                Feedback::PartialMatch => round.misplaced[i] = Some(letter),
                Feedback::NoMatch => round.absent.push((i, letter)),
            }
        }
        Ok(round)
    }
}

/// Knowledge gathered over all rounds of one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintState {
    pub confirmed: Vec<Option<char>>,
    /// Letters known to be in the word but not at this position.
    pub possible: Vec<BTreeSet<char>>,
    pub excluded: BTreeSet<char>,
    pub guess_number: usize,
}

impl ConstraintState {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            confirmed: vec![None; size],
            possible: vec![BTreeSet::new(); size],
            excluded: BTreeSet::new(),
            guess_number: 0,
        }
    }

    /// Positions without a confirmed letter.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.confirmed.iter().filter(|c| c.is_none()).count()
    }

    #[must_use]
    pub fn is_confirmed_anywhere(&self, letter: char) -> bool {
        self.confirmed.contains(&Some(letter))
    }

    #[must_use]
    pub fn is_misplaced_anywhere(&self, letter: char) -> bool {
        self.possible.iter().any(|set| set.contains(&letter))
    }

    /// Locks `letter` at `position`. Returns whether this is new knowledge.
    pub fn confirm(&mut self, position: usize, letter: char) -> Result<bool> {
        match self.confirmed[position] {
            Some(previous) if previous == letter => Ok(false),
            Some(previous) => Err(SolverError::InconsistentFeedback {
                position,
                previous,
                latest: letter,
            }),
            None => {
                self.confirmed[position] = Some(letter);
                Ok(true)
            }
        }
    }

    /// Drops `letter` from every misplaced set. Returns whether it was there.
    pub fn retract_misplaced(&mut self, letter: char) -> bool {
        let mut removed = false;
        for set in &mut self.possible {
            removed |= set.remove(&letter);
        }
        removed
    }

    /// Notes that `letter` is present but not at `position`. Returns `false`
    /// when this was already known.
    ///
    /// Letters already confirmed elsewhere are not added to the misplaced
    /// sets.
    pub fn record_misplaced(&mut self, position: usize, letter: char) -> bool {
        if self.possible[position].contains(&letter) {
            return false;
        }
        if !self.is_confirmed_anywhere(letter) {
            self.possible[position].insert(letter);
        }
        true
    }

    pub fn exclude(&mut self, letter: char) {
        self.excluded.insert(letter);
    }
}

impl fmt::Display for ConstraintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern: String = self.confirmed.iter().map(|c| c.unwrap_or('_')).collect();
        write!(f, "confirmed {pattern}")?;

        let misplaced: Vec<String> = self
            .possible
            .iter()
            .enumerate()
            .filter(|(_, set)| !set.is_empty())
            .map(|(i, set)| format!("{}:{}", i + 1, set.iter().collect::<String>()))
            .collect();
        if !misplaced.is_empty() {
            write!(f, " | misplaced {}", misplaced.join(" "))?;
        }
        if !self.excluded.is_empty() {
            write!(f, " | excluded {}", self.excluded.iter().collect::<String>())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_from_char() {
        assert_eq!(Feedback::from_char('g'), Some(Feedback::Match));
        assert_eq!(Feedback::from_char('Y'), Some(Feedback::PartialMatch));
        assert_eq!(Feedback::from_char('x'), Some(Feedback::NoMatch));
        assert_eq!(Feedback::from_char('B'), Some(Feedback::NoMatch));
        assert_eq!(Feedback::from_char('Q'), None);
    }

    #[test]
    fn test_parse_feedback() {
        let feedback = parse_feedback(" gyXbG ", 5).unwrap();
        assert_eq!(
            feedback,
            vec![
                Feedback::Match,
                Feedback::PartialMatch,
                Feedback::NoMatch,
                Feedback::NoMatch,
                Feedback::Match
            ]
        );
        assert!(matches!(
            parse_feedback("GGG", 5),
            Err(SolverError::MalformedFeedback(_))
        ));
        assert!(matches!(
            parse_feedback("GGGGA", 5),
            Err(SolverError::MalformedFeedback(_))
        ));
        assert!(parse_feedback("", 5).is_err());
    }

    #[test]
    fn test_is_solved() {
        assert!(is_solved(&[Feedback::Match; 5]));
        assert!(!is_solved(&[Feedback::Match, Feedback::NoMatch]));
        assert!(!is_solved(&[]));
    }

    #[test]
    fn test_round_parse() {
        let guess = Word::parse("stare", 5).unwrap();
        let feedback = parse_feedback("XYGXX", 5).unwrap();
        let round = Round::parse(&guess, &feedback, 5).unwrap();
        assert_eq!(round.confirmed, vec![None, None, Some('A'), None, None]);
        assert_eq!(round.misplaced, vec![None, Some('T'), None, None, None]);
        assert_eq!(round.absent, vec![(0, 'S'), (3, 'R'), (4, 'E')]);
    }

    #[test]
    fn test_round_parse_rejects_short_feedback() {
        let guess = Word::parse("stare", 5).unwrap();
        let result = Round::parse(&guess, &[Feedback::Match; 3], 5);
        assert!(matches!(result, Err(SolverError::MalformedFeedback(_))));
    }

    #[test]
    fn test_confirm_detects_contradiction() {
        let mut state = ConstraintState::new(5);
        assert!(state.confirm(2, 'A').unwrap());
        assert!(!state.confirm(2, 'A').unwrap());
        assert!(matches!(
            state.confirm(2, 'O'),
            Err(SolverError::InconsistentFeedback {
                position: 2,
                previous: 'A',
                latest: 'O'
            })
        ));
        assert_eq!(state.missing_count(), 4);
    }

    #[test]
    fn test_misplaced_record_and_retract() {
        let mut state = ConstraintState::new(5);
        assert!(state.record_misplaced(1, 'T'));
        assert!(!state.record_misplaced(1, 'T'));
        assert!(state.record_misplaced(3, 'T'));
        assert!(state.is_misplaced_anywhere('T'));
        assert!(state.retract_misplaced('T'));
        assert!(!state.is_misplaced_anywhere('T'));
        assert!(!state.retract_misplaced('T'));
    }

    #[test]
    fn test_record_misplaced_skips_confirmed_letters() {
        let mut state = ConstraintState::new(5);
        state.confirm(4, 'E').unwrap();
        assert!(state.record_misplaced(0, 'E'));
        assert!(!state.is_misplaced_anywhere('E'));
    }

    #[test]
    fn test_display() {
        let mut state = ConstraintState::new(5);
        state.confirm(2, 'A').unwrap();
        state.record_misplaced(1, 'T');
        state.exclude('S');
        state.exclude('E');
        assert_eq!(state.to_string(), "confirmed __A__ | misplaced 2:T | excluded ES");
    }
}
