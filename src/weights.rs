//! Per-letter weight table built from letter frequencies.
//!
//! Keys are `(Position, letter)`. `Position::Any` entries hold the
//! position-independent frequency of a letter and are never overwritten;
//! `Position::At(i)` entries start as the frequency of the letter at `i` and
//! are replaced by the updater as feedback accumulates.

use crate::config::{SolverConfig, Weighting};
use crate::debug_log;
use crate::wordbank::Word;
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Any,
    At(usize),
}

/// Value stored for one key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Weight {
    /// Still a soft estimate.
    Unknown(f64),
    /// The letter is known to be at this position.
    Confirmed,
    /// The letter is known not to be at this position.
    Excluded,
}

impl Weight {
    /// Confirmed and excluded weights are hard signals that scoring never
    /// discards.
    #[must_use]
    pub fn is_hard(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

#[derive(Clone, Debug)]
pub struct WeightTable {
    entries: HashMap<(Position, char), Weight>,
    alphabet: BTreeSet<char>,
    /// Letters locked in at each position. Every other letter is excluded
    /// there, seen in the frequency source or not.
    locked: Vec<Option<char>>,
    puzzle_size: usize,
    max_prob: f64,
    weighting: Weighting,
}

impl WeightTable {
    /// Counts letters per position and overall across `source`.
    ///
    /// Words of the wrong length are skipped and do not count towards the
    /// number of source words.
    #[must_use]
    pub fn from_frequency_source(source: &[Word], config: &SolverConfig) -> Self {
        let size = config.puzzle_size;
        let mut counts: HashMap<(Position, char), usize> = HashMap::new();
        let mut word_count = 0usize;
        for word in source.iter().filter(|w| w.len() == size) {
            word_count += 1;
            for (i, &letter) in word.letters().iter().enumerate() {
                *counts.entry((Position::At(i), letter)).or_insert(0) += 1;
                *counts.entry((Position::Any, letter)).or_insert(0) += 1;
            }
        }

        let alphabet = counts
            .keys()
            .filter(|(position, _)| *position == Position::Any)
            .map(|&(_, letter)| letter)
            .collect();

        let entries = counts
            .into_iter()
            .map(|(key, count)| {
                let count = count as f64;
                let value = match (config.weighting, key.0) {
                    (Weighting::Counts, _) => count,
                    (Weighting::Probability, Position::At(_)) => count / word_count as f64,
                    (Weighting::Probability, Position::Any) => {
                        count / (word_count * size) as f64
                    }
                };
                (key, Weight::Unknown(value))
            })
            .collect();

        debug_log!(
            "Built weight table from {} words ({:?} weighting)",
            word_count,
            config.weighting
        );

        Self {
            entries,
            alphabet,
            locked: vec![None; size],
            puzzle_size: size,
            max_prob: config.max_prob,
            weighting: config.weighting,
        }
    }

    #[must_use]
    pub fn get(&self, position: Position, letter: char) -> Option<Weight> {
        self.entries.get(&(position, letter)).copied()
    }

    pub fn set(&mut self, position: usize, letter: char, weight: Weight) {
        self.entries.insert((Position::At(position), letter), weight);
    }

    /// Position-independent estimate of a letter's weight at a single
    /// position, or 0 for letters never seen in the source.
    #[must_use]
    pub fn neutral(&self, letter: char) -> f64 {
        match self.get(Position::Any, letter) {
            Some(Weight::Unknown(value)) => match self.weighting {
                Weighting::Probability => value,
                Weighting::Counts => value / self.puzzle_size as f64,
            },
            _ => 0.0,
        }
    }

    /// Marks `letter` as the only letter allowed at `position`.
    pub fn lock(&mut self, position: usize, letter: char) {
        self.set(position, letter, Weight::Confirmed);
        if let Some(slot) = self.locked.get_mut(position) {
            *slot = Some(letter);
        }
    }

    /// Weight at `position`, falling back to [`WeightTable::neutral`].
    #[must_use]
    pub fn lookup(&self, position: usize, letter: char) -> Weight {
        if let Some(Some(locked)) = self.locked.get(position)
            && *locked != letter
        {
            return Weight::Excluded;
        }
        self.get(Position::At(position), letter)
            .unwrap_or_else(|| Weight::Unknown(self.neutral(letter)))
    }

    #[must_use]
    pub fn score_of(&self, weight: Weight) -> f64 {
        match weight {
            Weight::Unknown(value) => value,
            Weight::Confirmed => self.max_prob,
            Weight::Excluded => self.exclusion_score(),
        }
    }

    #[must_use]
    pub fn partial_score(&self, position: usize, letter: char) -> f64 {
        self.score_of(self.lookup(position, letter))
    }

    #[must_use]
    pub fn exclusion_score(&self) -> f64 {
        -(self.puzzle_size as f64) * self.max_prob
    }

    /// Letters seen anywhere in the frequency source, in order.
    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.alphabet.iter().copied()
    }

    #[must_use]
    pub fn puzzle_size(&self) -> usize {
        self.puzzle_size
    }
}
