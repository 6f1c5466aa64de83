use crate::config::{Duplicates, SolverConfig};
use crate::error::{Result, SolverError};
use crate::weights::{Weight, WeightTable};
use crate::wordbank::Word;
use crate::{debug_log, info_log};

#[derive(Clone, Debug, PartialEq)]
pub struct ScoredWord {
    pub word: Word,
    pub score: f64,
}

/// Sums the per-position weights of `word`.
///
/// With [`Duplicates::KeepHighest`] a letter that occurs more than once only
/// counts at its best scoring position (the first one on ties). Confirmed and
/// excluded occurrences are never zeroed.
#[must_use]
pub fn score_word(word: &Word, table: &WeightTable, duplicates: Duplicates) -> f64 {
    let letters = word.letters();
    let weights: Vec<Weight> = letters
        .iter()
        .enumerate()
        .map(|(i, &letter)| table.lookup(i, letter))
        .collect();
    let mut scores: Vec<f64> = weights.iter().map(|&w| table.score_of(w)).collect();

    if duplicates == Duplicates::KeepHighest {
        for (i, &letter) in letters.iter().enumerate() {
            if letters[..i].contains(&letter) {
                continue;
            }
            let group: Vec<usize> = (i..letters.len())
                .filter(|&j| letters[j] == letter)
                .collect();
            if group.len() < 2 {
                continue;
            }
            let mut keep = group[0];
            for &j in &group[1..] {
                if scores[j] > scores[keep] {
                    keep = j;
                }
            }
            for &j in &group {
                if j != keep && !weights[j].is_hard() {
                    scores[j] = 0.0;
                }
            }
        }
    }

    scores.iter().sum()
}

/// Scores every word, best first. Equal scores keep lexicon order.
#[must_use]
pub fn rank_words(words: &[Word], table: &WeightTable, duplicates: Duplicates) -> Vec<ScoredWord> {
    let mut scored: Vec<ScoredWord> = words
        .iter()
        .map(|word| ScoredWord {
            word: word.clone(),
            score: score_word(word, table, duplicates),
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// The `config.top_k` best words, or [`SolverError::Exhausted`] when even the
/// best word breaks the accumulated constraints.
pub fn top_words(
    words: &[Word],
    table: &WeightTable,
    config: &SolverConfig,
) -> Result<Vec<ScoredWord>> {
    let mut ranked = rank_words(words, table, config.duplicates);
    let Some(best) = ranked.first() else {
        return Err(SolverError::Exhausted);
    };
    if config.exhaustion.is_exhausted(best.score) {
        info_log!("Best word {} scores {:.3}, no word left", best.word, best.score);
        return Err(SolverError::Exhausted);
    }
    ranked.truncate(config.top_k);
    debug_log!(
        "Top words: {}",
        ranked
            .iter()
            .map(|s| format!("{}={:.3}", s.word, s.score))
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(ranked)
}

/// Number of words whose score is still above the exhaustion threshold.
#[must_use]
pub fn count_viable(words: &[Word], table: &WeightTable, config: &SolverConfig) -> usize {
    words
        .iter()
        .filter(|word| !config.exhaustion.is_exhausted(score_word(word, table, config.duplicates)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExhaustionPolicy;
    use crate::wordbank::load_wordbank_from_str;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn word(text: &str) -> Word {
        Word::parse(text, 5).unwrap()
    }

    fn table_from(words: &str) -> WeightTable {
        WeightTable::from_frequency_source(
            &load_wordbank_from_str(words, 5),
            &SolverConfig::default(),
        )
    }

    #[test]
    fn test_score_is_sum_of_positional_weights() {
        let table = table_from("stare\nslate\ncrane\nshine");
        let expected: f64 = "STARE"
            .chars()
            .enumerate()
            .map(|(i, c)| table.partial_score(i, c))
            .sum();
        assert!(approx(score_word(&word("stare"), &table, Duplicates::KeepHighest), expected));
    }

    #[test]
    fn test_duplicate_letter_counts_once() {
        let table = table_from("sassy\nbasis\noasis");
        let with_dedup = score_word(&word("sassy"), &table, Duplicates::KeepHighest);
        let without = score_word(&word("sassy"), &table, Duplicates::CountAll);
        assert!(with_dedup < without);

        // Only the best S survives alongside A and Y.
        let best_s = (0..5)
            .filter(|&i| "SASSY".chars().nth(i) == Some('S'))
            .map(|i| table.partial_score(i, 'S'))
            .fold(f64::MIN, f64::max);
        let expected = best_s + table.partial_score(1, 'A') + table.partial_score(4, 'Y');
        assert!(approx(with_dedup, expected));
    }

    #[test]
    fn test_duplicate_ties_keep_one_occurrence() {
        // All three E's have exactly the same partial score.
        let mut table = table_from("geese");
        table.set(1, 'E', Weight::Unknown(0.4));
        table.set(2, 'E', Weight::Unknown(0.4));
        table.set(4, 'E', Weight::Unknown(0.4));
        let score = score_word(&word("geese"), &table, Duplicates::KeepHighest);
        let expected = table.partial_score(0, 'G') + 0.4 + table.partial_score(3, 'S');
        assert!(approx(score, expected));
    }

    #[test]
    fn test_hard_signals_survive_dedup() {
        let mut table = table_from("level\nlever\nlemon");
        table.set(0, 'L', Weight::Confirmed);
        table.set(4, 'L', Weight::Excluded);
        table.set(1, 'E', Weight::Unknown(0.9));
        table.set(3, 'E', Weight::Confirmed);

        let score = score_word(&word("level"), &table, Duplicates::KeepHighest);
        // L: confirmed 1.0 kept, excluded -5.0 kept. E: confirmed 1.0 kept,
        // the soft 0.9 is zeroed because the confirmed copy scores higher.
        let expected = 1.0 + 1.0 - 5.0 + table.partial_score(2, 'V');
        assert!(approx(score, expected));
    }

    #[test]
    fn test_rank_words_is_stable() {
        let table = table_from("abcde");
        let words = load_wordbank_from_str("xyzzy\nqqqqq\nabcde", 5);
        let ranked = rank_words(&words, &table, Duplicates::KeepHighest);
        assert_eq!(ranked[0].word, "ABCDE");
        // Both unknown words score zero and keep their input order.
        assert_eq!(ranked[1].word, "XYZZY");
        assert_eq!(ranked[2].word, "QQQQQ");
    }

    #[test]
    fn test_top_words_truncates() {
        let source = "stare\nslate\ncrane\nshine\nspare\nstore\nshore\nsnare\nscare";
        let table = table_from(source);
        let words = load_wordbank_from_str(source, 5);
        let config = SolverConfig {
            top_k: 3,
            ..SolverConfig::default()
        };
        let top = top_words(&words, &table, &config).unwrap();
        assert_eq!(top.len(), 3);
        assert!(top[0].score >= top[1].score && top[1].score >= top[2].score);
    }

    #[test]
    fn test_top_words_reports_exhaustion() {
        let mut table = table_from("stare");
        for letter in ['S', 'T', 'A', 'R', 'E'] {
            for i in 0..5 {
                table.set(i, letter, Weight::Excluded);
            }
        }
        let words = load_wordbank_from_str("stare\ntears", 5);
        let result = top_words(&words, &table, &SolverConfig::default());
        assert!(matches!(result, Err(SolverError::Exhausted)));
        assert!(matches!(
            top_words(&[], &table, &SolverConfig::default()),
            Err(SolverError::Exhausted)
        ));
    }

    #[test]
    fn test_zero_score_exhaustion_depends_on_policy() {
        let table = table_from("stare");
        let words = load_wordbank_from_str("quick", 5);
        assert!(top_words(&words, &table, &SolverConfig::default()).is_err());

        let lenient = SolverConfig {
            exhaustion: ExhaustionPolicy::Negative,
            ..SolverConfig::default()
        };
        assert_eq!(top_words(&words, &table, &lenient).unwrap().len(), 1);
    }

    #[test]
    fn test_count_viable() {
        let mut table = table_from("stare\nslate");
        for i in 0..5 {
            table.set(i, 'L', Weight::Excluded);
        }
        let words = load_wordbank_from_str("stare\nslate", 5);
        assert_eq!(count_viable(&words, &table, &SolverConfig::default()), 1);
    }
}
