use crate::error::{Result, SolverError};
use crate::info_log;
use clap::ValueEnum;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const ENGLISH_WORDBANK: &str = include_str!("resources/english.txt");
pub const RUSSIAN_WORDBANK: &str = include_str!("resources/russian.txt");

/// A fixed-length, upper-cased sequence of letters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Word(Vec<char>);

impl Word {
    /// Normalizes case and checks that `text` is exactly `size` letters.
    pub fn parse(text: &str, size: usize) -> Result<Self> {
        let trimmed = text.trim();
        let letters: Vec<char> = trimmed.to_uppercase().chars().collect();
        if letters.len() != size || !letters.iter().all(|c| c.is_alphabetic()) {
            return Err(SolverError::InvalidWord {
                word: trimmed.to_string(),
                expected: size,
            });
        }
        Ok(Self(letters))
    }

    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(&letter)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.0.iter().copied().eq(other.chars())
    }
}

/// Built-in word lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum Language {
    #[default]
    #[value(alias = "en")]
    English,
    #[value(alias = "ru")]
    Russian,
}

impl Language {
    #[must_use]
    pub fn embedded_wordbank(self) -> &'static str {
        match self {
            Self::English => ENGLISH_WORDBANK,
            Self::Russian => RUSSIAN_WORDBANK,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "english"),
            Self::Russian => write!(f, "russian"),
        }
    }
}

/// Keeps every line that is a valid word of `size` letters.
#[must_use]
pub fn load_wordbank_from_str(data: &str, size: usize) -> Vec<Word> {
    data.lines()
        .filter_map(|line| Word::parse(line, size).ok())
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P, size: usize) -> Result<Vec<Word>> {
    let path = path.as_ref();
    let io_error = |source| SolverError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Ok(word) = Word::parse(&line.map_err(io_error)?, size) {
            words.push(word);
        }
    }
    info_log!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// What the solver needs from a word list provider.
pub trait LexiconSource {
    /// Words that may be suggested as guesses.
    fn words(&self) -> &[Word];
    /// Words letter frequencies are computed from.
    fn frequency_source(&self) -> &[Word];
}

#[derive(Clone, Debug)]
pub struct Lexicon {
    words: Vec<Word>,
    source: Option<Vec<Word>>,
}

impl Lexicon {
    /// Builds a lexicon, dropping repeated entries but keeping list order.
    #[must_use]
    pub fn new(words: Vec<Word>) -> Self {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .filter(|word| seen.insert(word.clone()))
            .collect();
        Self {
            words,
            source: None,
        }
    }

    #[must_use]
    pub fn with_frequency_source(mut self, source: Vec<Word>) -> Self {
        self.source = Some(source);
        self
    }

    /// Resolves the guess list and the frequency source from files or the
    /// built-in list for `language`.
    pub fn load(
        input: Option<&Path>,
        source: Option<&Path>,
        language: Language,
        size: usize,
    ) -> Result<Self> {
        let words = match input {
            Some(path) => load_wordbank_from_file(path, size)?,
            None => load_wordbank_from_str(language.embedded_wordbank(), size),
        };
        if words.is_empty() {
            return Err(SolverError::Configuration(format!(
                "word list contains no {size}-letter words"
            )));
        }
        let mut lexicon = Self::new(words);
        if let Some(path) = source {
            let source_words = load_wordbank_from_file(path, size)?;
            if source_words.is_empty() {
                return Err(SolverError::Configuration(format!(
                    "frequency source '{}' contains no {size}-letter words",
                    path.display()
                )));
            }
            lexicon = lexicon.with_frequency_source(source_words);
        }
        Ok(lexicon)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl LexiconSource for Lexicon {
    fn words(&self) -> &[Word] {
        &self.words
    }

    fn frequency_source(&self) -> &[Word] {
        self.source.as_deref().unwrap_or(&self.words)
    }
}
