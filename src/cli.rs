use crate::config::{
    ConvergencePolicy, DEFAULT_GREEN_COEFF, DEFAULT_MAX_PROB, DEFAULT_PUZZLE_SIZE, DEFAULT_TOP_K,
    Duplicates, ExhaustionPolicy, SolverConfig, Weighting,
};
use crate::constraints::{ConstraintState, Feedback, parse_feedback};
use crate::error::{Result, SolverError};
use crate::game_state::{GameInterface, UserAction};
use crate::scoring::ScoredWord;
use crate::wordbank::{Language, Word};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Weighted letter-frequency Wordle assistant
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list to suggest guesses from
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Path to a word list to compute letter frequencies from (defaults to the input list)
    #[arg(short = 's', long = "source")]
    pub source_path: Option<PathBuf>,

    /// Built-in word list to use when no input file is given
    #[arg(
        short = 'l',
        long,
        value_enum,
        ignore_case = true,
        default_value_t = Language::English
    )]
    pub language: Language,

    /// Number of letters per word
    #[arg(long = "size", default_value_t = DEFAULT_PUZZLE_SIZE)]
    pub puzzle_size: usize,

    /// Number of suggestions shown per round
    #[arg(short = 'k', long = "top", default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Boost applied to a newly confirmed letter early in the game
    #[arg(long, default_value_t = DEFAULT_GREEN_COEFF)]
    pub green_coeff: f64,

    /// Weight of a confirmed letter
    #[arg(long, default_value_t = DEFAULT_MAX_PROB)]
    pub max_prob: f64,

    /// Weight letters by raw counts instead of probabilities
    #[arg(long)]
    pub counts: bool,

    /// Score every occurrence of a repeated letter
    #[arg(long)]
    pub count_duplicates: bool,

    /// Lock confirmed letters after this many guesses
    #[arg(long, default_value_t = ConvergencePolicy::default().after_guess)]
    pub converge_after: usize,

    /// Lock confirmed letters once at most this many positions are unknown
    #[arg(long, default_value_t = ConvergencePolicy::default().max_missing)]
    pub converge_missing: usize,

    /// Only give up when the best word scores below zero
    #[arg(long)]
    pub strict_exhaustion: bool,

    /// Run the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Log debug output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Write the log to a file in the local data directory
    #[arg(long)]
    pub log_file: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

impl Cli {
    pub fn solver_config(&self) -> Result<SolverConfig> {
        SolverConfig {
            puzzle_size: self.puzzle_size,
            top_k: self.top_k,
            green_coeff: self.green_coeff,
            max_prob: self.max_prob,
            weighting: if self.counts {
                Weighting::Counts
            } else {
                Weighting::Probability
            },
            duplicates: if self.count_duplicates {
                Duplicates::CountAll
            } else {
                Duplicates::KeepHighest
            },
            convergence: ConvergencePolicy {
                after_guess: self.converge_after,
                max_missing: self.converge_missing,
            },
            exhaustion: if self.strict_exhaustion {
                ExhaustionPolicy::Negative
            } else {
                ExhaustionPolicy::NonPositive
            },
        }
        .validate()
    }
}

// UI Input/Output functions

/// Reads one trimmed line. `None` at end of input or on a read error.
fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

pub fn read_guess<R: BufRead>(reader: &mut R, top_k: usize) -> Option<UserAction> {
    println!(
        "\nEnter the word you used (1-{top_k} for a suggestion, or a word), 'next' for a new game, or 'exit':"
    );
    let Some(input) = read_line(reader) else {
        return Some(UserAction::Exit);
    };

    match input.to_lowercase().as_str() {
        "" => None,
        "exit" | "quit" => Some(UserAction::Exit),
        "next" => Some(UserAction::NewGame),
        text => match text.parse::<usize>() {
            Ok(n) => Some(UserAction::Pick(n)),
            Err(_) => Some(UserAction::Guess(input)),
        },
    }
}

/// Asks for feedback on `guess` until it parses. `None` at end of input.
pub fn read_feedback<R: BufRead>(reader: &mut R, guess: &Word) -> Option<Vec<Feedback>> {
    println!("Enter feedback for {guess} (G=green, Y=yellow, X or B=gray, e.g. GYXXG):");
    loop {
        let input = read_line(reader)?;
        match parse_feedback(&input, guess.len()) {
            Ok(feedback) => return Some(feedback),
            Err(e) => println!(
                "Invalid feedback ({e}). Please enter {} marks using G, Y, or X.",
                guess.len()
            ),
        }
    }
}

pub fn display_suggestions(suggestions: &[ScoredWord], round: usize) {
    println!("Round {round}. Best {} words are:", suggestions.len());
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!(
            "({}) >>>>>>> {} <<<<<<< score: {:.3}",
            i + 1,
            suggestion.word,
            suggestion.score
        );
    }
}

pub fn display_constraints(constraints: &ConstraintState, viable: usize) {
    println!("{constraints}");
    println!("{viable} words still fit.");
}

pub fn display_error(error: &SolverError) {
    println!("Error: {error}");
    if matches!(error, SolverError::InconsistentFeedback { .. }) {
        println!("This game cannot continue. Type 'next' to start over.");
    }
}

pub fn display_exhausted() {
    println!("No word in the list fits the feedback. Check your inputs, or type 'next'.");
}

pub fn display_solution_found(solution: &Word, guesses: usize) {
    println!("Solved {solution} by {guesses} guesses!");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

pub fn display_new_game_message(word_count: usize) {
    println!("New game started. Loaded {word_count} words.");
}

/// CLI implementation of the `GameInterface` trait
/// This struct wraps a `BufRead` reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
    top_k: usize,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R, top_k: usize) -> Self {
        Self { reader, top_k }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_suggestions(&mut self, suggestions: &[ScoredWord], round: usize) {
        display_suggestions(suggestions, round);
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        read_guess(&mut self.reader, self.top_k)
    }

    fn read_feedback(&mut self, guess: &Word) -> Option<Vec<Feedback>> {
        read_feedback(&mut self.reader, guess)
    }

    fn display_constraints(&mut self, constraints: &ConstraintState, viable: usize) {
        display_constraints(constraints, viable);
    }

    fn display_error(&mut self, error: &SolverError) {
        display_error(error);
    }

    fn display_message(&mut self, message: &str) {
        println!("{message}");
    }

    fn display_exhausted(&mut self) {
        display_exhausted();
    }

    fn display_solution_found(&mut self, solution: &Word, guesses: usize) {
        display_solution_found(solution, guesses);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        display_new_game_message(word_count);
    }
}
