// Library interface for wordle-weights
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod constraints;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod scoring;
pub mod solver;
pub mod tui;
pub mod weights;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use config::{ConvergencePolicy, Duplicates, ExhaustionPolicy, SolverConfig, Weighting};
pub use constraints::{ConstraintState, Feedback, parse_feedback};
pub use error::{Result, SolverError};
pub use game_state::{GameInterface, SessionOutcome, UserAction, game_loop};
pub use scoring::{ScoredWord, rank_words, score_word, top_words};
pub use solver::SessionState;
pub use weights::{Position, Weight, WeightTable};
pub use wordbank::{
    Language, Lexicon, LexiconSource, Word, load_wordbank_from_file, load_wordbank_from_str,
};
