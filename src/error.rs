use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SolverError>;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("cannot read word list '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "position {} was confirmed as '{previous}' and is now reported as '{latest}'",
        position + 1
    )]
    InconsistentFeedback {
        position: usize,
        previous: char,
        latest: char,
    },

    #[error("no word in the lexicon is consistent with the feedback so far")]
    Exhausted,

    #[error("malformed feedback: {0}")]
    MalformedFeedback(String),

    #[error("expected a word of {expected} letters, found \"{word}\"")]
    InvalidWord { word: String, expected: usize },
}

impl SolverError {
    /// Errors that end the current solving session.
    #[must_use]
    pub fn is_fatal_to_session(&self) -> bool {
        matches!(
            self,
            Self::InconsistentFeedback { .. }
                | Self::Exhausted
                | Self::Configuration(_)
                | Self::Io { .. }
        )
    }
}
