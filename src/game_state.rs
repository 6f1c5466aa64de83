use crate::config::SolverConfig;
use crate::constraints::{ConstraintState, Feedback, is_solved};
use crate::error::SolverError;
use crate::scoring::{ScoredWord, count_viable};
use crate::solver::SessionState;
use crate::wordbank::{LexiconSource, Word};
use crate::{debug_log, info_log};

/// What the player asked for at the guess prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    /// A word typed by the player, not necessarily one of the suggestions.
    Guess(String),
    /// A suggestion picked by its 1-based number.
    Pick(usize),
    Exit,
    NewGame,
}

/// How a solving session ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionOutcome {
    Solved { word: Word, guesses: usize },
    Exhausted,
    Inconsistent,
    Aborted,
}

/// Front end of the interactive loop.
pub trait GameInterface {
    fn display_suggestions(&mut self, suggestions: &[ScoredWord], round: usize);
    fn read_guess(&mut self) -> Option<UserAction>;
    fn read_feedback(&mut self, guess: &Word) -> Option<Vec<Feedback>>;
    fn display_constraints(&mut self, constraints: &ConstraintState, viable: usize);
    fn display_error(&mut self, error: &SolverError);
    fn display_message(&mut self, message: &str);
    fn display_exhausted(&mut self);
    fn display_solution_found(&mut self, solution: &Word, guesses: usize);
    fn display_exit_message(&mut self);
    fn display_new_game_message(&mut self, word_count: usize);
}

/// One solving session: the current state plus the suggestions shown for it.
struct Game<'a, L: LexiconSource + ?Sized> {
    lexicon: &'a L,
    config: &'a SolverConfig,
    initial: SessionState,
    state: SessionState,
    suggestions: Vec<ScoredWord>,
    active: bool,
}

impl<'a, L: LexiconSource + ?Sized> Game<'a, L> {
    fn new(lexicon: &'a L, config: &'a SolverConfig) -> Self {
        let initial = SessionState::from_lexicon(lexicon, config);
        Self {
            lexicon,
            config,
            state: initial.clone(),
            initial,
            suggestions: Vec::new(),
            active: true,
        }
    }

    fn reset(&mut self) {
        self.state = self.initial.clone();
        self.suggestions.clear();
        self.active = true;
    }

    /// Shows the next suggestions, or ends the session when none are left.
    fn suggest<I: GameInterface + ?Sized>(
        &mut self,
        interface: &mut I,
    ) -> Option<SessionOutcome> {
        match self.state.suggestions(self.lexicon.words(), self.config) {
            Ok(suggestions) => {
                self.suggestions = suggestions;
                let round = self.state.constraints.guess_number + 1;
                interface.display_suggestions(&self.suggestions, round);
                None
            }
            Err(e) => {
                debug_log!("suggest() - {}", e);
                self.active = false;
                interface.display_exhausted();
                Some(SessionOutcome::Exhausted)
            }
        }
    }

    fn resolve_guess(&self, action: &UserAction) -> Result<Word, String> {
        match action {
            UserAction::Pick(n) => n
                .checked_sub(1)
                .and_then(|i| self.suggestions.get(i))
                .map(|s| s.word.clone())
                .ok_or_else(|| format!("There is no suggestion number {n}.")),
            UserAction::Guess(text) => {
                Word::parse(text, self.config.puzzle_size).map_err(|e| e.to_string())
            }
            UserAction::Exit | UserAction::NewGame => Err("Not a guess.".to_string()),
        }
    }

    /// Applies one round. Returns the outcome if the session ended.
    ///
    /// An all-green round still goes through the update so that it is
    /// checked against earlier confirmations before it counts as solved.
    fn play_round<I: GameInterface + ?Sized>(
        &mut self,
        guess: &Word,
        feedback: &[Feedback],
        interface: &mut I,
    ) -> Option<SessionOutcome> {
        let next = match self.state.apply_feedback(guess, feedback, self.config) {
            Ok(next) => next,
            Err(e) => {
                interface.display_error(&e);
                if e.is_fatal_to_session() {
                    self.active = false;
                    return Some(SessionOutcome::Inconsistent);
                }
                return None;
            }
        };

        if is_solved(feedback) {
            let guesses = next.constraints.guess_number;
            info_log!("Solved {} in {} guesses", guess, guesses);
            self.active = false;
            self.state = next;
            interface.display_solution_found(guess, guesses);
            return Some(SessionOutcome::Solved {
                word: guess.clone(),
                guesses,
            });
        }

        self.state = next;
        let viable = count_viable(self.lexicon.words(), &self.state.weights, self.config);
        interface.display_constraints(&self.state.constraints, viable);
        self.suggest(interface)
    }
}

/// Runs sessions until the player exits or input runs out. Returns how each
/// session ended.
pub fn game_loop<L, I>(
    lexicon: &L,
    config: &SolverConfig,
    interface: &mut I,
) -> Vec<SessionOutcome>
where
    L: LexiconSource + ?Sized,
    I: GameInterface + ?Sized,
{
    let mut outcomes = Vec::new();
    let mut game = Game::new(lexicon, config);
    if let Some(outcome) = game.suggest(interface) {
        outcomes.push(outcome);
    }

    loop {
        let Some(action) = interface.read_guess() else {
            continue;
        };

        match action {
            UserAction::Exit => {
                if game.active {
                    outcomes.push(SessionOutcome::Aborted);
                }
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                if game.active {
                    outcomes.push(SessionOutcome::Aborted);
                }
                game.reset();
                interface.display_new_game_message(lexicon.words().len());
                if let Some(outcome) = game.suggest(interface) {
                    outcomes.push(outcome);
                }
            }
            UserAction::Guess(_) | UserAction::Pick(_) if !game.active => {
                interface.display_message(
                    "The game is over. Type 'next' for a new game or 'exit' to quit.",
                );
            }
            action @ (UserAction::Guess(_) | UserAction::Pick(_)) => {
                let guess = match game.resolve_guess(&action) {
                    Ok(guess) => guess,
                    Err(message) => {
                        interface.display_message(&message);
                        continue;
                    }
                };
                let Some(feedback) = interface.read_feedback(&guess) else {
                    continue;
                };
                if let Some(outcome) = game.play_round(&guess, &feedback, interface) {
                    outcomes.push(outcome);
                }
            }
        }
    }

    outcomes
}
