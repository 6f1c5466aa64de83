//! TUI (Terminal User Interface) module for the weighted solver
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: Core UI component handling rendering and input
//! - `TuiWrapper`: Wrapper that integrates with game loop
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `EnteringGuess` → `MarkingFeedback` → `ConfirmingFeedback` → back to `EnteringGuess`
//! - Terminal state: `GameOver` (solved, no word left, or contradictory feedback)

use crate::constraints::{ConstraintState, Feedback};
use crate::error::SolverError;
use crate::game_state::{GameInterface, UserAction};
use crate::scoring::ScoredWord;
use crate::wordbank::Word;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum LetterState {
    Entered,
    Match,        // Green
    PartialMatch, // Yellow
    NoMatch,      // Gray
}

#[derive(Debug)]
struct GuessRow {
    letters: Vec<char>,
    states: Vec<LetterState>,
}

impl GuessRow {
    fn from_guess(guess: &str) -> Self {
        let letters: Vec<char> = guess.chars().collect();
        Self {
            states: vec![LetterState::Entered; letters.len()],
            letters,
        }
    }
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Entered => (Color::DarkGray, Color::White),
            Self::Match => (Color::Green, Color::Black),
            Self::PartialMatch => (Color::Yellow, Color::Black),
            Self::NoMatch => (Color::Gray, Color::White),
        }
    }

    fn to_feedback(self) -> Feedback {
        match self {
            Self::Match => Feedback::Match,
            Self::PartialMatch => Feedback::PartialMatch,
            Self::NoMatch | Self::Entered => Feedback::NoMatch,
        }
    }
}

#[derive(Debug)]
enum TuiState {
    EnteringGuess,
    MarkingFeedback {
        marking_index: usize,
    },
    ConfirmingFeedback,
    /// Session has ended - message stored in interface.message
    GameOver,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    guesses: &'a [GuessRow],
    current_input: &'a str,
    word_length: usize,
    state: &'a TuiState,
    suggestions: &'a [ScoredWord],
    round: usize,
    knowledge: &'a str,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    word_length: usize,
    top_k: usize,
    guesses: Vec<GuessRow>,
    current_input: String,
    state: TuiState,
    suggestions: Vec<ScoredWord>,
    round: usize,
    knowledge: String,
    message: String,
    error_message: String,
    status: String,
    feedback_confirmed: bool,
    exit_requested: bool,
}

impl TuiInterface {
    pub fn new(word_length: usize, top_k: usize) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            word_length,
            top_k,
            guesses: Vec::new(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            suggestions: Vec::new(),
            round: 1,
            knowledge: String::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
            feedback_confirmed: false,
            exit_requested: false,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            guesses: &self.guesses,
            current_input: &self.current_input,
            word_length: self.word_length,
            state: &self.state,
            suggestions: &self.suggestions,
            round: self.round,
            knowledge: &self.knowledge,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Game board
                Constraint::Min(8),     // Suggestions and knowledge
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state, ctx.suggestions.len());
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDLE WEIGHTS")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default()
            .title("Guesses")
            .borders(Borders::ALL)
            .style(Style::default());

        let inner = block.inner(area);
        f.render_widget(block, area);

        let available_rows = (inner.height / ROW_SPACING) as usize;
        let showing_current_input = matches!(ctx.state, TuiState::EnteringGuess);
        let rows_needed = ctx.guesses.len() + usize::from(showing_current_input);

        // Most recent guesses win when the board is full
        let skip_count = rows_needed.saturating_sub(available_rows);
        let visible = ctx.guesses.len() - skip_count.min(ctx.guesses.len());

        for (display_index, guess) in ctx.guesses.iter().skip(skip_count).enumerate() {
            let marking = match ctx.state {
                TuiState::MarkingFeedback { marking_index } if display_index + 1 == visible => {
                    Some(*marking_index)
                }
                _ => None,
            };
            Self::render_guess_row(f, guess, display_index, inner, marking);
        }

        if showing_current_input && available_rows > 0 {
            let display_row = visible.min(available_rows - 1);
            Self::render_current_input(f, display_row, inner, ctx.current_input, ctx.word_length);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_guess_row(
        f: &mut Frame,
        guess: &GuessRow,
        row_index: usize,
        area: Rect,
        marking: Option<usize>,
    ) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for (letter, state) in guess.letters.iter().zip(&guess.states) {
            let (bg_color, fg_color) = state.colors();
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }

        // Highlight the letter being marked
        if let Some(marking_index) = marking {
            spans.push(Span::raw(format!(
                " <- Marking letter {} (G/Y/X)",
                marking_index + 1
            )));
        }

        Self::render_line(f, area, y, spans);
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let line = Line::from(spans);
        let paragraph = Paragraph::new(line);
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_current_input(
        f: &mut Frame,
        row_index: usize,
        area: Rect,
        current_input: &str,
        word_length: usize,
    ) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for i in 0..word_length {
            let letter = current_input.chars().nth(i).unwrap_or(' ');
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
            spans.push(Span::raw(" "));
        }

        Self::render_line(f, area, y, spans);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if !ctx.suggestions.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                format!("Round {} - best {} words:", ctx.round, ctx.suggestions.len()),
                HEADER_STYLE,
            )]));
            for (i, suggestion) in ctx.suggestions.iter().enumerate() {
                let style = if i == 0 { SUCCESS_STYLE } else { Style::default() };
                lines.push(Line::from(vec![Span::styled(
                    format!("  {}. {}  ({:.3})", i + 1, suggestion.word, suggestion.score),
                    style,
                )]));
            }
            lines.push(Line::from(""));
        }

        if !ctx.knowledge.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.knowledge, INFO_STYLE)]));
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                ctx.error_message,
                ERROR_STYLE,
            )]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Suggestions").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState, suggestion_count: usize) {
        let text = match state {
            TuiState::EnteringGuess => format!(
                "Type your guess or press 1-{} for a suggestion | ENTER: Submit | ESC: Quit",
                suggestion_count.clamp(1, 9)
            ),
            TuiState::MarkingFeedback { .. } => {
                "G: Green (correct) | Y: Yellow (wrong position) | X: Gray (not in word) | BACKSPACE: Go back"
                    .to_string()
            }
            TuiState::ConfirmingFeedback => {
                "ENTER: Confirm feedback | BACKSPACE: Go back and edit".to_string()
            }
            TuiState::GameOver => "N: New Game | ESC: Quit".to_string(),
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            // No event available, return None to continue the loop
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            debug_log!("handle_input() - Ignoring non-key event");
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Filter out invalid characters that come from terminal focus events (alt-tab)
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!(
                "handle_input() - Ignoring invalid character from escape sequence: {:?}",
                c
            );
            return Ok(None);
        }

        debug_log!(
            "handle_input() - Key event received: code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );
        let action = match &self.state {
            TuiState::EnteringGuess => self.handle_guess_input(key),
            TuiState::MarkingFeedback { .. } => self.handle_feedback_input(key),
            TuiState::ConfirmingFeedback => self.handle_confirming_feedback_input(key),
            TuiState::GameOver => Self::handle_game_over_input(key),
        };
        Ok(action)
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();

        if Self::has_modifier_keys(&key) {
            debug_log!(
                "handle_guess_input() - Ignoring key with modifier: {:?}",
                key.modifiers
            );
            return None;
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() && self.current_input.is_empty() => {
                let pick = c.to_digit(10).unwrap_or(0) as usize;
                match pick.checked_sub(1).and_then(|i| self.suggestions.get(i)) {
                    Some(suggestion) => {
                        let guess = suggestion.word.to_string();
                        info_log!("handle_guess_input() - Picked suggestion {}: {}", pick, guess);
                        return Some(UserAction::Guess(guess));
                    }
                    None => {
                        self.error_message = format!("There is no suggestion number {pick}.");
                    }
                }
            }
            KeyCode::Char(c)
                if c.is_alphabetic() && self.current_input.chars().count() < self.word_length =>
            {
                self.current_input.extend(c.to_uppercase());
                debug_log!("handle_guess_input() - Input now: '{}'", self.current_input);
            }
            KeyCode::Backspace if !self.current_input.is_empty() => {
                self.current_input.pop();
            }
            KeyCode::Enter if self.current_input.chars().count() == self.word_length => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting guess: '{}'", guess);
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Enter => {
                self.error_message = format!("Guess must be exactly {} letters!", self.word_length);
            }
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                return Some(UserAction::Exit);
            }
            KeyCode::Char(c) if !c.is_alphabetic() => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            _ => {
                debug_log!("handle_guess_input() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn handle_feedback_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        let TuiState::MarkingFeedback { marking_index } = self.state else {
            return None;
        };
        if Self::has_modifier_keys(&key) {
            return None;
        }
        let Some(last_guess) = self.guesses.last_mut() else {
            return None;
        };

        let mark = match key.code {
            KeyCode::Esc => {
                info_log!("handle_feedback_input() - ESC pressed, returning Exit");
                return Some(UserAction::Exit);
            }
            KeyCode::Char('g' | 'G') => LetterState::Match,
            KeyCode::Char('y' | 'Y') => LetterState::PartialMatch,
            KeyCode::Char('x' | 'X' | 'b' | 'B') => LetterState::NoMatch,
            KeyCode::Backspace if marking_index > 0 => {
                // Reset the state of the previous letter before going back
                last_guess.states[marking_index - 1] = LetterState::Entered;
                self.state = TuiState::MarkingFeedback {
                    marking_index: marking_index - 1,
                };
                return None;
            }
            KeyCode::Char(c) => {
                self.error_message = format!(
                    "Invalid feedback! Use G (green), Y (yellow), or X (gray). ('{c}' is not valid)"
                );
                return None;
            }
            _ => return None,
        };

        last_guess.states[marking_index] = mark;
        self.error_message.clear();
        self.state = if marking_index + 1 < last_guess.states.len() {
            TuiState::MarkingFeedback {
                marking_index: marking_index + 1,
            }
        } else {
            TuiState::ConfirmingFeedback
        };
        None
    }

    fn handle_confirming_feedback_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Enter => {
                self.feedback_confirmed = true;
                None
            }
            KeyCode::Backspace => {
                // Go back to editing the last letter
                if let Some(last_guess) = self.guesses.last_mut()
                    && let Some(last) = last_guess.states.len().checked_sub(1)
                {
                    last_guess.states[last] = LetterState::Entered;
                    self.state = TuiState::MarkingFeedback {
                        marking_index: last,
                    };
                }
                None
            }
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::Esc => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn get_feedback_from_last_guess(&self) -> Option<Vec<Feedback>> {
        let last_guess = self.guesses.last()?;
        Some(
            last_guess
                .states
                .iter()
                .copied()
                .map(LetterState::to_feedback)
                .collect(),
        )
    }

    pub fn record_guess(&mut self, guess: &str) {
        self.guesses.push(GuessRow::from_guess(guess));
        self.state = TuiState::MarkingFeedback { marking_index: 0 };
        self.status = format!("Guess entered: {guess} - Now mark feedback");
    }
}

impl GameInterface for TuiInterface {
    fn display_suggestions(&mut self, suggestions: &[ScoredWord], round: usize) {
        self.suggestions = suggestions.iter().take(self.top_k).cloned().collect();
        self.round = round;
        self.state = TuiState::EnteringGuess;
        if let Some(best) = suggestions.first() {
            self.status = format!("Round {round} - suggested guess: {}", best.word);
        }
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        if self.exit_requested {
            return Some(UserAction::Exit);
        }
        loop {
            if self.draw().is_err() {
                info_log!("read_guess() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action @ (UserAction::Guess(_) | UserAction::Exit | UserAction::NewGame))) => {
                    info_log!("read_guess() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(Some(UserAction::Pick(_)) | None) => {}
                Err(_e) => {
                    info_log!("read_guess() - Error handling input, returning Exit");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn read_feedback(&mut self, _guess: &Word) -> Option<Vec<Feedback>> {
        self.error_message.clear();
        self.status = "Mark each letter: G (green), Y (yellow), or X (gray)".to_string();

        loop {
            if matches!(self.state, TuiState::ConfirmingFeedback) {
                self.status = "Press ENTER to confirm feedback".to_string();
            }
            if self.draw().is_err() {
                debug_log!("read_feedback() - Draw failed");
                self.exit_requested = true;
                return None;
            }

            match self.handle_input() {
                Ok(Some(UserAction::Exit)) => {
                    info_log!("read_feedback() - Exit requested while marking feedback");
                    self.exit_requested = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    debug_log!("read_feedback() - Input error: {}", e);
                    self.exit_requested = true;
                    return None;
                }
            }

            if self.feedback_confirmed {
                self.feedback_confirmed = false;
                self.status = "Feedback recorded".to_string();
                return self.get_feedback_from_last_guess();
            }
        }
    }

    fn display_constraints(&mut self, constraints: &ConstraintState, viable: usize) {
        self.knowledge = format!("{constraints} ({viable} words fit)");
        self.draw_or_log();
    }

    fn display_error(&mut self, error: &SolverError) {
        self.error_message = error.to_string();
        if error.is_fatal_to_session() {
            self.state = TuiState::GameOver;
            self.status = "Game Over - contradictory feedback".to_string();
        } else {
            self.state = TuiState::EnteringGuess;
        }
        self.draw_or_log();
    }

    fn display_message(&mut self, message: &str) {
        self.message = message.to_string();
        self.draw_or_log();
    }

    fn display_exhausted(&mut self) {
        self.state = TuiState::GameOver;
        self.suggestions.clear();
        self.message = "No word in the list fits the feedback. Check your inputs.".to_string();
        self.status = "Game Over - no word left".to_string();
        self.draw_or_log();
    }

    fn display_solution_found(&mut self, solution: &Word, guesses: usize) {
        self.state = TuiState::GameOver;
        if let Some(row) = self.guesses.last_mut() {
            row.states.fill(LetterState::Match);
        }
        self.message = format!("✓ Solved {solution} by {guesses} guesses!");
        self.status = format!("Game Over - Solution: {solution}");
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.guesses.clear();
        self.current_input.clear();
        self.suggestions.clear();
        self.knowledge.clear();
        self.error_message.clear();
        self.state = TuiState::EnteringGuess;
        self.message = format!("New game started. Loaded {word_count} words.");
        self.status = "New game - Enter your first guess".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Wrapper to make `TuiInterface` work with the `GameInterface` trait
pub struct TuiWrapper {
    interface: TuiInterface,
}

impl TuiWrapper {
    pub fn new(word_length: usize, top_k: usize) -> Result<Self, io::Error> {
        Ok(Self {
            interface: TuiInterface::new(word_length, top_k)?,
        })
    }
}

impl GameInterface for TuiWrapper {
    fn display_suggestions(&mut self, suggestions: &[ScoredWord], round: usize) {
        info_log!(
            "TuiWrapper::display_suggestions() - round {}, {} words",
            round,
            suggestions.len()
        );
        self.interface.display_suggestions(suggestions, round);
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        info_log!("TuiWrapper::read_guess() - Called");
        let action = self.interface.read_guess();
        info_log!("TuiWrapper::read_guess() - Received action: {:?}", action);

        // Record the guess for display
        if let Some(UserAction::Guess(ref guess)) = action {
            self.interface.record_guess(guess);
            self.interface.draw_or_log();
        }
        action
    }

    fn read_feedback(&mut self, guess: &Word) -> Option<Vec<Feedback>> {
        info_log!("TuiWrapper::read_feedback() - Called for {}", guess);
        let result = self.interface.read_feedback(guess);
        info_log!(
            "TuiWrapper::read_feedback() - Feedback received: {:?}",
            result
        );
        result
    }

    fn display_constraints(&mut self, constraints: &ConstraintState, viable: usize) {
        self.interface.display_constraints(constraints, viable);
    }

    fn display_error(&mut self, error: &SolverError) {
        info_log!("TuiWrapper::display_error() - {}", error);
        self.interface.display_error(error);
    }

    fn display_message(&mut self, message: &str) {
        self.interface.display_message(message);
    }

    fn display_exhausted(&mut self) {
        self.interface.display_exhausted();
    }

    fn display_solution_found(&mut self, solution: &Word, guesses: usize) {
        self.interface.display_solution_found(solution, guesses);
    }

    fn display_exit_message(&mut self) {
        self.interface.display_exit_message();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.interface.display_new_game_message(word_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_row_starts_unmarked() {
        let row = GuessRow::from_guess("CRANE");
        assert_eq!(row.letters, vec!['C', 'R', 'A', 'N', 'E']);
        assert!(row.states.iter().all(|s| *s == LetterState::Entered));
    }

    #[test]
    fn test_guess_row_counts_cyrillic_letters() {
        let row = GuessRow::from_guess("СЛОВО");
        assert_eq!(row.letters.len(), 5);
        assert_eq!(row.states.len(), 5);
    }

    #[test]
    fn test_letter_state_to_feedback() {
        assert_eq!(LetterState::Match.to_feedback(), Feedback::Match);
        assert_eq!(LetterState::PartialMatch.to_feedback(), Feedback::PartialMatch);
        assert_eq!(LetterState::NoMatch.to_feedback(), Feedback::NoMatch);
        assert_eq!(LetterState::Entered.to_feedback(), Feedback::NoMatch);
    }

    #[test]
    fn test_letter_state_colors() {
        assert_eq!(LetterState::Match.colors().0, Color::Green);
        assert_eq!(LetterState::PartialMatch.colors().0, Color::Yellow);
        assert_eq!(LetterState::NoMatch.colors().0, Color::Gray);
    }

    #[test]
    fn test_game_over_keys() {
        let key = |code| KeyEvent::new(code, event::KeyModifiers::NONE);
        assert_eq!(
            TuiInterface::handle_game_over_input(key(KeyCode::Char('n'))),
            Some(UserAction::NewGame)
        );
        assert_eq!(
            TuiInterface::handle_game_over_input(key(KeyCode::Esc)),
            Some(UserAction::Exit)
        );
        assert_eq!(TuiInterface::handle_game_over_input(key(KeyCode::Enter)), None);
    }
}
