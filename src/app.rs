//! Application state and the single update function that mutates it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::calculator::{calculate, Calculation, Outcome};
use crate::config::Config;
use crate::points::Position;
use crate::selection::{Rival, SelectionError, SelectionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Everything the UI can ask of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    RivalPositionSelected { rival: Rival, position: Position },
    SelectHighlighted,
    MoveCursor(Direction),
    Focus(Rival),
    FocusNext,
    ClearSelection(Rival),
    Calculate,
    Reset,
    Quit,
}

/// Result of the last calculate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    MissingSelection,
    Computed(Calculation),
}

impl Report {
    /// Builds the report for the current selections; computes nothing unless
    /// both rivals have a position.
    pub fn for_selection(selection: &SelectionState, config: &Config) -> Report {
        match selection.both() {
            Some((pos_a, pos_b)) => Report::Computed(calculate(pos_a, pos_b, config.gaps())),
            None => Report::MissingSelection,
        }
    }

    pub fn text(&self, config: &Config) -> String {
        match self {
            Report::MissingSelection => format!(
                "Please select a position for both {} and {}.",
                config.rival_a, config.rival_b
            ),
            Report::Computed(calc) => {
                let mut text = format!(
                    "{}: {}\n{}: {}\n\n",
                    config.rival_a,
                    calc.pos_a.label(),
                    config.rival_b,
                    calc.pos_b.label()
                );
                match calc.outcome {
                    Outcome::Unattainable => text.push_str(&format!(
                        "Even with a P1, {} cannot guarantee the title with these results.",
                        config.subject
                    )),
                    Outcome::Guaranteed(pos) => text.push_str(&format!(
                        "{} needs at least: \n\u{2022} \u{00AB}{}\u{00BB} or better.",
                        config.subject,
                        pos.label()
                    )),
                }
                text
            }
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub selection: SelectionState,
    pub focus: Rival,
    cursor_a: usize,
    cursor_b: usize,
    pub report: Option<Report>,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            selection: SelectionState::new(),
            focus: Rival::A,
            cursor_a: 0,
            cursor_b: 0,
            report: None,
            status: None,
            should_quit: false,
        }
    }

    /// Seeds selections; a later claim on the same position wins.
    pub fn with_selections(mut self, pos_a: Option<Position>, pos_b: Option<Position>) -> Self {
        if let Some(pos) = pos_a {
            self.selection.claim(Rival::A, pos);
            *self.cursor_mut(Rival::A) = row_of(pos);
        }
        if let Some(pos) = pos_b {
            self.selection.claim(Rival::B, pos);
            *self.cursor_mut(Rival::B) = row_of(pos);
        }
        self
    }

    /// Highlighted row (0-based index into the position catalog) of a column.
    pub fn cursor(&self, rival: Rival) -> usize {
        match rival {
            Rival::A => self.cursor_a,
            Rival::B => self.cursor_b,
        }
    }

    fn cursor_mut(&mut self, rival: Rival) -> &mut usize {
        match rival {
            Rival::A => &mut self.cursor_a,
            Rival::B => &mut self.cursor_b,
        }
    }

    pub fn highlighted(&self, rival: Rival) -> Position {
        position_at(self.cursor(rival))
    }

    pub fn report_text(&self) -> Option<String> {
        self.report.map(|r| r.text(&self.config))
    }

    pub fn update(&mut self, msg: Message) {
        tracing::trace!(?msg, "update");
        match msg {
            Message::RivalPositionSelected { rival, position } => self.select(rival, position),
            Message::SelectHighlighted => self.select(self.focus, self.highlighted(self.focus)),
            Message::MoveCursor(direction) => {
                let len = Position::all().len();
                let cursor = self.cursor_mut(self.focus);
                *cursor = match direction {
                    Direction::Up => (*cursor + len - 1) % len,
                    Direction::Down => (*cursor + 1) % len,
                };
            }
            Message::Focus(rival) => self.focus = rival,
            Message::FocusNext => self.focus = self.focus.other(),
            Message::ClearSelection(rival) => {
                self.selection.clear(rival);
                self.report = None;
                self.status = None;
            }
            Message::Calculate => {
                let report = Report::for_selection(&self.selection, &self.config);
                match report {
                    Report::MissingSelection => tracing::info!("calculate requested without both selections"),
                    Report::Computed(calc) => tracing::info!(outcome = ?calc.outcome, "calculated"),
                }
                self.report = Some(report);
                self.status = None;
            }
            Message::Reset => {
                self.selection.reset();
                self.cursor_a = 0;
                self.cursor_b = 0;
                self.focus = Rival::A;
                self.report = None;
                self.status = None;
            }
            Message::Quit => self.should_quit = true,
        }
    }

    fn select(&mut self, rival: Rival, position: Position) {
        *self.cursor_mut(rival) = row_of(position);
        match self.selection.select(rival, position) {
            Ok(()) => {
                tracing::debug!(%rival, %position, "selection accepted");
                self.report = None;
                self.status = None;
            }
            Err(SelectionError::Taken { position, holder }) => {
                tracing::debug!(%rival, %position, %holder, "selection rejected");
                self.status = Some(format!(
                    "{} is already taken by {}",
                    position.label(),
                    self.config.rival_name(holder)
                ));
            }
        }
    }
}

fn row_of(position: Position) -> usize {
    usize::from(position.get()) - 1
}

fn position_at(row: usize) -> Position {
    Position::all()
        .nth(row)
        .unwrap_or(Position::NO_POINTS)
}

/// Maps a key press to a message for the focused column.
pub fn message_for_key(key: KeyEvent, focus: Rival) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    let select = |n: u8| {
        Position::new(n).map(|position| Message::RivalPositionSelected {
            rival: focus,
            position,
        })
    };

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Message::Quit),
        KeyCode::Left | KeyCode::Char('h') => Some(Message::Focus(Rival::A)),
        KeyCode::Right | KeyCode::Char('l') => Some(Message::Focus(Rival::B)),
        KeyCode::Tab | KeyCode::BackTab => Some(Message::FocusNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Message::MoveCursor(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Message::MoveCursor(Direction::Down)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::SelectHighlighted),
        KeyCode::Char('0') => select(10),
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).and_then(|d| select(d as u8)),
        KeyCode::Char('d') => Some(Message::RivalPositionSelected {
            rival: focus,
            position: Position::NO_POINTS,
        }),
        KeyCode::Char('c') | KeyCode::Char('=') => Some(Message::Calculate),
        KeyCode::Backspace | KeyCode::Delete => Some(Message::ClearSelection(focus)),
        KeyCode::Char('r') => Some(Message::Reset),
        _ => None,
    }
}
