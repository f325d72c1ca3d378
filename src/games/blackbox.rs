use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::config::Config;
use crate::engine::session::{leading_integer, Command, Outcome, Phase, Session, Trial};
use crate::error::{GameError, Result};
use crate::games::Game;
use crate::ui::board::{board_lines, BoardMode, Overlay};
use crate::ui::intro::render_intro;

const MAX_INPUT_LEN: usize = 12;
const MAX_FEEDBACK: usize = 200;
const FAREWELL: &str = "Bye then ...";
// Trial log column next to the board panel.
const MIN_LOG_WIDTH: u16 = 30;

#[derive(Clone, Copy, PartialEq, Debug)]
enum Screen {
    Intro,
    Probing,
    Guessing,
    Summary,
}

/// Which coordinate the guess prompt is waiting for.
#[derive(Clone, Copy, PartialEq, Debug)]
enum Axis {
    Y,
    X { y: i64 },
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Tone {
    Info,
    Good,
    Bad,
    Warn,
}

impl Tone {
    fn color(&self) -> Color {
        match self {
            Tone::Info => Color::Rgb(180, 180, 200),
            Tone::Good => Color::Rgb(80, 220, 80),
            Tone::Bad => Color::Rgb(255, 80, 80),
            Tone::Warn => Color::Rgb(255, 180, 120),
        }
    }
}

struct Feedback {
    text: String,
    tone: Tone,
}

pub struct BlackBoxGame {
    session: Session,
    always_show_board: bool,
    board_visible: bool,
    screen: Screen,
    axis: Axis,
    input: String,
    feedback: VecDeque<Feedback>,
    quit: bool,
    farewell: Option<&'static str>,
    tick: u64,
}

impl BlackBoxGame {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::from_session(Session::new(config)?, config.always_show_board))
    }

    pub fn from_session(session: Session, always_show_board: bool) -> Self {
        Self {
            session,
            always_show_board,
            board_visible: true,
            screen: Screen::Intro,
            axis: Axis::Y,
            input: String::new(),
            feedback: VecDeque::new(),
            quit: false,
            farewell: None,
            tick: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.session.board().size()
    }

    pub fn atom_count(&self) -> usize {
        self.session.board().atom_count()
    }

    pub fn beams_fired(&self) -> usize {
        self.session.trials().len()
    }

    /// Line to print once the terminal is restored, set when the player
    /// quits before the round is scored.
    pub fn farewell(&self) -> Option<&'static str> {
        self.farewell
    }

    /// Smallest terminal (width, height) that fits the board panel, the
    /// trial log and the input line.
    pub fn min_area(&self) -> (u16, u16) {
        let board_height = (2 * self.size() + 3) as u16;
        // Panel borders, title bar, input box and help line.
        (self.board_width() + MIN_LOG_WIDTH, board_height + 2 + 3 + 3 + 1)
    }

    fn push(&mut self, text: impl Into<String>, tone: Tone) {
        if self.feedback.len() == MAX_FEEDBACK {
            self.feedback.pop_front();
        }
        self.feedback.push_back(Feedback { text: text.into(), tone });
    }

    fn prompt(&self) -> String {
        match (self.screen, self.axis) {
            (Screen::Guessing, Axis::Y) => format!(
                " Atom {} of {}  y (down): ",
                self.session.next_guess_number(),
                self.atom_count()
            ),
            (Screen::Guessing, Axis::X { y }) => format!(
                " Atom {} of {}  down {}, x (right): ",
                self.session.next_guess_number(),
                self.atom_count(),
                y
            ),
            _ => " Enter beam's entry number: ".to_string(),
        }
    }

    fn submit(&mut self, line: &str) -> Result<()> {
        let result = match self.screen {
            Screen::Probing => self.probe(line),
            Screen::Guessing => self.guess(line),
            Screen::Intro | Screen::Summary => Ok(()),
        };
        match result {
            Err(e) if e.is_recoverable() => {
                log::debug!("Rejected input {:?}: {}", line, e);
                let text = self.rejection(&e);
                self.push(text, Tone::Warn);
                Ok(())
            }
            other => other,
        }
    }

    fn rejection(&self, err: &GameError) -> String {
        match err {
            GameError::InvalidNode { .. } => "Beam out of bounds ...".to_string(),
            GameError::NotACommand(_) if self.screen == Screen::Guessing => {
                format!("Enter a number from 1 to {}", self.size())
            }
            GameError::NotACommand(_) => "Not a number or command ...".to_string(),
            GameError::InvalidGuess { .. } => "A coordinate is out of range, try again.".to_string(),
            other => other.to_string(),
        }
    }

    fn probe(&mut self, line: &str) -> Result<()> {
        match Command::parse(line)? {
            Command::Fire(node) => {
                let trial = self.session.fire(node)?;
                let (text, tone) = describe(trial);
                self.push(text, tone);
                self.board_visible = self.always_show_board;
            }
            Command::EndRound => {
                self.session.end_round()?;
                if self.session.phase() == Phase::Finished {
                    self.screen = Screen::Summary;
                } else {
                    self.screen = Screen::Guessing;
                    self.board_visible = true;
                    let text = format!(
                        "Enter coordinates of each atom as y (down) and x (right), each from 1 to {}",
                        self.size()
                    );
                    self.push(text, Tone::Info);
                }
            }
            Command::Quit => {
                log::info!("Player quit after {} beams", self.beams_fired());
                self.farewell = Some(FAREWELL);
                self.quit = true;
            }
            Command::ShowBoard => self.board_visible = true,
        }
        Ok(())
    }

    fn guess(&mut self, line: &str) -> Result<()> {
        let value = leading_integer(line)
            .ok_or_else(|| GameError::NotACommand(line.trim().to_string()))?;
        match self.axis {
            Axis::Y => self.axis = Axis::X { y: value },
            Axis::X { y } => {
                self.axis = Axis::Y;
                let number = self.session.next_guess_number();
                let guess = self.session.guess(value, y)?;
                self.push(
                    format!("Atom {}: you entered down {} and right {}", number, y, value),
                    Tone::Info,
                );
                if guess.found {
                    self.push("Atom Found", Tone::Good);
                } else {
                    self.push("Atom not found", Tone::Bad);
                }
                if self.session.phase() == Phase::Finished {
                    self.screen = Screen::Summary;
                }
            }
        }
        Ok(())
    }

    fn last_trial_nodes(&self) -> Vec<usize> {
        match self.session.trials().last() {
            Some(Trial { entry, outcome: Outcome::Exited(exit), .. }) => vec![*entry, *exit],
            Some(trial) => vec![trial.entry],
            None => vec![],
        }
    }

    fn board_width(&self) -> u16 {
        (4 * self.size() + 10) as u16
    }

    fn render_board_panel(&self, frame: &mut Frame, area: Rect, mode: BoardMode) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 60, 80)))
            .title(if mode == BoardMode::Solution { " Solution " } else { " Blackbox " });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if mode == BoardMode::Neutral && !self.board_visible {
            let hidden = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Board hidden, enter b to show it",
                    Style::default().fg(Color::Rgb(120, 120, 140)),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(hidden, inner);
            return;
        }

        let overlay = Overlay { guesses: self.session.guesses(), nodes: self.last_trial_nodes() };
        let lines = board_lines(self.session.board(), mode, &overlay);
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_feedback(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 60, 80)))
            .title(" Beams ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible = inner.height as usize;
        let skip = self.feedback.len().saturating_sub(visible);
        let lines: Vec<Line> = self
            .feedback
            .iter()
            .skip(skip)
            .map(|f| Line::from(Span::styled(f.text.clone(), Style::default().fg(f.tone.color()))))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let cursor = if self.tick % 4 < 2 { "█" } else { " " };
        let line = Line::from(vec![
            Span::styled(
                self.prompt(),
                Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.input.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled(cursor, Style::default().fg(Color::Rgb(180, 180, 200))),
        ]);
        let p = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(60, 150, 200))),
        );
        frame.render_widget(p, area);
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let card = self.session.score();
        let label = Style::default().fg(Color::Rgb(180, 180, 200));
        let mut lines = vec![
            Line::from(Span::styled(
                "Final score:",
                Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("-------------", label)),
        ];
        for row in card.lines() {
            lines.push(Line::from(Span::styled(
                format!("{:<16}{:>3} x {:>3} = {:>4}", row.label, row.count, row.weight, row.points()),
                label,
            )));
        }
        lines.push(Line::from(Span::styled("-".repeat(34), label)));
        lines.push(Line::from(Span::styled(
            format!("{:<26}= {:>4}", "Sum total", card.total()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        if let Some(seed) = self.session.seed() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Seed {} (replay with --seed {})", seed, seed),
                Style::default().fg(Color::Rgb(120, 120, 140)),
            )));
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(lines.len() as u16 + 2), Constraint::Min(0)])
            .split(area);
        let score = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(255, 220, 80))),
        );
        frame.render_widget(score, chunks[0]);
        self.render_feedback(frame, chunks[1]);
    }
}

fn describe(trial: &Trial) -> (String, Tone) {
    match trial.outcome {
        Outcome::Reflected => (format!("{:>3}: Beam was reflected", trial.entry), Tone::Warn),
        Outcome::Absorbed => (format!("{:>3}: Beam was absorbed", trial.entry), Tone::Bad),
        Outcome::Exited(node) => (format!("{:>3}: Beam exited at {}", trial.entry, node), Tone::Good),
    }
}

impl Game for BlackBoxGame {
    fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn handle_input(&mut self, key: KeyEvent) -> Result<()> {
        match self.screen {
            Screen::Intro => {
                self.screen = Screen::Probing;
                Ok(())
            }
            Screen::Summary => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')) {
                    self.quit = true;
                }
                Ok(())
            }
            Screen::Probing | Screen::Guessing => match key.code {
                KeyCode::Enter => {
                    let line = std::mem::take(&mut self.input);
                    self.submit(&line)
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    Ok(())
                }
                KeyCode::Esc => {
                    self.input.clear();
                    Ok(())
                }
                KeyCode::Char(c) => {
                    if self.input.chars().count() < MAX_INPUT_LEN && (c.is_ascii_graphic() || c == ' ') {
                        self.input.push(c);
                    }
                    Ok(())
                }
                _ => Ok(()),
            },
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.screen == Screen::Intro {
            render_intro(frame, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(if self.screen == Screen::Summary { 0 } else { 3 }),
                Constraint::Length(1),
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(self.board_width()), Constraint::Min(0)])
            .split(chunks[0]);

        if self.screen == Screen::Summary {
            self.render_board_panel(frame, body[0], BoardMode::Solution);
            self.render_summary(frame, body[1]);
        } else {
            self.render_board_panel(frame, body[0], BoardMode::Neutral);
            self.render_feedback(frame, body[1]);
            self.render_input(frame, chunks[1]);
        }

        let dim = Style::default().fg(Color::DarkGray);
        let bar = Style::default().fg(Color::Rgb(60, 60, 60));
        let help = match self.screen {
            Screen::Summary => Line::from(vec![
                Span::styled(" 🏁 GAME OVER! ", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
                Span::styled("Press ENTER, q or Esc to quit", Style::default().fg(Color::Gray)),
            ]),
            Screen::Guessing => Line::from(vec![
                Span::styled(" Type a number, Enter to confirm ", dim),
                Span::styled("│ ", bar),
                Span::styled("Esc Clear ", dim),
                Span::styled("│ ", bar),
                Span::styled("Ctrl+C Quit", dim),
            ]),
            _ => Line::from(vec![
                Span::styled(" 1-", dim),
                Span::styled(format!("{} Fire ", self.session.board().geometry().node_count()), dim),
                Span::styled("│ ", bar),
                Span::styled("e End round ", dim),
                Span::styled("│ ", bar),
                Span::styled("b Board ", dim),
                Span::styled("│ ", bar),
                Span::styled("q Quit ", dim),
                Span::styled("│ ", bar),
                Span::styled("Esc Clear", dim),
            ]),
        };
        frame.render_widget(Paragraph::new(help), chunks[2]);
    }

    fn get_score(&self) -> i32 {
        self.session.score().total()
    }

    fn is_game_over(&self) -> bool {
        self.screen == Screen::Summary
    }

    fn wants_quit(&self) -> bool {
        self.quit
    }
}
