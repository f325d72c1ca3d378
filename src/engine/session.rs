//! One game: probing beams, then guessing atoms, then the final score.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::engine::beam::{self, TraceEnd};
use crate::engine::board::{Board, Cell};
use crate::engine::geometry::Position;
use crate::error::{GameError, Result};
use crate::scores::ScoreCard;

/// A line typed at the beam prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fire(i64),
    EndRound,
    Quit,
    ShowBoard,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command> {
        let line = line.trim();
        match line.chars().next() {
            Some('e' | 'E' | 'f' | 'F') => return Ok(Command::EndRound),
            Some('q' | 'Q') => return Ok(Command::Quit),
            Some('b' | 'B') => return Ok(Command::ShowBoard),
            _ => {}
        }
        leading_integer(line)
            .map(Command::Fire)
            .ok_or_else(|| GameError::NotACommand(line.to_string()))
    }
}

/// Parses an optional sign and the digits that follow it, ignoring the rest.
/// Values too large for `i64` saturate so they still read as out of range.
pub fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits: &str = &rest[..rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Reflected,
    Absorbed,
    Exited(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    pub entry: usize,
    pub outcome: Outcome,
    pub path: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guess {
    pub position: Position,
    pub found: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Probing,
    Guessing,
    Finished,
}

impl Phase {
    fn describe(&self) -> &'static str {
        match self {
            Phase::Probing => "probing",
            Phase::Guessing => "guessing atoms",
            Phase::Finished => "the game is over",
        }
    }
}

pub struct Session {
    board: Board,
    score: ScoreCard,
    trials: Vec<Trial>,
    guesses: Vec<Guess>,
    phase: Phase,
    seed: Option<u64>,
}

impl Session {
    /// New game with randomly placed atoms.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::random(config.size, config.atoms, &mut rng)?;
        log::info!(
            "New game: {}x{} grid, {} atoms, seed {}",
            config.size,
            config.size,
            config.atoms,
            seed
        );
        let mut session = Self::with_board(board);
        session.seed = Some(seed);
        Ok(session)
    }

    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            score: ScoreCard::default(),
            trials: Vec::new(),
            guesses: Vec::new(),
            phase: Phase::Probing,
            seed: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> &ScoreCard {
        &self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    /// 1-based number of the atom the next guess is for.
    pub fn next_guess_number(&self) -> usize {
        self.guesses.len() + 1
    }

    fn expect_phase(&self, phase: Phase, action: &'static str) -> Result<()> {
        if self.phase != phase {
            return Err(GameError::WrongPhase { action, phase: self.phase.describe() });
        }
        Ok(())
    }

    /// Fire a beam from `node`, classify where it ends and count it.
    pub fn fire(&mut self, node: i64) -> Result<&Trial> {
        self.expect_phase(Phase::Probing, "fire a beam")?;
        let geometry = self.board.geometry();
        let (entry_cell, dir) = geometry.entry(node)?;
        let trace = beam::trace(&self.board, entry_cell, dir)?;

        let outcome = match trace.end {
            TraceEnd::ExitedAt(cell) if cell == entry_cell => {
                self.score.reflected += 1;
                Outcome::Reflected
            }
            TraceEnd::ExitedAt(cell) => {
                self.score.exited += 1;
                Outcome::Exited(geometry.exit_node(cell)?)
            }
            TraceEnd::Absorbed => {
                self.score.absorbed += 1;
                Outcome::Absorbed
            }
        };
        log::debug!("Beam {} -> {:?} via {:?}", node, outcome, trace.path);

        self.trials.push(Trial { entry: node as usize, outcome, path: trace.path });
        Ok(&self.trials[self.trials.len() - 1])
    }

    pub fn end_round(&mut self) -> Result<()> {
        self.expect_phase(Phase::Probing, "end the round")?;
        log::info!("Round ended after {} beams", self.trials.len());
        self.phase = if self.board.atom_count() == 0 { Phase::Finished } else { Phase::Guessing };
        Ok(())
    }

    /// Guess an atom at interior coordinates `x` (right) and `y` (down),
    /// each 1..=size.
    pub fn guess(&mut self, x: i64, y: i64) -> Result<Guess> {
        self.expect_phase(Phase::Guessing, "guess an atom")?;
        let size = self.board.size();
        let in_range = |v: i64| v >= 1 && v <= size as i64;
        if !in_range(x) || !in_range(y) {
            return Err(GameError::InvalidGuess { x, y, size });
        }
        let position = Position::new(x as usize, y as usize);
        if self.guesses.iter().any(|g| g.position == position) {
            return Err(GameError::DuplicateGuess { x: position.x, y: position.y });
        }

        let found = self.board.cell_state(position)? == Cell::Atom;
        if !found {
            self.score.missed_atoms += 1;
        }
        let guess = Guess { position, found };
        self.guesses.push(guess);
        log::info!("Guess down {} right {}: {}", y, x, if found { "found" } else { "missed" });

        if self.guesses.len() == self.board.atom_count() {
            self.phase = Phase::Finished;
            log::info!("Game over, score {}", self.score.total());
        }
        Ok(guess)
    }
}
