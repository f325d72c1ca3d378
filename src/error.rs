use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Beam out of bounds: {node} is not a node between 1 and {max}")]
    InvalidNode { node: i64, max: usize },

    #[error("Cell {index} is outside the grid of {cells} cells")]
    CellOutOfRange { index: usize, cells: usize },

    #[error("Position ({x}, {y}) is outside the grid of width {width}")]
    PositionOutOfRange { x: i64, y: i64, width: usize },

    #[error("A coordinate is out of range, try again (each from 1 to {size})")]
    InvalidGuess { x: i64, y: i64, size: usize },

    #[error("You already guessed down {y} and right {x}, try again")]
    DuplicateGuess { x: usize, y: usize },

    #[error("Not a number or command: {0:?}")]
    NotACommand(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Beam from node {node} did not terminate after {steps} moves")]
    BeamTrapped { node: usize, steps: usize },

    #[error("Cannot {action} while {phase}")]
    WrongPhase { action: &'static str, phase: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// Errors caused by player input; the prompt shows them and asks again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidNode { .. }
                | GameError::InvalidGuess { .. }
                | GameError::DuplicateGuess { .. }
                | GameError::NotACommand(_)
                | GameError::WrongPhase { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
