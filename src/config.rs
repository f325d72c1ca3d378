use std::path::PathBuf;

use clap::Parser;

use crate::error::{GameError, Result};

/// Largest grid whose perimeter labels still fit three columns.
pub const MAX_SIZE: usize = 99;

#[derive(Parser, Debug, Clone)]
#[command(name = "blackbox")]
#[command(version, about = "Play a decent game of BlackBox: find the atoms hidden in the grid")]
pub struct Config {
    /// Count of atoms hidden
    #[arg(short = 'a', long = "atoms", default_value_t = 4)]
    pub atoms: usize,

    /// Size of the blackbox grid (n x n)
    #[arg(short = 's', long = "size", default_value_t = 8)]
    pub size: usize,

    /// Keep the board on screen after each beam
    #[arg(short = 'b', long = "board")]
    pub always_show_board: bool,

    /// RNG seed for atom placement (optional)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self { atoms: 4, size: 8, always_show_board: false, seed: None, log_file: None }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(GameError::Configuration("No valid size: must be at least 1".into()));
        }
        if self.size > MAX_SIZE {
            return Err(GameError::Configuration(format!(
                "No valid size: must be at most {}",
                MAX_SIZE
            )));
        }
        let capacity = self.size * self.size;
        if self.atoms >= capacity {
            return Err(GameError::Configuration(format!(
                "No valid count of atoms: a {}x{} grid holds at most {}",
                self.size,
                self.size,
                capacity - 1
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["blackbox"]).unwrap();
        assert_eq!(config.size, 8);
        assert_eq!(config.atoms, 4);
        assert!(!config.always_show_board);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_short_flags() {
        let config = Config::try_parse_from(["blackbox", "-s", "5", "-a", "3", "-b"]).unwrap();
        assert_eq!((config.size, config.atoms), (5, 3));
        assert!(config.always_show_board);
    }

    #[test]
    fn test_rejects_unknown_arguments() {
        assert!(Config::try_parse_from(["blackbox", "board.txt"]).is_err());
        assert!(Config::try_parse_from(["blackbox", "-x"]).is_err());
        assert!(Config::try_parse_from(["blackbox", "-a", "many"]).is_err());
    }

    #[test]
    fn test_capacity_checks() {
        let mut config = Config { size: 2, atoms: 3, ..Config::default() };
        assert!(config.validate().is_ok());
        config.atoms = 4;
        assert!(matches!(config.validate(), Err(GameError::Configuration(_))));
        config = Config { size: 0, atoms: 0, ..Config::default() };
        assert!(config.validate().is_err());
        config = Config { size: 100, ..Config::default() };
        assert!(config.validate().is_err());
    }
}
