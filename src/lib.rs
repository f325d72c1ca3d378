//! BlackBox - find atoms hidden in a grid by firing probe beams at it
//!
//! Core modules:
//! - `engine`: board, coordinate mapping, beam tracing and the game session
//! - `scores`: scoring weights and the final score card
//! - `games`: the terminal front end driving a session
//! - `ui`: frame layout, rules screen and board rendering

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod games;
pub mod scores;
pub mod ui;

pub use config::Config;
pub use error::{GameError, Result};
