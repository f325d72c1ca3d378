use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Config;
use crate::error::Result;
use crate::games::blackbox::BlackBoxGame;
use crate::games::Game;

pub struct App {
    pub should_quit: bool,
    pub blackbox: BlackBoxGame,
    /// Set while the terminal is smaller than the game needs.
    pub too_small: Option<(u16, u16)>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_game(BlackBoxGame::new(config)?))
    }

    pub fn with_game(blackbox: BlackBoxGame) -> Self {
        Self { should_quit: false, blackbox, too_small: None }
    }

    pub fn on_tick(&mut self) {
        self.blackbox.update();
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        let (min_width, min_height) = self.blackbox.min_area();
        self.too_small = if width < min_width || height < min_height {
            log::debug!("Terminal {}x{} below {}x{}", width, height, min_width, min_height);
            Some((min_width, min_height))
        } else {
            None
        };
    }

    /// Printed after the terminal is restored.
    pub fn farewell(&self) -> Option<&'static str> {
        self.blackbox.farewell()
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Result<()> {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            log::info!("Interrupted by Ctrl+C");
            self.should_quit = true;
            return Ok(());
        }

        self.blackbox.handle_input(key)?;
        if self.blackbox.wants_quit() {
            if self.blackbox.is_game_over() {
                log::info!("Final score {}", self.blackbox.get_score());
            }
            self.should_quit = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::board::Board;
    use crate::engine::session::Session;

    fn app() -> App {
        let session = Session::with_board(Board::with_atoms(4, &[]).unwrap());
        App::with_game(BlackBoxGame::from_session(session, false))
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_command_quits() {
        let mut app = app();
        for code in [KeyCode::Enter, KeyCode::Char('q'), KeyCode::Enter] {
            app.on_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
        }
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_command_leaves_farewell() {
        let mut app = app();
        for code in [KeyCode::Enter, KeyCode::Char('q'), KeyCode::Enter] {
            app.on_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
        }
        assert_eq!(app.farewell(), Some("Bye then ..."));
    }

    #[test]
    fn test_resize_tracks_minimum_area() {
        let mut app = app();
        app.on_resize(40, 15);
        assert_eq!(app.too_small, Some((56, 20)));
        app.on_resize(56, 20);
        assert_eq!(app.too_small, None);
    }
}
