pub mod blackbox;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;

use crate::error::Result;

pub trait Game {
    fn update(&mut self);
    fn handle_input(&mut self, key: KeyEvent) -> Result<()>;
    fn render(&mut self, frame: &mut Frame, area: Rect);
    fn get_score(&self) -> i32;
    fn is_game_over(&self) -> bool;
    fn wants_quit(&self) -> bool;
}
