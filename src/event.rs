use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

pub enum Event {
    Key(KeyEvent),
    /// New terminal width and height.
    Resize(u16, u16),
    Tick,
}

/// Terminal input read on a background thread; ticks arrive whenever no
/// input shows up within the tick rate.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

/// Key presses and resizes; releases, repeats, mouse and focus events are dropped.
fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read().ok().and_then(translate) {
                    Some(event) => event,
                    None => continue,
                }
            } else {
                Event::Tick
            };
            if tx.send(event).is_err() {
                return;
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
