use std::fs::File;
use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use blackbox::app::App;
use blackbox::event::{Event, EventHandler};
use blackbox::{ui, Config, Result};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(250);

fn init_logging(config: &Config) -> Result<()> {
    // The terminal belongs to the game, so logs only go to a file.
    if let Some(path) = &config.log_file {
        let file = File::create(path)?;
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
    Ok(())
}

fn run(terminal: &mut Term, app: &mut App) -> Result<()> {
    let event_handler = EventHandler::new(TICK_RATE);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event_handler.next()? {
            Event::Tick => app.on_tick(),
            Event::Resize(width, height) => {
                app.on_resize(width, height);
                terminal.clear()?;
            }
            Event::Key(key) => app.on_key(key)?,
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Runs one game and returns the line to print once the terminal is back.
fn play(config: &Config) -> Result<Option<&'static str>> {
    init_logging(config)?;
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    let size = terminal.size()?;
    app.on_resize(size.width, size.height);

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result.map(|()| app.farewell())
}

fn main() -> ExitCode {
    let config = Config::parse();
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return ExitCode::from(1);
    }

    match play(&config) {
        Ok(farewell) => {
            if let Some(line) = farewell {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("blackbox: {}", e);
            ExitCode::from(255)
        }
    }
}
