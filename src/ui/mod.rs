pub mod board;
pub mod intro;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::games::Game;

pub fn render(frame: &mut Frame, app: &mut App) {
    if let Some((width, height)) = app.too_small {
        render_too_small(frame, width, height);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Content
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    app.blackbox.render(frame, chunks[1]);
}

fn render_too_small(frame: &mut Frame, width: u16, height: u16) {
    let area = frame.area();
    let lines = vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default().fg(Color::Rgb(255, 80, 80)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Resize to at least {}x{} (now {}x{})", width, height, area.width, area.height),
            Style::default().fg(Color::Rgb(180, 180, 200)),
        )),
    ];
    let top = area.height.saturating_sub(2) / 2;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top), Constraint::Min(0)])
        .split(area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rows[1]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let game = &app.blackbox;
    let sep = Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80)));
    let status = Line::from(vec![
        Span::styled(
            format!(" Grid {0}x{0} ", game.size()),
            Style::default().fg(Color::Rgb(80, 200, 255)),
        ),
        sep.clone(),
        Span::styled(
            format!("Atoms hidden = {} ", game.atom_count()),
            Style::default().fg(Color::Rgb(255, 80, 80)).add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
        Span::styled(
            format!("Beams fired: {} ", game.beams_fired()),
            Style::default().fg(Color::Rgb(200, 120, 255)),
        ),
        sep,
        Span::styled(
            format!("Score: {} ", game.get_score()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]);

    let title = Paragraph::new(status).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .border_type(BorderType::Rounded)
            .title(" ⬛ BlackBox ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(200, 120, 255))
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(title, area);
}
