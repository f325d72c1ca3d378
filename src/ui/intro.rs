use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::engine::board::Board;
use crate::engine::geometry::Position;
use crate::scores::{SCORE_ABSORBED, SCORE_ATOM, SCORE_EXIT, SCORE_REFLECTED};
use crate::ui::board::{board_lines, BoardMode, Overlay};

const BANNER: &str = r#"
 ╔════════════════════════════════════════════════════╗
 ║  ██████  ██       █████   ██████ ██   ██           ║
 ║  ██   ██ ██      ██   ██ ██      ██  ██            ║
 ║  ██████  ██      ███████ ██      █████    B O X    ║
 ║  ██   ██ ██      ██   ██ ██      ██  ██            ║
 ║  ██████  ███████ ██   ██  ██████ ██   ██           ║
 ╚════════════════════════════════════════════════════╝"#;

const RULES: [&str; 14] = [
    "In this game you try to figure out where atoms are placed on a grid of",
    "cells. To learn where they hide, fire a beam into the blackbox from one",
    "of the numbered edge cells.",
    "",
    "The answer is the edge number where the beam exits. If it exits where it",
    "entered you get 'reflected'; if an atom swallows it, 'absorbed'.",
    "",
    "Before every move the beam looks at the three cells ahead of it:",
    " 1. An atom straight ahead absorbs the beam.",
    " 2. An atom ahead on the left deflects it 90 degrees to the right.",
    " 3. An atom ahead on the right deflects it 90 degrees to the left.",
    " 4. Atoms ahead on both sides send it back the way it came.",
    "",
    "In the example a beam from 2 or 7 is absorbed, from 10 or 5 reflected.",
];

/// The 4x4 example board from the rules: atoms at (3, 2), (2, 4) and (3, 4).
pub fn example_board() -> Option<Board> {
    Board::with_atoms(4, &[Position::new(3, 2), Position::new(2, 4), Position::new(3, 4)]).ok()
}

pub fn render_intro(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" How to play ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Banner
            Constraint::Min(0),    // Rules + example
            Constraint::Length(1), // Continue hint
        ])
        .split(inner);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(chunks[1]);

    let text_style = Style::default().fg(Color::Rgb(180, 180, 200));
    let mut lines: Vec<Line> = RULES
        .iter()
        .map(|l| Line::from(Span::styled(*l, text_style)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Scoring:",
        Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
    )));
    for (label, points) in [
        ("Each wrong guessed atom", SCORE_ATOM),
        ("Each beam that exited", SCORE_EXIT),
        ("Each reflected beam", SCORE_REFLECTED),
        ("Each absorbed beam", SCORE_ABSORBED),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<24}", label), text_style),
            Span::styled(format!("{:>3} points", points), Style::default().fg(Color::Rgb(255, 120, 120))),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Type a number and Enter to fire; (e)nd or (f)inish to guess, (b)oard, (q)uit.",
        Style::default().fg(Color::Rgb(120, 120, 140)),
    )));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body[0]);

    if let Some(board) = example_board() {
        let example = board_lines(&board, BoardMode::Solution, &Overlay::default());
        frame.render_widget(Paragraph::new(example), body[1]);
    }

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("▶ Press any key to start", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[2]);
}
