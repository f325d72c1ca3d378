use ratatui::prelude::*;

use crate::engine::board::{Board, Cell};
use crate::engine::geometry::Position;
use crate::engine::session::Guess;

const NODE_COLOR: Color = Color::Rgb(80, 200, 255);
const GRID_COLOR: Color = Color::Rgb(90, 90, 120);
const HIGHLIGHT: Color = Color::Rgb(255, 220, 80);

#[derive(Clone, Copy, PartialEq)]
pub enum BoardMode {
    Neutral,
    Solution,
}

/// Extra marks drawn over the grid.
#[derive(Default)]
pub struct Overlay<'a> {
    pub guesses: &'a [Guess],
    /// Node numbers of the last beam's entry and exit.
    pub nodes: Vec<usize>,
}

fn node_span(node: usize, overlay: &Overlay) -> Span<'static> {
    let style = if overlay.nodes.contains(&node) {
        Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(NODE_COLOR)
    };
    Span::styled(format!("{:3} ", node), style)
}

fn cell_span(board: &Board, pos: Position, mode: BoardMode, overlay: &Overlay) -> Span<'static> {
    let atom = board.cell_state(pos).map(|c| c == Cell::Atom).unwrap_or(false);
    let guessed = overlay.guesses.iter().any(|g| g.position == pos);
    match mode {
        BoardMode::Neutral if guessed => {
            Span::styled(" o ", Style::default().fg(Color::Rgb(200, 120, 255)))
        }
        BoardMode::Neutral => Span::raw("   "),
        BoardMode::Solution => match (atom, guessed) {
            (true, true) => Span::styled(
                " X ",
                Style::default().fg(Color::Rgb(80, 220, 80)).add_modifier(Modifier::BOLD),
            ),
            (true, false) => Span::styled(
                " X ",
                Style::default().fg(Color::Rgb(255, 80, 80)).add_modifier(Modifier::BOLD),
            ),
            (false, true) => Span::styled(" o ", Style::default().fg(Color::Rgb(200, 120, 255))),
            (false, false) => Span::raw("   "),
        },
    }
}

/// The grid with perimeter node numbers, in the layout
///
/// ```text
///       8   7   6   5
///     +---+---+---+---+
///   1 |   |   |   |   |  4
/// ```
/// generalised to the board's size.
pub fn board_lines(board: &Board, mode: BoardMode, overlay: &Overlay) -> Vec<Line<'static>> {
    let size = board.size();
    let grid = Style::default().fg(GRID_COLOR);
    let rule = format!("    +{}", "---+".repeat(size));
    let mut lines = Vec::with_capacity(2 * size + 3);

    let mut top = vec![Span::raw("    ")];
    top.extend((0..size).map(|x| node_span(4 * size - x, overlay)));
    lines.push(Line::from(top));
    lines.push(Line::from(Span::styled(rule.clone(), grid)));

    for y in 1..=size {
        let mut row = vec![node_span(y, overlay), Span::styled("|", grid)];
        for x in 1..=size {
            row.push(cell_span(board, Position::new(x, y), mode, overlay));
            row.push(Span::styled("|", grid));
        }
        row.push(node_span(3 * size + 1 - y, overlay));
        lines.push(Line::from(row));
        lines.push(Line::from(Span::styled(rule.clone(), grid)));
    }

    let mut bottom = vec![Span::raw("    ")];
    bottom.extend((1..=size).map(|x| node_span(size + x, overlay)));
    lines.push(Line::from(bottom));
    lines
}
