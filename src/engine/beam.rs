//! Beam tracing.
//!
//! A beam looks at the three cells in front of it before every move. An atom
//! straight ahead absorbs it; an atom ahead on one side turns it 90 degrees
//! away from that atom; atoms on both sides turn it twice, sending it back.
//! A turn taken while still on the entry border reflects the beam at once.

use crate::engine::board::{Board, Cell};
use crate::engine::geometry::{Direction, Position};
use crate::error::{GameError, Result};

/// Moves (turns and steps) allowed per perimeter node before a trace is
/// declared stuck.
const MOVES_PER_NODE: usize = 10;

/// What the look-ahead found, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sighting {
    None,
    Center,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEnd {
    Absorbed,
    ExitedAt(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub end: TraceEnd,
    /// Cells visited, entry cell first.
    pub path: Vec<usize>,
}

pub fn look_ahead(board: &Board, cell: usize, dir: Direction) -> Result<Sighting> {
    let geometry = board.geometry();
    let pos = geometry.position(cell)?;
    let (dx, dy) = dir.delta();
    let (lx, ly) = dir.turned_left().delta();

    let front = geometry.offset(pos, dx, dy);
    let front_left = geometry.offset(pos, dx + lx, dy + ly);
    let front_right = geometry.offset(pos, dx - lx, dy - ly);

    Ok(if board.is_atom(front) {
        Sighting::Center
    } else if board.is_atom(front_left) {
        Sighting::Left
    } else if board.is_atom(front_right) {
        Sighting::Right
    } else {
        Sighting::None
    })
}

/// Deflect away from the atom: an atom on the left turns the beam right.
pub fn turn(sighting: Sighting, dir: Direction) -> Direction {
    match sighting {
        Sighting::Left => dir.turned_right(),
        Sighting::Right => dir.turned_left(),
        Sighting::None | Sighting::Center => dir,
    }
}

pub fn step(board: &Board, cell: usize, dir: Direction) -> Result<usize> {
    let geometry = board.geometry();
    let pos = geometry.position(cell)?;
    let (dx, dy) = dir.delta();
    geometry
        .offset(pos, dx, dy)
        .map(|next: Position| geometry.cell_from_xy(next.x, next.y))
        .ok_or(GameError::PositionOutOfRange {
            x: pos.x as i64 + dx,
            y: pos.y as i64 + dy,
            width: geometry.width(),
        })
}

pub fn trace(board: &Board, entry: usize, dir: Direction) -> Result<Trace> {
    let limit = MOVES_PER_NODE * board.geometry().node_count().max(1);
    let mut cell = entry;
    let mut dir = dir;
    let mut path = vec![entry];
    let mut moves = 0;

    let tick = |moves: &mut usize| -> Result<()> {
        *moves += 1;
        if *moves > limit {
            let node = board.geometry().exit_node(entry).unwrap_or(0);
            return Err(GameError::BeamTrapped { node, steps: limit });
        }
        Ok(())
    };

    loop {
        let mut sighting = look_ahead(board, cell, dir)?;

        while matches!(sighting, Sighting::Left | Sighting::Right) {
            tick(&mut moves)?;
            dir = turn(sighting, dir);
            sighting = look_ahead(board, cell, dir)?;
            if board.cell(cell)? == Cell::Border {
                return Ok(Trace { end: TraceEnd::ExitedAt(cell), path });
            }
        }

        if sighting == Sighting::Center {
            return Ok(Trace { end: TraceEnd::Absorbed, path });
        }

        tick(&mut moves)?;
        cell = step(board, cell, dir)?;
        path.push(cell);

        if board.cell(cell)? == Cell::Border {
            return Ok(Trace { end: TraceEnd::ExitedAt(cell), path });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(atoms: &[(usize, usize)]) -> Board {
        let atoms: Vec<Position> = atoms.iter().map(|&(x, y)| Position::new(x, y)).collect();
        Board::with_atoms(4, &atoms).unwrap()
    }

    fn fire(board: &Board, node: i64) -> Trace {
        let (cell, dir) = board.geometry().entry(node).unwrap();
        trace(board, cell, dir).unwrap()
    }

    fn exit_node(board: &Board, t: &Trace) -> Option<usize> {
        match t.end {
            TraceEnd::ExitedAt(cell) => Some(board.geometry().exit_node(cell).unwrap()),
            TraceEnd::Absorbed => None,
        }
    }

    #[test]
    fn test_look_ahead_priority() {
        let b = board(&[(2, 1), (2, 2), (2, 3)]);
        let g = b.geometry();
        assert_eq!(look_ahead(&b, g.cell_from_xy(1, 2), Direction::Right).unwrap(), Sighting::Center);
        let b = board(&[(2, 1), (2, 3)]);
        assert_eq!(look_ahead(&b, g.cell_from_xy(1, 2), Direction::Right).unwrap(), Sighting::Left);
        let b = board(&[(2, 3)]);
        assert_eq!(look_ahead(&b, g.cell_from_xy(1, 2), Direction::Right).unwrap(), Sighting::Right);
        assert_eq!(look_ahead(&b, g.cell_from_xy(1, 2), Direction::Up).unwrap(), Sighting::None);
    }

    #[test]
    fn test_look_ahead_sides_are_relative_to_heading() {
        let b = board(&[(1, 3)]);
        let g = b.geometry();
        // Heading down from (2, 2), the beam's left is +x and its right is -x.
        assert_eq!(look_ahead(&b, g.cell_from_xy(2, 2), Direction::Down).unwrap(), Sighting::Right);
        assert_eq!(look_ahead(&b, g.cell_from_xy(0, 2), Direction::Down).unwrap(), Sighting::Left);
    }

    #[test]
    fn test_look_ahead_off_grid_is_empty() {
        let b = board(&[]);
        let g = b.geometry();
        assert_eq!(look_ahead(&b, g.cell_from_xy(0, 1), Direction::Down).unwrap(), Sighting::None);
    }

    #[test]
    fn test_turn_away_from_atom() {
        assert_eq!(turn(Sighting::Left, Direction::Up), Direction::Right);
        assert_eq!(turn(Sighting::Right, Direction::Up), Direction::Left);
        assert_eq!(turn(Sighting::Left, Direction::Right), Direction::Down);
        assert_eq!(turn(Sighting::Center, Direction::Down), Direction::Down);
        assert_eq!(turn(Sighting::None, Direction::Left), Direction::Left);
    }

    #[test]
    fn test_step() {
        let b = board(&[]);
        let g = b.geometry();
        let c = g.cell_from_xy(2, 2);
        assert_eq!(step(&b, c, Direction::Up).unwrap(), g.cell_from_xy(2, 1));
        assert_eq!(step(&b, c, Direction::Left).unwrap(), g.cell_from_xy(1, 2));
        assert!(step(&b, g.cell_from_xy(0, 0), Direction::Up).is_err());
    }

    #[test]
    fn test_straight_through_empty_board() {
        let b = board(&[]);
        let t = fire(&b, 2);
        assert_eq!(exit_node(&b, &t), Some(11));
        assert_eq!(t.path.len(), 6);
    }

    #[test]
    fn test_head_on_absorption() {
        let b = board(&[(3, 2)]);
        assert_eq!(fire(&b, 2).end, TraceEnd::Absorbed);
    }

    #[test]
    fn test_single_deflection() {
        // Beam from node 1 runs along row 1; the atom at (3, 2) sits ahead on
        // its right, so it turns up and leaves through the top edge at x = 2.
        let b = board(&[(3, 2)]);
        let t = fire(&b, 1);
        assert_eq!(exit_node(&b, &t), Some(15));
    }

    #[test]
    fn test_edge_reflection() {
        // Atom diagonally in front of the entry cell.
        let b = board(&[(1, 3)]);
        let (entry, _) = b.geometry().entry(2).unwrap();
        assert_eq!(fire(&b, 2).end, TraceEnd::ExitedAt(entry));
    }

    #[test]
    fn test_double_deflection_sends_beam_back() {
        let b = board(&[(3, 1), (3, 3)]);
        let (entry, _) = b.geometry().entry(2).unwrap();
        let t = fire(&b, 2);
        assert_eq!(t.end, TraceEnd::ExitedAt(entry));
        assert_eq!(t.path.len(), 5);
    }

    #[test]
    fn test_turn_into_atom_absorbs() {
        // Deflected up at (2, 3) straight towards the atom at (2, 2).
        let b = board(&[(3, 4), (2, 2)]);
        let g = b.geometry();
        let t = trace(&b, g.cell_from_xy(2, 3), Direction::Right).unwrap();
        assert_eq!(t.end, TraceEnd::Absorbed);
    }

    #[test]
    fn test_trapped_beam_hits_move_limit() {
        // Atoms on both forward diagonals of each heading keep the beam turning.
        let b = board(&[(1, 1), (3, 1), (1, 3), (3, 3)]);
        let g = b.geometry();
        let err = trace(&b, g.cell_from_xy(2, 2), Direction::Up).unwrap_err();
        assert!(matches!(err, GameError::BeamTrapped { steps: 160, .. }));
    }
}
