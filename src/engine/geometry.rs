//! Coordinate mapping between linear cell indices, (x, y) positions and the
//! player-facing perimeter node numbers.
//!
//! The grid is `width = size + 2` cells on each side. Row and column 0 and
//! `width - 1` form the border ring; nodes are numbered 1..=4*size around it:
//!
//! ```text
//!       16  15  14  13
//!      +---+---+---+---+
//!    1 |   |   |   |   | 12
//!    2 |   |   |   |   | 11
//!    3 |   |   |   |   | 10
//!    4 |   |   |   |   |  9
//!      +---+---+---+---+
//!        5   6   7   8
//! ```

use crate::error::{GameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Beam heading. The cyclic order Up -> Left -> Down -> Right is a left
/// (counter-clockwise) turn per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
        }
    }

    /// One step forward in the Up -> Left -> Down -> Right cycle.
    pub fn turned_left(&self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// One step backward in the cycle.
    pub fn turned_right(&self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// Dimensions of a board; all conversions are pure functions of `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    size: usize,
}

impl Geometry {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size + 2
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.width()
    }

    pub fn node_count(&self) -> usize {
        4 * self.size
    }

    pub fn cell_from_xy(&self, x: usize, y: usize) -> usize {
        x + self.width() * y
    }

    pub fn cell_to_xy(&self, index: usize) -> (usize, usize) {
        (index % self.width(), index / self.width())
    }

    pub fn position(&self, index: usize) -> Result<Position> {
        if index >= self.cell_count() {
            return Err(GameError::CellOutOfRange { index, cells: self.cell_count() });
        }
        let (x, y) = self.cell_to_xy(index);
        Ok(Position::new(x, y))
    }

    pub fn index(&self, pos: Position) -> Result<usize> {
        if !self.contains(pos.x as i64, pos.y as i64) {
            return Err(GameError::PositionOutOfRange {
                x: pos.x as i64,
                y: pos.y as i64,
                width: self.width(),
            });
        }
        Ok(self.cell_from_xy(pos.x, pos.y))
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        let w = self.width() as i64;
        (0..w).contains(&x) && (0..w).contains(&y)
    }

    pub fn is_border(&self, pos: Position) -> bool {
        let last = self.width() - 1;
        pos.x == 0 || pos.y == 0 || pos.x == last || pos.y == last
    }

    /// The cell `(dx, dy)` away from `pos`, or `None` when that leaves the grid.
    pub fn offset(&self, pos: Position, dx: i64, dy: i64) -> Option<Position> {
        let x = pos.x as i64 + dx;
        let y = pos.y as i64 + dy;
        if self.contains(x, y) {
            Some(Position::new(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Border cell and inward heading for a node number.
    pub fn entry(&self, node: i64) -> Result<(usize, Direction)> {
        let s = self.size as i64;
        let w = self.width() as i64;
        let (x, y, dir) = match node {
            n if (1..=s).contains(&n) => (0, n, Direction::Right),
            n if (s + 1..=2 * s).contains(&n) => (n - s, w - 1, Direction::Up),
            n if (2 * s + 1..=3 * s).contains(&n) => (w - 1, (3 * s + 1) - n, Direction::Left),
            n if (3 * s + 1..=4 * s).contains(&n) => ((4 * s + 1) - n, 0, Direction::Down),
            _ => return Err(GameError::InvalidNode { node, max: self.node_count() }),
        };
        Ok((self.cell_from_xy(x as usize, y as usize), dir))
    }

    /// Node number of a border cell.
    ///
    /// Edges are tested left, bottom, right, top and the first match wins, so
    /// the corner cells (never reached by a beam) resolve as:
    /// `(0, 0) -> 0`, `(0, w-1) -> size+1`, `(w-1, w-1) -> 2*size+1`,
    /// `(w-1, 0) -> 3*size+1`.
    pub fn exit_node(&self, index: usize) -> Result<usize> {
        let pos = self.position(index)?;
        let s = self.size;
        let last = self.width() - 1;
        if pos.x == 0 {
            Ok(pos.y)
        } else if pos.y == last {
            Ok(pos.x + s)
        } else if pos.x == last {
            Ok((3 * s + 1) - pos.y)
        } else if pos.y == 0 {
            Ok((4 * s + 1) - pos.x)
        } else {
            Err(GameError::PositionOutOfRange { x: pos.x as i64, y: pos.y as i64, width: self.width() })
        }
    }

    /// Interior cell indices, row by row.
    pub fn interior(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.size).flat_map(move |y| (1..=self.size).map(move |x| self.cell_from_xy(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xy_roundtrip() {
        let g = Geometry::new(4);
        for y in 0..g.width() {
            for x in 0..g.width() {
                assert_eq!(g.cell_to_xy(g.cell_from_xy(x, y)), (x, y));
            }
        }
    }

    #[test]
    fn test_entry_edges_and_directions() {
        let g = Geometry::new(4);
        assert_eq!(g.entry(1).unwrap(), (g.cell_from_xy(0, 1), Direction::Right));
        assert_eq!(g.entry(4).unwrap(), (g.cell_from_xy(0, 4), Direction::Right));
        assert_eq!(g.entry(5).unwrap(), (g.cell_from_xy(1, 5), Direction::Up));
        assert_eq!(g.entry(8).unwrap(), (g.cell_from_xy(4, 5), Direction::Up));
        assert_eq!(g.entry(9).unwrap(), (g.cell_from_xy(5, 4), Direction::Left));
        assert_eq!(g.entry(12).unwrap(), (g.cell_from_xy(5, 1), Direction::Left));
        assert_eq!(g.entry(13).unwrap(), (g.cell_from_xy(4, 0), Direction::Down));
        assert_eq!(g.entry(16).unwrap(), (g.cell_from_xy(1, 0), Direction::Down));
    }

    #[test]
    fn test_entry_rejects_out_of_range_nodes() {
        let g = Geometry::new(4);
        for node in [0, -3, 17, 35, i64::MAX] {
            assert!(matches!(g.entry(node), Err(GameError::InvalidNode { max: 16, .. })));
        }
    }

    #[test]
    fn test_node_roundtrip() {
        for size in 1..=10 {
            let g = Geometry::new(size);
            for node in 1..=g.node_count() {
                let (cell, _) = g.entry(node as i64).unwrap();
                assert_eq!(g.exit_node(cell).unwrap(), node, "size {size}");
            }
        }
    }

    #[test]
    fn test_corner_cells_take_first_matching_edge() {
        let g = Geometry::new(4);
        let last = g.width() - 1;
        assert_eq!(g.exit_node(g.cell_from_xy(0, 0)).unwrap(), 0);
        assert_eq!(g.exit_node(g.cell_from_xy(0, last)).unwrap(), 5);
        assert_eq!(g.exit_node(g.cell_from_xy(last, last)).unwrap(), 9);
        assert_eq!(g.exit_node(g.cell_from_xy(last, 0)).unwrap(), 13);
    }

    #[test]
    fn test_exit_node_rejects_interior() {
        let g = Geometry::new(4);
        assert!(g.exit_node(g.cell_from_xy(2, 2)).is_err());
        assert!(matches!(g.exit_node(36), Err(GameError::CellOutOfRange { .. })));
    }

    #[test]
    fn test_turns_cycle() {
        let mut d = Direction::Up;
        for _ in 0..4 {
            assert_eq!(d.turned_left().turned_right(), d);
            d = d.turned_left();
        }
        assert_eq!(Direction::Up.turned_right(), Direction::Right);
        assert_eq!(Direction::Up.turned_left(), Direction::Left);
    }

    #[test]
    fn test_offset_stops_at_grid_edge() {
        let g = Geometry::new(2);
        assert_eq!(g.offset(Position::new(0, 1), -1, 0), None);
        assert_eq!(g.offset(Position::new(0, 1), 1, 1), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_interior_excludes_border() {
        let g = Geometry::new(3);
        let cells: Vec<usize> = g.interior().collect();
        assert_eq!(cells.len(), 9);
        for cell in cells {
            assert!(!g.is_border(g.position(cell).unwrap()));
        }
    }
}
