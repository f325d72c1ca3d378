use rand::Rng;

use crate::engine::geometry::{Geometry, Position};
use crate::error::{GameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Border,
    Atom,
}

/// The hidden grid. Cells are fixed once the board is built.
#[derive(Debug, Clone)]
pub struct Board {
    geometry: Geometry,
    cells: Vec<Cell>,
    atoms: Vec<usize>,
}

impl Board {
    /// Border ring around an empty interior.
    fn blank(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(GameError::Configuration("grid size must be at least 1".into()));
        }
        let geometry = Geometry::new(size);
        let cells = (0..geometry.cell_count())
            .map(|i| {
                let (x, y) = geometry.cell_to_xy(i);
                if geometry.is_border(Position::new(x, y)) {
                    Cell::Border
                } else {
                    Cell::Empty
                }
            })
            .collect();
        Ok(Self { geometry, cells, atoms: Vec::new() })
    }

    /// Board with `atom_count` atoms on distinct, uniformly chosen interior cells.
    ///
    /// Requires `atom_count < size * size`.
    pub fn random(size: usize, atom_count: usize, rng: &mut impl Rng) -> Result<Self> {
        let mut board = Self::blank(size)?;
        let interior: Vec<usize> = board.geometry.interior().collect();
        if atom_count >= interior.len() {
            return Err(GameError::Configuration(format!(
                "{} atoms do not fit a {}x{} grid (at most {})",
                atom_count,
                size,
                size,
                interior.len() - 1
            )));
        }
        for pick in rand::seq::index::sample(rng, interior.len(), atom_count).into_iter() {
            board.place(interior[pick])?;
        }
        Ok(board)
    }

    /// Board with atoms at the given interior positions.
    pub fn with_atoms(size: usize, atoms: &[Position]) -> Result<Self> {
        let mut board = Self::blank(size)?;
        for &pos in atoms {
            let index = board.geometry.index(pos)?;
            board.place(index)?;
        }
        Ok(board)
    }

    fn place(&mut self, index: usize) -> Result<()> {
        match self.cells.get(index) {
            Some(Cell::Empty) => {
                self.cells[index] = Cell::Atom;
                self.atoms.push(index);
                Ok(())
            }
            Some(_) => {
                let pos = self.geometry.position(index)?;
                Err(GameError::Configuration(format!(
                    "cell ({}, {}) cannot hold an atom",
                    pos.x, pos.y
                )))
            }
            None => Err(GameError::CellOutOfRange { index, cells: self.cells.len() }),
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn size(&self) -> usize {
        self.geometry.size()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Atom cell indices in placement order.
    pub fn atoms(&self) -> &[usize] {
        &self.atoms
    }

    pub fn cell(&self, index: usize) -> Result<Cell> {
        self.cells
            .get(index)
            .copied()
            .ok_or(GameError::CellOutOfRange { index, cells: self.cells.len() })
    }

    pub fn cell_state(&self, pos: Position) -> Result<Cell> {
        self.cell(self.geometry.index(pos)?)
    }

    /// Whether an optional neighbour holds an atom; off-grid reads as empty.
    pub fn is_atom(&self, pos: Option<Position>) -> bool {
        pos.and_then(|p| self.cell_state(p).ok()) == Some(Cell::Atom)
    }
}
