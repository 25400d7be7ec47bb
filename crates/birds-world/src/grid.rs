//! 2D habitat grid.

use birds_core::{BirdKind, Cell, Error, Position, Result};
use serde::{Deserialize, Serialize};

/// A 2D toroidal grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Grid with every cell set to `cell`.
    pub fn filled(rows: usize, columns: usize, cell: Cell) -> Result<Self> {
        Self::from_cells(rows, columns, vec![cell; rows * columns])
    }

    /// Build a grid from row-major cells.
    pub fn from_cells(rows: usize, columns: usize, cells: Vec<Cell>) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must have at least one row and column, got {rows}x{columns}"
            )));
        }
        if cells.len() != rows * columns {
            return Err(Error::InvalidConfig(format!(
                "expected {} cells for a {rows}x{columns} grid, got {}",
                rows * columns,
                cells.len()
            )));
        }
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Wrap arbitrary signed coordinates onto the torus
    pub fn wrap(&self, row: i64, col: i64) -> Position {
        Position::new(0, 0).offset(row, col, self.rows, self.columns)
    }

    /// Get cell at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.index_of(pos)]
    }

    /// Replace the cell at position
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let index = self.index_of(pos);
        self.cells[index] = cell;
    }

    /// Turn the cell at `pos` back into free habitat.
    pub fn free(&mut self, pos: Position) {
        self.set(pos, Cell::Empty);
    }

    pub fn occupy(&mut self, pos: Position, kind: BirdKind, age: u32) {
        self.set(pos, Cell::occupied(kind, age));
    }

    pub fn index_of(&self, pos: Position) -> usize {
        let row = pos.row % self.rows;
        let col = pos.col % self.columns;
        row * self.columns + col
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        Position::new(index / self.columns, index % self.columns)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }

    /// Iterator over the cells of one row
    pub fn row(&self, row: usize) -> impl Iterator<Item = Cell> + '_ {
        let start = (row % self.rows) * self.columns;
        self.cells[start..start + self.columns].iter().copied()
    }

    pub fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> usize {
        self.cells.iter().filter(|cell| predicate(*cell)).count()
    }

    pub fn habitable_count(&self) -> usize {
        self.count_where(Cell::is_habitable)
    }

    pub fn empty_count(&self) -> usize {
        self.count_where(Cell::is_empty)
    }
}
