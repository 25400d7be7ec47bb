//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell coordinate on the habitat grid, always stored already wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset this position and apply toroidal wrapping for given grid dimensions
    pub fn offset(&self, dr: i64, dc: i64, rows: usize, columns: usize) -> Self {
        Self {
            row: wrap_axis(self.row as i64 + dr, rows),
            col: wrap_axis(self.col as i64 + dc, columns),
        }
    }
}

fn wrap_axis(value: i64, len: usize) -> usize {
    value.rem_euclid(len as i64) as usize
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Kind of bird occupying a habitat cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BirdKind {
    Migratory,
    Resident,
}

impl fmt::Display for BirdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BirdKind::Migratory => write!(f, "migratory"),
            BirdKind::Resident => write!(f, "resident"),
        }
    }
}

/// State of one grid location.
///
/// Only `Occupied` carries an occupant and an age, so a void or empty
/// cell with a bird in it cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Cell {
    /// Permanently non-habitable
    Void,
    /// Habitable and free
    Empty,
    /// Habitable and held by a bird
    Occupied { kind: BirdKind, age: u32 },
}

impl Cell {
    pub fn occupied(kind: BirdKind, age: u32) -> Self {
        Cell::Occupied { kind, age }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_habitable(&self) -> bool {
        !matches!(self, Cell::Void)
    }

    pub fn occupant(&self) -> Option<(BirdKind, u32)> {
        match *self {
            Cell::Occupied { kind, age } => Some((kind, age)),
            _ => None,
        }
    }
}
