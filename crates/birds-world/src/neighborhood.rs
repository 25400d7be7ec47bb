//! Moore-neighborhood search for free habitat.

use crate::grid::Grid;
use birds_core::Position;

/// Toroidal Moore neighborhood of `pos`, excluding `pos` itself.
///
/// Offsets are enumerated row offset first, then column offset, both
/// ascending. On grids narrower than three cells several offsets wrap onto
/// the same coordinate, and each occurrence is kept, so such a cell is picked
/// proportionally more often. Offsets that wrap back onto `pos` are skipped.
pub fn moore_neighborhood(grid: &Grid, pos: Position) -> Vec<Position> {
    let mut positions = Vec::with_capacity(8);

    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }

            let neighbor = pos.offset(dr, dc, grid.rows(), grid.columns());
            if neighbor != pos {
                positions.push(neighbor);
            }
        }
    }

    positions
}

/// Neighbors of `pos` whose cell is free habitat.
pub fn find_free_neighbors(grid: &Grid, pos: Position) -> Vec<Position> {
    moore_neighborhood(grid, pos)
        .into_iter()
        .filter(|neighbor| grid.get(*neighbor).is_empty())
        .collect()
}
