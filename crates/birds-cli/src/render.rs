//! Colored terminal rendering of the habitat grid.

use birds_core::{BirdKind, Cell};
use birds_world::{Grid, KindCounts};
use std::fmt::Write;

const GREY: &str = "\x1b[90m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

const SEPARATOR: &str =
    "_____________________________________________________________________";

fn glyph(cell: Cell) -> (&'static str, char) {
    match cell {
        Cell::Occupied {
            kind: BirdKind::Resident,
            ..
        } => (BLUE, 'N'),
        Cell::Occupied {
            kind: BirdKind::Migratory,
            ..
        } => (RED, 'M'),
        Cell::Empty => (GREEN, 'O'),
        Cell::Void => (GREY, 'X'),
    }
}

/// One line per grid row, cells separated by spaces.
pub fn render_grid(grid: &Grid, color: bool) -> String {
    let mut out = String::with_capacity(grid.rows() * (grid.columns() * 12 + 1));

    for row in 0..grid.rows() {
        for cell in grid.row(row) {
            let (code, ch) = glyph(cell);
            if color {
                let _ = write!(out, "{code}{ch}{RESET} ");
            } else {
                let _ = write!(out, "{ch} ");
            }
        }
        out.push('\n');
    }

    out
}

pub fn render_snapshot(grid: &Grid, year: u32, counts: KindCounts, color: bool) -> String {
    format!(
        "{}\nYear: {}\nMigratory: {}  Resident: {}\n{}\n",
        render_grid(grid, color),
        year,
        counts.migratory,
        counts.resident,
        SEPARATOR
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use birds_core::Position;

    fn sample_grid() -> Grid {
        let mut grid = Grid::filled(2, 2, Cell::Empty).unwrap();
        grid.set(Position::new(0, 1), Cell::Void);
        grid.occupy(Position::new(1, 0), BirdKind::Migratory, 2);
        grid.occupy(Position::new(1, 1), BirdKind::Resident, 4);
        grid
    }

    #[test]
    fn test_plain_render() {
        assert_eq!(render_grid(&sample_grid(), false), "O X \nM N \n");
    }

    #[test]
    fn test_colored_render() {
        let out = render_grid(&sample_grid(), true);
        assert!(out.starts_with("\x1b[32mO\x1b[0m \x1b[90mX\x1b[0m \n"));
        assert!(out.contains("\x1b[31mM\x1b[0m"));
        assert!(out.contains("\x1b[34mN\x1b[0m"));
    }

    #[test]
    fn test_snapshot_footer() {
        let counts = KindCounts {
            migratory: 1,
            resident: 1,
        };
        let out = render_snapshot(&sample_grid(), 3, counts, false);
        assert!(out.contains("\nYear: 3\n"));
        assert!(out.contains("Migratory: 1  Resident: 1"));
        assert!(out.trim_end().ends_with(SEPARATOR));
    }
}
