//! Bird records and the population index over occupied cells.

use crate::grid::Grid;
use birds_core::{BirdKind, Cell, Error, Position, Result};
use serde::{Deserialize, Serialize};

/// A living bird
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bird {
    pub position: Position,
    pub kind: BirdKind,
    pub age: u32,
}

impl Bird {
    pub fn new(position: Position, kind: BirdKind, age: u32) -> Self {
        Self {
            position,
            kind,
            age,
        }
    }

    /// Offspring placed this year start at age 1.
    pub fn hatchling(position: Position, kind: BirdKind) -> Self {
        Self::new(position, kind, 1)
    }

    pub fn is_migratory(&self) -> bool {
        self.kind == BirdKind::Migratory
    }

    /// One year older
    pub fn aged(self) -> Self {
        Self {
            age: self.age + 1,
            ..self
        }
    }

    pub fn as_cell(&self) -> Cell {
        Cell::occupied(self.kind, self.age)
    }
}

/// Per-kind head count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub migratory: usize,
    pub resident: usize,
}

impl KindCounts {
    pub fn total(&self) -> usize {
        self.migratory + self.resident
    }

    pub fn get(&self, kind: BirdKind) -> usize {
        match kind {
            BirdKind::Migratory => self.migratory,
            BirdKind::Resident => self.resident,
        }
    }

    pub fn record(&mut self, kind: BirdKind) {
        match kind {
            BirdKind::Migratory => self.migratory += 1,
            BirdKind::Resident => self.resident += 1,
        }
    }
}

/// Ordered list of living birds, one per occupied grid cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    birds: Vec<Bird>,
}

impl Population {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            birds: Vec::with_capacity(capacity),
        }
    }

    /// Index every occupied cell of `grid`, in row-major order.
    pub fn from_grid(grid: &Grid) -> Self {
        let birds = grid
            .iter()
            .filter_map(|(pos, cell)| cell.occupant().map(|(kind, age)| Bird::new(pos, kind, age)))
            .collect();
        Self { birds }
    }

    pub fn push(&mut self, bird: Bird) {
        self.birds.push(bird);
    }

    pub fn len(&self) -> usize {
        self.birds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.birds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bird> + '_ {
        self.birds.iter()
    }

    pub fn as_slice(&self) -> &[Bird] {
        &self.birds
    }

    pub fn into_vec(self) -> Vec<Bird> {
        self.birds
    }

    pub fn count_by_kind(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for bird in &self.birds {
            counts.record(bird.kind);
        }
        counts
    }

    /// Check that this population and `grid` describe the same birds:
    /// each bird sits on a matching occupied cell, and every occupied cell
    /// holds exactly one listed bird.
    pub fn verify_against(&self, grid: &Grid) -> Result<()> {
        let mut seen = vec![false; grid.rows() * grid.columns()];

        for bird in &self.birds {
            let cell = grid.get(bird.position);
            if cell != bird.as_cell() {
                return Err(Error::InvalidState(format!(
                    "bird {:?} at {} does not match cell {:?}",
                    bird.kind, bird.position, cell
                )));
            }
            let index = grid.index_of(bird.position);
            if std::mem::replace(&mut seen[index], true) {
                return Err(Error::InvalidState(format!(
                    "two birds listed at {}",
                    bird.position
                )));
            }
        }

        let occupied = grid.count_where(|cell| cell.occupant().is_some());
        if occupied != self.birds.len() {
            return Err(Error::InvalidState(format!(
                "{occupied} occupied cells but {} listed birds",
                self.birds.len()
            )));
        }

        Ok(())
    }
}

impl From<Vec<Bird>> for Population {
    fn from(birds: Vec<Bird>) -> Self {
        Self { birds }
    }
}

/// Per-kind totals of a population, for reporting.
pub fn count_by_kind(population: &Population) -> KindCounts {
    population.count_by_kind()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bird_aging() {
        let bird = Bird::new(Position::new(2, 3), BirdKind::Resident, 4);
        let older = bird.aged();
        assert_eq!(older.age, 5);
        assert_eq!(older.position, bird.position);
        assert_eq!(older.kind, BirdKind::Resident);
    }

    #[test]
    fn test_hatchling() {
        let chick = Bird::hatchling(Position::new(0, 0), BirdKind::Migratory);
        assert_eq!(chick.age, 1);
        assert!(chick.is_migratory());
        assert_eq!(chick.as_cell(), Cell::occupied(BirdKind::Migratory, 1));
    }

    #[test]
    fn test_count_by_kind() {
        let population = Population::from(vec![
            Bird::new(Position::new(0, 0), BirdKind::Migratory, 1),
            Bird::new(Position::new(0, 1), BirdKind::Resident, 2),
            Bird::new(Position::new(0, 2), BirdKind::Resident, 3),
        ]);

        let counts = count_by_kind(&population);
        assert_eq!(counts.migratory, 1);
        assert_eq!(counts.resident, 2);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.get(BirdKind::Resident), 2);
    }

    #[test]
    fn test_from_grid_matches_occupied_cells() {
        let mut grid = Grid::filled(3, 3, Cell::Empty).unwrap();
        grid.occupy(Position::new(0, 1), BirdKind::Resident, 2);
        grid.occupy(Position::new(2, 0), BirdKind::Migratory, 5);
        grid.set(Position::new(1, 1), Cell::Void);

        let population = Population::from_grid(&grid);
        assert_eq!(population.len(), 2);
        assert_eq!(
            population.as_slice()[0],
            Bird::new(Position::new(0, 1), BirdKind::Resident, 2)
        );
        assert!(population.verify_against(&grid).is_ok());
    }

    #[test]
    fn test_verify_detects_drift() {
        let mut grid = Grid::filled(2, 2, Cell::Empty).unwrap();
        grid.occupy(Position::new(0, 0), BirdKind::Resident, 1);
        let population = Population::from_grid(&grid);

        // Stale age
        let mut aged_grid = grid.clone();
        aged_grid.occupy(Position::new(0, 0), BirdKind::Resident, 2);
        assert!(population.verify_against(&aged_grid).is_err());

        // Occupied cell missing from the list
        grid.occupy(Position::new(1, 1), BirdKind::Migratory, 1);
        assert!(population.verify_against(&grid).is_err());

        // Listed bird on a freed cell
        let mut freed = Grid::filled(2, 2, Cell::Empty).unwrap();
        freed.free(Position::new(0, 0));
        assert!(population.verify_against(&freed).is_err());
    }

    #[test]
    fn test_verify_detects_duplicates() {
        let mut grid = Grid::filled(1, 2, Cell::Empty).unwrap();
        grid.occupy(Position::new(0, 0), BirdKind::Resident, 1);
        let bird = Bird::new(Position::new(0, 0), BirdKind::Resident, 1);
        let population = Population::from(vec![bird, bird]);
        assert!(population.verify_against(&grid).is_err());
    }
}
