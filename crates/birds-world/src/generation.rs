//! Grid initialization and the yearly generation update.
//!
//! The grid and the population list are two views of the same birds. Every
//! function here that removes a bird frees its cell and leaves it out of the
//! next population; every function that adds a bird occupies a free cell and
//! pushes it onto the next population in the same step.

use crate::bird::{Bird, KindCounts, Population};
use crate::grid::Grid;
use crate::lifecycle::{
    abandons_nest, decide_migratory, decide_resident, MigratoryDecision, ResidentDecision,
    Warming, MAX_AGE,
};
use crate::neighborhood::find_free_neighbors;
use crate::rng::{INITIAL_AGE_MAX, INITIAL_AGE_MIN};
use birds_core::{BirdKind, Cell, Position, Result, WorldConfig};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Share of initial birds that are migratory.
pub const MIGRATORY_SHARE: f64 = 0.5;

/// Build a random habitat grid and index its birds.
///
/// Per cell: one draw decides habitability, a second (habitable cells only)
/// decides occupancy, a third picks the kind, then the initial age is drawn.
pub fn initialize<R: Rng + ?Sized>(config: &WorldConfig, rng: &mut R) -> Result<(Grid, Population)> {
    config.validate()?;

    let rows = config.rows as usize;
    let columns = config.columns as usize;
    let mut cells = Vec::with_capacity(rows * columns);

    for _ in 0..rows * columns {
        let cell = if rng.gen::<f64>() >= config.habitable_ratio {
            Cell::Void
        } else if rng.gen::<f64>() >= config.population_density {
            Cell::Empty
        } else {
            let kind = if rng.gen::<f64>() < MIGRATORY_SHARE {
                BirdKind::Migratory
            } else {
                BirdKind::Resident
            };
            Cell::occupied(kind, rng.gen_range(INITIAL_AGE_MIN..=INITIAL_AGE_MAX))
        };
        cells.push(cell);
    }

    let grid = Grid::from_cells(rows, columns, cells)?;
    let population = Population::from_grid(&grid);

    debug!(
        rows,
        columns,
        habitable = grid.habitable_count(),
        birds = population.len(),
        "Initialized habitat grid"
    );

    Ok((grid, population))
}

/// What happened to the population during one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearReport {
    /// Offspring successfully settled, by kind
    pub births: KindCounts,
    pub deaths_old_age: usize,
    pub deaths_early_migration: usize,
    pub deaths_late_migration: usize,
    /// Nesting migrants that found no room for their young and left
    pub deaths_abandoned_nest: usize,
    /// Nesting attempts with no free neighbor
    pub failed_settlements: usize,
}

impl YearReport {
    pub fn deaths(&self) -> usize {
        self.deaths_old_age
            + self.deaths_early_migration
            + self.deaths_late_migration
            + self.deaths_abandoned_nest
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearOutcome {
    pub population: Population,
    pub report: YearReport,
}

/// Place a newborn of `kind` on a random free neighbor of `parent`.
///
/// Returns `false` without touching the grid when no neighbor is free.
pub fn attempt_settle<R: Rng + ?Sized>(
    grid: &mut Grid,
    parent: Position,
    kind: BirdKind,
    next: &mut Population,
    rng: &mut R,
) -> bool {
    let free = find_free_neighbors(grid, parent);
    let Some(&target) = free.choose(rng) else {
        return false;
    };

    let chick = Bird::hatchling(target, kind);
    grid.set(target, chick.as_cell());
    next.push(chick);
    true
}

/// Run one year over `population`, mutating `grid` in place.
///
/// Birds are visited in a freshly shuffled order so no position gets first
/// pick of free land.
pub fn advance_one_year<R: Rng + ?Sized>(
    grid: &mut Grid,
    population: Population,
    warming: Warming,
    rng: &mut R,
) -> YearOutcome {
    let mut birds = population.into_vec();
    birds.shuffle(rng);

    let mut next = Population::with_capacity(birds.len() * 2);
    let mut report = YearReport::default();

    for bird in birds {
        if bird.age > MAX_AGE {
            grid.free(bird.position);
            report.deaths_old_age += 1;
            continue;
        }

        match bird.kind {
            BirdKind::Migratory => match decide_migratory(warming, rng) {
                MigratoryDecision::MigrateSoonAndDie => {
                    grid.free(bird.position);
                    report.deaths_early_migration += 1;
                }
                MigratoryDecision::MigrateLateAndDie => {
                    grid.free(bird.position);
                    report.deaths_late_migration += 1;
                }
                MigratoryDecision::ReturnAndDontNest => survive(grid, &mut next, bird),
                MigratoryDecision::ReturnAndNest => {
                    if attempt_settle(grid, bird.position, bird.kind, &mut next, rng) {
                        report.births.record(bird.kind);
                        survive(grid, &mut next, bird);
                    } else {
                        report.failed_settlements += 1;
                        trace!(position = %bird.position, kind = %bird.kind, "No free habitat for offspring");

                        if abandons_nest(rng) {
                            grid.free(bird.position);
                            report.deaths_abandoned_nest += 1;
                        } else {
                            survive(grid, &mut next, bird);
                        }
                    }
                }
            },
            BirdKind::Resident => {
                if decide_resident(warming, rng) == ResidentDecision::Nest {
                    if attempt_settle(grid, bird.position, bird.kind, &mut next, rng) {
                        report.births.record(bird.kind);
                    } else {
                        report.failed_settlements += 1;
                        trace!(position = %bird.position, kind = %bird.kind, "No free habitat for offspring");
                    }
                }
                survive(grid, &mut next, bird);
            }
        }
    }

    debug_assert!(next.verify_against(grid).is_ok());

    YearOutcome {
        population: next,
        report,
    }
}

fn survive(grid: &mut Grid, next: &mut Population, bird: Bird) {
    let older = bird.aged();
    grid.set(older.position, older.as_cell());
    next.push(older);
}
