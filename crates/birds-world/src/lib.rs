//! Habitat grid and generational update engine.
//!
//! Birds live on a toroidal grid of [`Cell`](birds_core::Cell)s. Each year
//! [`advance_one_year`] decides, bird by bird, who dies, who survives and who
//! raises young in a free neighboring cell, under a warming level that makes
//! nesting and migration riskier.

pub mod bird;
pub mod generation;
pub mod grid;
pub mod lifecycle;
pub mod neighborhood;
pub mod rng;
pub mod simulation;

pub use bird::{count_by_kind, Bird, KindCounts, Population};
pub use generation::{advance_one_year, attempt_settle, initialize, YearOutcome, YearReport};
pub use grid::Grid;
pub use lifecycle::{MigratoryDecision, ResidentDecision, Warming};
pub use neighborhood::find_free_neighbors;
pub use rng::{simulation_rng, ScriptedRng};
pub use simulation::{Simulation, SimulationResult, YearSummary};
