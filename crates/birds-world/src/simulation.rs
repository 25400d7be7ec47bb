//! Simulation driver: owns the grid, the population and the random source,
//! and advances years under a linearly increasing warming level.

use crate::bird::{KindCounts, Population};
use crate::generation::{advance_one_year, initialize, YearReport};
use crate::grid::Grid;
use crate::lifecycle::Warming;
use crate::rng::simulation_rng;
use birds_core::{Result, SimulationConfig};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

pub struct Simulation<R: Rng = ChaCha8Rng> {
    grid: Grid,
    population: Population,
    config: SimulationConfig,
    rng: R,
    warming: Warming,
    year: u32,
}

impl Simulation<ChaCha8Rng> {
    /// Seeded from `config.seed` when present, from entropy otherwise.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let rng = simulation_rng(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(config: SimulationConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let warming = Warming::new(config.climate.initial_warming)?;
        let (grid, population) = initialize(&config.world, &mut rng)?;

        Ok(Self {
            grid,
            population,
            config,
            rng,
            warming,
            year: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Number of years completed
    pub fn year(&self) -> u32 {
        self.year
    }

    /// Warming level the next year will run under
    pub fn warming(&self) -> Warming {
        self.warming
    }

    pub fn counts(&self) -> KindCounts {
        self.population.count_by_kind()
    }

    pub fn is_extinct(&self) -> bool {
        self.population.is_empty()
    }

    /// Advance one year, then raise warming for the next.
    pub fn step(&mut self) -> Result<YearSummary> {
        let warming = self.warming;
        let population = std::mem::take(&mut self.population);
        let outcome = advance_one_year(&mut self.grid, population, warming, &mut self.rng);

        self.population = outcome.population;
        self.year += 1;
        self.warming = warming.advance(self.config.climate.warming_step)?;

        let summary = YearSummary {
            year: self.year,
            warming: warming.level(),
            counts: self.population.count_by_kind(),
            report: outcome.report,
        };

        debug!(
            year = summary.year,
            warming = summary.warming,
            migratory = summary.counts.migratory,
            resident = summary.counts.resident,
            births = summary.report.births.total(),
            deaths = summary.report.deaths(),
            failed_settlements = summary.report.failed_settlements,
            "Year complete"
        );

        Ok(summary)
    }

    /// Run the configured number of years, stopping early on extinction.
    pub fn run(&mut self) -> Result<SimulationResult> {
        self.run_with(|_, _| {})
    }

    /// Like [`run`](Self::run), calling `on_year` after every completed year.
    #[instrument(skip(self, on_year), fields(years = self.config.years))]
    pub fn run_with<F>(&mut self, mut on_year: F) -> Result<SimulationResult>
    where
        F: FnMut(&Self, &YearSummary),
    {
        let initial_counts = self.counts();
        info!(
            migratory = initial_counts.migratory,
            resident = initial_counts.resident,
            "Starting simulation for {} years",
            self.config.years
        );

        let mut history = Vec::with_capacity(self.config.years as usize);
        let mut extinct_at = None;

        for _ in 0..self.config.years {
            let summary = self.step()?;
            on_year(&*self, &summary);
            history.push(summary);

            if self.is_extinct() {
                extinct_at = Some(self.year);
                info!(year = self.year, "Population extinct");
                break;
            }
        }

        let result = SimulationResult {
            initial_counts,
            final_counts: self.counts(),
            years_run: self.year,
            final_warming: self.warming.level(),
            extinct_at,
            history,
        };

        info!(
            years_run = result.years_run,
            migratory = result.final_counts.migratory,
            resident = result.final_counts.resident,
            births = result.total_births(),
            deaths = result.total_deaths(),
            "Simulation complete"
        );

        Ok(result)
    }
}

/// Population state after one simulated year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    /// Warming level the year ran under
    pub warming: f64,
    pub counts: KindCounts,
    pub report: YearReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub initial_counts: KindCounts,
    pub final_counts: KindCounts,
    pub years_run: u32,
    pub final_warming: f64,
    pub extinct_at: Option<u32>,
    pub history: Vec<YearSummary>,
}

impl SimulationResult {
    pub fn total_births(&self) -> usize {
        self.history.iter().map(|y| y.report.births.total()).sum()
    }

    pub fn total_deaths(&self) -> usize {
        self.history.iter().map(|y| y.report.deaths()).sum()
    }
}
