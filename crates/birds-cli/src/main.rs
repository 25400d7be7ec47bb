//! Command-line driver for the migratory/resident bird simulation.

mod render;
mod telemetry;

use anyhow::{Context, Result};
use birds_core::SimulationConfig;
use birds_world::Simulation;
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    /// Print only the initial and the final grid
    #[value(alias = "0")]
    Short,
    /// Print the grid after every year
    #[value(alias = "1")]
    Full,
}

#[derive(Debug, Parser)]
#[command(
    name = "birds",
    author,
    version,
    about = "Cellular automaton tracking migratory and resident birds under global warming"
)]
struct Cli {
    /// Rows of the habitat grid [default: 10]
    #[arg(short = 'R', long = "rows", visible_alias = "row")]
    rows: Option<u32>,

    /// Columns of the habitat grid [default: 10]
    #[arg(short = 'C', long = "cols", visible_alias = "col")]
    cols: Option<u32>,

    /// Percentage of the area habitable by birds, 0-100 [default: 80]
    #[arg(short = 'H', long, value_parser = clap::value_parser!(u8).range(0..=100))]
    habit: Option<u8>,

    /// Percentage of the habitable area populated at start, 0-100 [default: 50]
    #[arg(short = 'P', long, value_parser = clap::value_parser!(u8).range(0..=100))]
    popul: Option<u8>,

    /// Number of simulated years [default: 50]
    #[arg(short = 'Y', long)]
    years: Option<u32>,

    /// Output detail
    #[arg(short = 'O', long, value_enum, default_value_t = OutputMode::Short)]
    output: OutputMode,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Warming added after every year [default: 0.01]
    #[arg(long)]
    warming_step: Option<f64>,

    /// JSON configuration file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the run summary as JSON after the last grid
    #[arg(long)]
    summary_json: bool,

    /// Disable ANSI colors in grid output
    #[arg(long)]
    no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.world.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.world.columns = cols;
        }
        if let Some(habit) = self.habit {
            config.world.habitable_ratio = f64::from(habit) / 100.0;
        }
        if let Some(popul) = self.popul {
            config.world.population_density = f64::from(popul) / 100.0;
        }
        if let Some(years) = self.years {
            config.years = years;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(step) = self.warming_step {
            config.climate.warming_step = step;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry(cli.log_json)?;

    let config = cli.simulation_config()?;
    info!(
        rows = config.world.rows,
        columns = config.world.columns,
        years = config.years,
        seed = ?config.seed,
        "Starting bird simulation"
    );

    let color = !cli.no_color;
    let mut sim = Simulation::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    write!(
        out,
        "{}",
        render::render_snapshot(sim.grid(), sim.year(), sim.counts(), color)
    )?;

    let result = match cli.output {
        OutputMode::Short => {
            let result = sim.run()?;
            write!(
                out,
                "{}",
                render::render_snapshot(sim.grid(), sim.year(), sim.counts(), color)
            )?;
            result
        }
        OutputMode::Full => {
            let mut write_error = None;
            let result = sim.run_with(|sim, summary| {
                if write_error.is_some() {
                    return;
                }
                let snapshot = render::render_snapshot(sim.grid(), summary.year, summary.counts, color);
                if let Err(e) = write!(out, "{snapshot}") {
                    write_error = Some(e);
                }
            })?;
            if let Some(e) = write_error {
                return Err(e.into());
            }
            result
        }
    };

    if cli.summary_json {
        serde_json::to_writer_pretty(&mut out, &result)?;
        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}
