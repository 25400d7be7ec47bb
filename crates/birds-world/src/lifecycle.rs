//! Yearly decision rules for resident and migratory birds.
//!
//! All thresholds shift with the warming level. Derived probabilities are
//! clamped into `[0, 1]` and the on-time migration window never inverts, so
//! at high warming the rules saturate instead of misbehaving:
//!
//! - at `warming >= 0.45` the on-time window is empty and every migrant dies,
//! - at `warming >= 0.6` no bird nests.

use birds_core::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Birds older than this die before making any decision.
pub const MAX_AGE: u32 = 5;
/// Nesting probability with no warming.
pub const BASE_NEST_CHANCE: f64 = 0.6;
/// Share of migrants leaving too early with no warming.
pub const BASE_EARLY_MIGRATION: f64 = 0.05;
/// Upper edge of the on-time migration window with no warming.
pub const BASE_LATE_MIGRATION: f64 = 0.95;
/// Chance a nesting migrant with no room for its young abandons the site.
pub const ABANDON_NEST_CHANCE: f64 = 0.5;

/// Non-negative warming level for one simulated year.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Warming(f64);

impl Warming {
    pub const NONE: Warming = Warming(0.0);

    pub fn new(level: f64) -> Result<Self> {
        if !level.is_finite() || level < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "warming must be finite and non-negative, got {level}"
            )));
        }
        Ok(Self(level))
    }

    pub fn level(&self) -> f64 {
        self.0
    }

    /// Next year's level. A step that is not finite and non-negative is an error.
    pub fn advance(&self, step: f64) -> Result<Self> {
        Warming::new(step).and_then(|step| Warming::new(self.0 + step.0))
    }

    /// Probability that a surviving bird nests this year.
    pub fn nest_chance(&self) -> f64 {
        (BASE_NEST_CHANCE - self.0).clamp(0.0, 1.0)
    }

    /// `[early, late)`: draws below `early` leave too soon, draws at or
    /// above `late` leave too late.
    pub fn migration_window(&self) -> (f64, f64) {
        let early = (BASE_EARLY_MIGRATION + self.0).clamp(0.0, 1.0);
        let late = (BASE_LATE_MIGRATION - self.0).clamp(early, 1.0);
        (early, late)
    }
}

impl fmt::Display for Warming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResidentDecision {
    Nest,
    DontNest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MigratoryDecision {
    /// Left before the window and died on the way
    MigrateSoonAndDie,
    /// Came back on time and raises young
    ReturnAndNest,
    /// Came back on time without nesting
    ReturnAndDontNest,
    /// Came back after the window and found no habitat
    MigrateLateAndDie,
}

impl MigratoryDecision {
    pub fn survives_migration(&self) -> bool {
        matches!(
            self,
            MigratoryDecision::ReturnAndNest | MigratoryDecision::ReturnAndDontNest
        )
    }
}

pub fn decide_resident<R: Rng + ?Sized>(warming: Warming, rng: &mut R) -> ResidentDecision {
    if rng.gen::<f64>() < warming.nest_chance() {
        ResidentDecision::Nest
    } else {
        ResidentDecision::DontNest
    }
}

/// One draw for migration timing, a second only for on-time returners.
pub fn decide_migratory<R: Rng + ?Sized>(warming: Warming, rng: &mut R) -> MigratoryDecision {
    let (early, late) = warming.migration_window();
    let timing: f64 = rng.gen();

    if timing < early {
        MigratoryDecision::MigrateSoonAndDie
    } else if timing < late {
        match decide_resident(warming, rng) {
            ResidentDecision::Nest => MigratoryDecision::ReturnAndNest,
            ResidentDecision::DontNest => MigratoryDecision::ReturnAndDontNest,
        }
    } else {
        MigratoryDecision::MigrateLateAndDie
    }
}

/// Whether a nesting migrant with no room for its young abandons its site.
pub fn abandons_nest<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen::<f64>() < ABANDON_NEST_CHANCE
}
