//! Two-dimensional MLS-MPM fluid with APIC transfers.
//!
//! The [`Solver`] advances a weakly-compressible fluid one frame at a time;
//! [`FluidPlugin`] drives it from a bevy `App`.

use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod error;
pub mod materials;
pub mod math;
pub mod solver;

// Public re-exports for clean API
pub use config::{GRAVITY, SeedLayout, SolverConfig};
pub use crate::core::{BoundaryHandling, Cell, Grid, Particle, ParticleView};
pub use error::ConfigError;
pub use materials::FluidParams;
pub use solver::{SimulationStats, Solver};

/// Inserts a [`Solver`] built from `config` and steps it once per update.
#[derive(Default)]
pub struct FluidPlugin {
    pub config: SolverConfig,
}

impl FluidPlugin {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl Plugin for FluidPlugin {
    fn build(&self, app: &mut App) {
        match Solver::new(self.config.clone()) {
            Ok(solver) => {
                app.insert_resource(solver);
            }
            Err(err) => error!("fluid solver not created: {err}"),
        }
        app.add_systems(Update, step_solver);
    }
}

fn step_solver(solver: Option<ResMut<Solver>>) {
    if let Some(mut solver) = solver {
        solver.step();
    }
}
