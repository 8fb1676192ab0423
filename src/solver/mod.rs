//! The per-frame MLS-MPM pipeline.
//!
//! [`Solver`] owns the particles, the grid and the configuration and runs the
//! stages in a fixed order:
//! `reset_grid -> particle_to_grid -> particle_to_grid_forces -> update_grid -> grid_to_particle`.
//! Every stage is a full pass; none may start before the previous one is done.

pub mod g2p;
pub mod grid_update;
pub mod p2g;
pub mod stats;

pub use g2p::grid_to_particle;
pub use grid_update::update_grid;
pub use p2g::{particle_to_grid_forces, particle_to_grid_mass_velocity};
pub use stats::SimulationStats;

use bevy::log::{debug, info, warn};
use bevy::prelude::Resource;

use crate::config::SolverConfig;
use crate::core::{Grid, Particle, ParticleSet, ParticleView};
use crate::error::ConfigError;
use crate::materials::FluidParams;
use crate::math::{Real, Vector};

/// Aggregate simulation state.
#[derive(Resource, Debug, Clone)]
pub struct Solver {
    particle_set: ParticleSet,
    grid: Grid,
    config: SolverConfig,
    fluid: FluidParams,
    frame: u64,
}

impl Solver {
    /// Build a solver and seed particles from `config.seeding`.
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let particle_set = ParticleSet::from_layout(&config.seeding, config.grid_resolution)?;
        Ok(Self::assemble(config, particle_set))
    }

    /// Default material and time step on a grid of `grid_resolution`, with
    /// `particle_count` resting particles packed in a square at the centre.
    pub fn with_seed_count(
        grid_resolution: usize,
        particle_count: usize,
    ) -> Result<Self, ConfigError> {
        let config = SolverConfig::default().with_grid_resolution(grid_resolution);
        config.validate()?;
        let particle_set = ParticleSet::packed(particle_count, grid_resolution)?;
        Ok(Self::assemble(config, particle_set))
    }

    /// Build a solver around an explicit particle list; `config.seeding` is
    /// ignored.
    pub fn from_particles(
        config: SolverConfig,
        particles: Vec<Particle>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let particle_set = ParticleSet::from_particles(particles, config.grid_resolution)?;
        Ok(Self::assemble(config, particle_set))
    }

    fn assemble(config: SolverConfig, particle_set: ParticleSet) -> Self {
        info!(
            "fluid solver: {}x{} grid, {} particles, dt={} ({} substeps)",
            config.grid_resolution,
            config.grid_resolution,
            particle_set.len(),
            config.time_step,
            config.substeps
        );

        Self {
            grid: Grid::new(config.grid_resolution),
            fluid: config.fluid_params(),
            particle_set,
            config,
            frame: 0,
        }
    }

    /// Advance one frame of `config.time_step`.
    pub fn step(&mut self) {
        self.step_with_dt(self.config.time_step);
    }

    /// Advance one frame of `frame_dt`, split into `config.substeps` passes.
    ///
    /// A non-finite or non-positive `frame_dt` falls back to `config.time_step`.
    pub fn step_with_dt(&mut self, frame_dt: Real) {
        let frame_dt = if frame_dt.is_finite() && frame_dt > 0.0 {
            frame_dt
        } else {
            warn!(
                "frame {}: invalid frame time {}, using {}",
                self.frame, frame_dt, self.config.time_step
            );
            self.config.time_step
        };
        let dt = self.config.substep_dt(frame_dt);
        let mut floored = 0;

        for _ in 0..self.config.substeps {
            self.reset_grid();
            self.particle_to_grid();
            floored += self.particle_to_grid_forces(dt);
            self.update_grid(dt);
            self.grid_to_particle(dt);
        }

        if floored > 0 {
            warn!(
                "frame {}: {} particle(s) saw an empty neighbourhood, density floored",
                self.frame, floored
            );
        }

        self.frame += 1;

        let interval = self.config.stats_log_interval;
        if interval > 0 && self.frame % interval == 0 {
            debug!("frame {}: {}", self.frame, self.stats());
        }
    }

    pub fn reset_grid(&mut self) {
        self.grid.zero_cells();
    }

    pub fn particle_to_grid(&mut self) {
        particle_to_grid_mass_velocity(&mut self.grid, self.particle_set.particles());
    }

    /// Returns the number of particles whose density was floored.
    pub fn particle_to_grid_forces(&mut self, dt: Real) -> usize {
        particle_to_grid_forces(&mut self.grid, self.particle_set.particles(), &self.fluid, dt)
    }

    pub fn update_grid(&mut self, dt: Real) {
        update_grid(&mut self.grid, self.config.gravity, self.config.boundary, dt);
    }

    pub fn grid_to_particle(&mut self, dt: Real) {
        grid_to_particle(&self.grid, self.particle_set.particles_mut(), dt);
    }

    pub fn particles(&self) -> &[Particle] {
        self.particle_set.particles()
    }

    pub fn particle_set(&self) -> &ParticleSet {
        &self.particle_set
    }

    pub fn particle_views(&self) -> impl Iterator<Item = ParticleView> + '_ {
        self.particle_set.views()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector> + '_ {
        self.particle_set.iter().map(|p| p.position)
    }

    pub fn particle_count(&self) -> usize {
        self.particle_set.len()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of completed frames.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats::collect(&self.particle_set, &self.grid)
    }
}
