use crate::core::BoundaryHandling;
use crate::error::ConfigError;
use crate::materials::FluidParams;
use crate::math::{Real, Vector, zero_vector};

use super::constants::*;

/// Deterministic positional noise added to seeded particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedJitter {
    pub seed: u64,
    /// Maximum offset per axis, in cells.
    pub amplitude: Real,
}

/// Initial layout of the particle block.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedLayout {
    /// Block centre; `None` places it at the grid centre.
    pub center: Option<Vector>,
    /// Block extent per axis, in cells.
    pub size: Vector,
    pub spacing: Real,
    pub particle_mass: Real,
    pub initial_velocity: Vector,
    pub jitter: Option<SeedJitter>,
}

impl Default for SeedLayout {
    fn default() -> Self {
        Self {
            center: None,
            size: Vector::splat(SEED_BLOCK_SIZE),
            spacing: SEED_SPACING,
            particle_mass: PARTICLE_MASS,
            initial_velocity: zero_vector(),
            jitter: None,
        }
    }
}

impl SeedLayout {
    /// Square block of `side` cells centred in the grid.
    pub fn square(side: Real) -> Self {
        Self {
            size: Vector::splat(side),
            ..Self::default()
        }
    }

    pub fn with_center(mut self, center: Vector) -> Self {
        self.center = Some(center);
        self
    }

    pub fn with_spacing(mut self, spacing: Real) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.initial_velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: Real) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_jitter(mut self, seed: u64, amplitude: Real) -> Self {
        self.jitter = Some(SeedJitter { seed, amplitude });
        self
    }
}

/// Solver parameters for controlling the fluid simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Cells per axis; the grid holds `grid_resolution²` cells.
    pub grid_resolution: usize,
    pub gravity: Vector,
    pub rest_density: Real,
    pub eos_stiffness: Real,
    pub eos_power: Real,
    pub dynamic_viscosity: Real,
    /// Simulated time advanced by one `step()`.
    pub time_step: Real,
    /// Number of equal pipeline passes per frame.
    pub substeps: u32,
    pub boundary: BoundaryHandling,
    pub seeding: SeedLayout,
    /// Frames between `debug!` statistics lines; 0 disables them.
    pub stats_log_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            grid_resolution: GRID_RESOLUTION,
            gravity: GRAVITY,
            rest_density: REST_DENSITY,
            eos_stiffness: EOS_STIFFNESS,
            eos_power: EOS_POWER,
            dynamic_viscosity: DYNAMIC_VISCOSITY,
            time_step: TIME_STEP,
            substeps: SUBSTEPS,
            boundary: BoundaryHandling::Slip,
            seeding: SeedLayout::default(),
            stats_log_interval: 0,
        }
    }
}

impl SolverConfig {
    pub fn with_grid_resolution(mut self, resolution: usize) -> Self {
        self.grid_resolution = resolution;
        self
    }

    pub fn with_gravity(mut self, gravity: Vector) -> Self {
        self.gravity = gravity;
        self
    }

    /// Disable gravity entirely.
    pub fn without_gravity(self) -> Self {
        self.with_gravity(zero_vector())
    }

    pub fn with_fluid(mut self, fluid: FluidParams) -> Self {
        self.rest_density = fluid.rest_density;
        self.eos_stiffness = fluid.eos_stiffness;
        self.eos_power = fluid.eos_power;
        self.dynamic_viscosity = fluid.dynamic_viscosity;
        self
    }

    pub fn with_time_step(mut self, time_step: Real) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryHandling) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_seeding(mut self, seeding: SeedLayout) -> Self {
        self.seeding = seeding;
        self
    }

    pub fn with_stats_log_interval(mut self, frames: u64) -> Self {
        self.stats_log_interval = frames;
        self
    }

    /// Material constants grouped for the stress computation.
    pub fn fluid_params(&self) -> FluidParams {
        FluidParams {
            rest_density: self.rest_density,
            eos_stiffness: self.eos_stiffness,
            eos_power: self.eos_power,
            dynamic_viscosity: self.dynamic_viscosity,
        }
    }

    /// Largest coordinate a particle may take on either axis.
    pub fn domain_max(&self) -> Real {
        self.grid_resolution as Real - 2.0
    }

    /// Time advanced by a single pipeline pass for a frame of `frame_dt`.
    pub fn substep_dt(&self, frame_dt: Real) -> Real {
        frame_dt / self.substeps.max(1) as Real
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_resolution < MIN_GRID_RESOLUTION {
            return Err(ConfigError::GridTooSmall {
                resolution: self.grid_resolution,
                minimum: MIN_GRID_RESOLUTION,
            });
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::InvalidTimeStep(self.time_step));
        }
        if self.substeps == 0 {
            return Err(ConfigError::ZeroSubsteps);
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        self.fluid_params().validate()?;
        if !(self.seeding.spacing.is_finite() && self.seeding.spacing > 0.0) {
            return Err(ConfigError::InvalidSpacing(self.seeding.spacing));
        }
        Ok(())
    }
}
