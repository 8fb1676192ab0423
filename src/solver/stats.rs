//! Per-frame simulation statistics

use std::fmt;

use crate::core::{Grid, ParticleSet};
use crate::math::{Real, Vector};

/// Aggregate diagnostics for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationStats {
    pub particle_count: usize,
    pub total_mass: Real,
    pub centroid: Vector,
    pub kinetic_energy: Real,
    pub max_speed: Real,
    /// Cells that received mass in the last substep.
    pub active_cells: usize,
}

impl SimulationStats {
    pub fn collect(particles: &ParticleSet, grid: &Grid) -> Self {
        let (kinetic_energy, max_speed) = particles
            .iter()
            .fold((0.0, 0.0), |(energy, speed): (Real, Real), p| {
                (energy + p.kinetic_energy(), speed.max(p.velocity.length()))
            });

        Self {
            particle_count: particles.len(),
            total_mass: particles.total_mass(),
            centroid: particles.centroid(),
            kinetic_energy,
            max_speed,
            active_cells: grid.active_cell_count(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.total_mass.is_finite()
            && self.centroid.is_finite()
            && self.kinetic_energy.is_finite()
            && self.max_speed.is_finite()
    }
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "particles={} mass={:.3} centroid=({:.2},{:.2}) ke={:.4} max_speed={:.3} active_cells={}",
            self.particle_count,
            self.total_mass,
            self.centroid.x,
            self.centroid.y,
            self.kinetic_energy,
            self.max_speed,
            self.active_cells
        )
    }
}
