//! Particle-to-Grid (P2G) transfer operations
//!
//! Transfers mass, momentum, and forces from particles to grid nodes.
//! Includes stress calculation and APIC momentum transfer.

use crate::core::{Grid, GridInterpolation, Particle, inv_d};
use crate::materials::{FluidParams, calculate_stress, utils};
use crate::math::Real;

/// First scatter: mass and APIC momentum.
///
/// Afterwards each cell holds its total mass and unnormalised momentum.
/// Neighbors outside the grid are skipped.
pub fn particle_to_grid_mass_velocity(grid: &mut Grid, particles: &[Particle]) {
    for particle in particles {
        let interpolation = GridInterpolation::compute_for_particle(particle.position);

        for (coord, weight, cell_distance) in interpolation.iter_neighbors() {
            let Some(cell) = grid.get_cell_coord_mut(coord) else {
                continue;
            };

            let q = particle.affine_momentum_matrix * cell_distance;
            let mass_contribution = weight * particle.mass;

            cell.mass += mass_contribution;
            cell.velocity += mass_contribution * (particle.velocity + q);
        }
    }
}

/// Second scatter: stress impulses from the equation of state and viscosity.
///
/// Must run after [`particle_to_grid_mass_velocity`] has finished for every
/// particle, since densities are read back from the grid masses. Returns the
/// number of particles whose density had to be floored.
pub fn particle_to_grid_forces(
    grid: &mut Grid,
    particles: &[Particle],
    fluid: &FluidParams,
    dt: Real,
) -> usize {
    let inv_d = inv_d(1.0);
    let mut floored = 0;

    for particle in particles {
        let interpolation = GridInterpolation::compute_for_particle(particle.position);

        let mut density = 0.0;
        for (coord, weight, _) in interpolation.iter_neighbors() {
            if let Some(cell) = grid.get_cell_coord(coord) {
                density += cell.mass * weight;
            }
        }

        let (volume, was_floored) = utils::particle_volume(particle.mass, density);
        if was_floored {
            floored += 1;
        }

        let stress = calculate_stress(&particle.affine_momentum_matrix, density, fluid);
        let eq_16_term_0 = stress * (-volume * inv_d * dt);

        for (coord, weight, cell_distance) in interpolation.iter_neighbors() {
            if let Some(cell) = grid.get_cell_coord_mut(coord) {
                let momentum = eq_16_term_0 * cell_distance * weight;
                cell.velocity += momentum;
            }
        }
    }

    floored
}
