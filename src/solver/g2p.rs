//! Grid-to-Particle (G2P) transfer operations
//!
//! Transfers velocities and velocity gradients from grid nodes back to particles
//! and advects them.

use crate::core::{GridInterpolation, Grid, Particle, inv_d};
use crate::math::{Real, outer_product, repeat_vector, zero_matrix, zero_vector};

pub fn grid_to_particle(grid: &Grid, particles: &mut [Particle], dt: Real) {
    let inv_d = inv_d(1.0);
    let lower = repeat_vector(1.0);
    let upper = repeat_vector(grid.resolution() as Real - 2.0);

    for particle in particles.iter_mut() {
        let interpolation = GridInterpolation::compute_for_particle(particle.position);

        let mut velocity = zero_vector();
        let mut b = zero_matrix();

        for (coord, weight, cell_distance) in interpolation.iter_neighbors() {
            if let Some(cell) = grid.get_cell_coord(coord) {
                let weighted_velocity = cell.velocity * weight;

                velocity += weighted_velocity;
                b += outer_product(weighted_velocity, cell_distance);
            }
        }

        particle.velocity = velocity;
        particle.affine_momentum_matrix = b * inv_d;

        particle.position += particle.velocity * dt;

        // Prevent particles from going out of bounds
        particle.position = particle.position.clamp(lower, upper);
    }
}
