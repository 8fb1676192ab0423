pub mod grid;
pub mod kernel;
pub mod particle;
pub mod particle_set;

pub use grid::{BoundaryHandling, Cell, Grid, apply_boundary_conditions, is_valid_grid_coord};
pub use kernel::{GridInterpolation, KERNEL_SIZE, NEIGHBOR_COUNT, inv_d, quadratic_weights};
pub use particle::{Particle, ParticleView};
pub use particle_set::ParticleSet;
