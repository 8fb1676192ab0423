// Default constants for the fluid solver
use crate::math::{Real, Vector};

// Domain
pub const GRID_RESOLUTION: usize = 64;
/// Width of the no-penetration band along every wall, in cells.
pub const WALL_THICKNESS: usize = 2;
/// Smallest grid that still has an interior cell inside the wall band.
pub const MIN_GRID_RESOLUTION: usize = 2 * WALL_THICKNESS + 1;

// Time stepping
pub const TIME_STEP: Real = 0.2;
pub const SUBSTEPS: u32 = 1;

// Global physics
pub const GRAVITY: Vector = Vector::new(0.0, -0.3);

// Fluid material constants
pub const REST_DENSITY: Real = 4.0;
pub const DYNAMIC_VISCOSITY: Real = 0.1;

// Equation of state parameters
pub const EOS_STIFFNESS: Real = 10.0;
pub const EOS_POWER: Real = 4.0;
/// Lower bound on EOS pressure; keeps tensile pressure bounded.
pub const PRESSURE_FLOOR: Real = -0.1;

/// Density floor applied before computing particle volume.
pub const MIN_DENSITY: Real = 1e-6;

// Initial particle block
pub const PARTICLE_MASS: Real = 1.0;
pub const SEED_SPACING: Real = 0.5;
pub const SEED_BLOCK_SIZE: Real = 32.0;
