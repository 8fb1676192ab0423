//! Material particles for the fluid simulation
//!
//! Particles carry position, velocity, mass and the APIC affine matrix.

use crate::config::constants::PARTICLE_MASS;
use crate::math::{Matrix, Real, Vector, matrix_is_finite, zero_matrix, zero_vector};

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Grid-index space, not world space.
    pub position: Vector,
    pub velocity: Vector,
    pub mass: Real,
    pub affine_momentum_matrix: Matrix, // APIC affine velocity field (C matrix)
}

impl Particle {
    pub fn zeroed() -> Self {
        Self {
            position: zero_vector(),
            velocity: zero_vector(),
            mass: PARTICLE_MASS,
            affine_momentum_matrix: zero_matrix(),
        }
    }

    pub fn new(position: Vector) -> Self {
        Self {
            position,
            ..Self::zeroed()
        }
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: Real) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_affine(mut self, affine: Matrix) -> Self {
        self.affine_momentum_matrix = affine;
        self
    }

    #[inline(always)]
    pub fn kinetic_energy(&self) -> Real {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// True when every component of the particle state is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.mass.is_finite()
            && matrix_is_finite(&self.affine_momentum_matrix)
    }
}

/// Read-only snapshot handed to rendering and other consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub index: usize,
    pub position: Vector,
    pub velocity: Vector,
}

impl From<(usize, &Particle)> for ParticleView {
    fn from((index, particle): (usize, &Particle)) -> Self {
        Self {
            index,
            position: particle.position,
            velocity: particle.velocity,
        }
    }
}
