use thiserror::Error;

use crate::math::{Real, Vector};

/// Reasons a solver cannot be built from the given configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid resolution {resolution} is below the minimum of {minimum}")]
    GridTooSmall { resolution: usize, minimum: usize },
    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(Real),
    #[error("substep count must be at least 1")]
    ZeroSubsteps,
    #[error("gravity must be finite, got {0}")]
    InvalidGravity(Vector),
    #[error("rest density must be finite and positive, got {0}")]
    InvalidRestDensity(Real),
    #[error("EOS stiffness must be finite and non-negative, got {0}")]
    InvalidStiffness(Real),
    #[error("EOS power must be finite, got {0}")]
    InvalidPower(Real),
    #[error("dynamic viscosity must be finite and non-negative, got {0}")]
    InvalidViscosity(Real),
    #[error("seed spacing must be finite and positive, got {0}")]
    InvalidSpacing(Real),
    #[error("particle {index} has invalid mass {mass}")]
    InvalidParticleMass { index: usize, mass: Real },
    #[error("particle {index} at {position} lies outside the domain [1, {max}]")]
    ParticleOutOfDomain {
        index: usize,
        position: Vector,
        max: Real,
    },
    #[error("particle {index} has a non-finite velocity or affine matrix")]
    NonFiniteParticle { index: usize },
}
