use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::constants::SEED_SPACING;
use crate::config::{SeedJitter, SeedLayout};
use crate::core::particle::{Particle, ParticleView};
use crate::error::ConfigError;
use crate::math::{Real, Vector, repeat_vector, zero_vector};

/// Ordered particle storage. Indices are stable for the lifetime of the set.
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    /// Wrap an explicit particle list after checking it against the domain of
    /// a grid with `resolution` cells per axis.
    pub fn from_particles(
        particles: Vec<Particle>,
        resolution: usize,
    ) -> Result<Self, ConfigError> {
        let max = resolution as Real - 2.0;
        for (index, particle) in particles.iter().enumerate() {
            if !(particle.mass.is_finite() && particle.mass > 0.0) {
                return Err(ConfigError::InvalidParticleMass {
                    index,
                    mass: particle.mass,
                });
            }
            let position = particle.position;
            let inside = position.is_finite()
                && position.cmpge(repeat_vector(1.0)).all()
                && position.cmple(repeat_vector(max)).all();
            if !inside {
                return Err(ConfigError::ParticleOutOfDomain {
                    index,
                    position,
                    max,
                });
            }
            if !particle.is_finite() {
                return Err(ConfigError::NonFiniteParticle { index });
            }
        }

        Ok(Self { particles })
    }

    /// Seed a packed rectangular block as described by `layout`.
    pub fn from_layout(layout: &SeedLayout, resolution: usize) -> Result<Self, ConfigError> {
        if !(layout.spacing.is_finite() && layout.spacing > 0.0) {
            return Err(ConfigError::InvalidSpacing(layout.spacing));
        }

        let center = layout
            .center
            .unwrap_or_else(|| repeat_vector(resolution as Real / 2.0));
        let start = center - layout.size / 2.0;
        let end = center + layout.size / 2.0;

        let xs = axis_samples(start.x, end.x, layout.spacing);
        let ys = axis_samples(start.y, end.y, layout.spacing);

        let mut positions = Vec::with_capacity(xs.len() * ys.len());
        for &x in &xs {
            for &y in &ys {
                positions.push(Vector::new(x, y));
            }
        }

        if let Some(jitter) = layout.jitter {
            apply_jitter(&mut positions, jitter, resolution);
        }

        let particles = positions
            .into_iter()
            .map(|position| {
                Particle::new(position)
                    .with_velocity(layout.initial_velocity)
                    .with_mass(layout.particle_mass)
            })
            .collect();

        Self::from_particles(particles, resolution)
    }

    /// Pack `count` resting particles into the smallest square block centred
    /// in the grid.
    pub fn packed(count: usize, resolution: usize) -> Result<Self, ConfigError> {
        let side = (count as Real).sqrt().ceil() as usize;
        let extent = side as Real * SEED_SPACING;
        let start = repeat_vector(resolution as Real / 2.0 - extent / 2.0);

        let particles = (0..count)
            .map(|i| {
                let offset = Vector::new((i / side) as Real, (i % side) as Real) * SEED_SPACING;
                Particle::new(start + offset)
            })
            .collect();

        Self::from_particles(particles, resolution)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn views(&self) -> impl Iterator<Item = ParticleView> + '_ {
        self.particles.iter().enumerate().map(ParticleView::from)
    }

    pub fn total_mass(&self) -> Real {
        self.particles.iter().map(|p| p.mass).sum()
    }

    /// Mass-weighted centre of the particles, or zero for an empty set.
    pub fn centroid(&self) -> Vector {
        let total_mass = self.total_mass();
        if total_mass <= 0.0 {
            return zero_vector();
        }
        self.particles
            .iter()
            .fold(zero_vector(), |acc, p| acc + p.position * p.mass)
            / total_mass
    }
}

fn axis_samples(start: Real, end: Real, spacing: Real) -> Vec<Real> {
    let mut samples = Vec::new();
    let mut k = 0usize;
    loop {
        let value = start + k as Real * spacing;
        if value >= end {
            break;
        }
        samples.push(value);
        k += 1;
    }
    samples
}

fn apply_jitter(positions: &mut [Vector], jitter: SeedJitter, resolution: usize) {
    let amplitude = jitter.amplitude.abs();
    if amplitude == 0.0 || !amplitude.is_finite() {
        return;
    }

    let mut rng = StdRng::seed_from_u64(jitter.seed);
    let max = resolution as Real - 2.0;
    for position in positions.iter_mut() {
        let offset = Vector::new(
            rng.random_range(-amplitude..=amplitude),
            rng.random_range(-amplitude..=amplitude),
        );
        *position = (*position + offset).clamp(repeat_vector(1.0), repeat_vector(max));
    }
}
