//! Transfer tests (P2G and G2P)
//!
//! Drives the individual pipeline stages on hand-built particle sets.

use mpm_fluid2d::math::{Matrix, Real, Vector, matrix_max_abs};
use mpm_fluid2d::{BoundaryHandling, Particle, Solver, SolverConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_interior_particles(rng: &mut StdRng, count: usize, lo: Real, hi: Real) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            Particle::new(Vector::new(rng.random_range(lo..hi), rng.random_range(lo..hi)))
                .with_mass(rng.random_range(0.5..2.0))
                .with_velocity(Vector::new(
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                ))
        })
        .collect()
}

fn free_config() -> SolverConfig {
    SolverConfig::default()
        .without_gravity()
        .with_boundary(BoundaryHandling::None)
}

/// Total grid mass after the momentum scatter equals the particle mass.
#[test]
fn test_p2g_conserves_mass() {
    let mut rng = StdRng::seed_from_u64(42);
    let particles = random_interior_particles(&mut rng, 500, 3.0, 60.0);
    let expected: Real = particles.iter().map(|p| p.mass).sum();

    let mut solver = Solver::from_particles(SolverConfig::default(), particles).unwrap();
    solver.reset_grid();
    solver.particle_to_grid();

    let total = solver.grid().total_mass();
    assert!(
        (total - expected).abs() < 1e-9 * expected,
        "grid mass {total} != particle mass {expected}"
    );
}

/// Momentum scatter with no affine term transfers exactly the particle momentum.
#[test]
fn test_p2g_conserves_momentum() {
    let mut rng = StdRng::seed_from_u64(3);
    let particles = random_interior_particles(&mut rng, 200, 5.0, 58.0);
    let expected = particles
        .iter()
        .fold(Vector::ZERO, |acc, p| acc + p.velocity * p.mass);

    let mut solver = Solver::from_particles(SolverConfig::default(), particles).unwrap();
    solver.reset_grid();
    solver.particle_to_grid();

    assert!((solver.grid().total_momentum() - expected).length() < 1e-9);
}

#[test]
fn test_reset_grid_is_idempotent() {
    let mut solver = Solver::new(SolverConfig::default()).unwrap();
    solver.step();
    assert!(solver.grid().active_cell_count() > 0);

    solver.reset_grid();
    solver.reset_grid();

    for cell in solver.grid().cells() {
        assert_eq!(cell.mass, 0.0);
        assert_eq!(cell.velocity, Vector::ZERO);
    }
}

/// A spatially uniform velocity field has zero gradient, so G2P must
/// reconstruct `C = 0` for every particle.
#[test]
fn test_g2p_uniform_velocity_gives_zero_affine() {
    let velocity = Vector::new(0.4, -0.25);
    let mut rng = StdRng::seed_from_u64(11);
    let particles: Vec<Particle> = random_interior_particles(&mut rng, 300, 10.0, 50.0)
        .into_iter()
        .map(|p| p.with_velocity(velocity))
        .collect();

    let mut solver = Solver::from_particles(free_config(), particles).unwrap();
    solver.reset_grid();
    solver.particle_to_grid();
    solver.update_grid(0.2);
    solver.grid_to_particle(0.0);

    for (i, particle) in solver.particles().iter().enumerate() {
        assert!(
            (particle.velocity - velocity).length() < 1e-9,
            "particle {i} velocity {}",
            particle.velocity
        );
        assert!(
            matrix_max_abs(&particle.affine_momentum_matrix) < 1e-9,
            "particle {i} C = {:?}",
            particle.affine_momentum_matrix
        );
    }
}

/// APIC round trip of an affine velocity field `v = A x + b` reproduces both
/// the velocity and `C = A`. A sign mismatch between the scatter and gather
/// distance vectors would flip `C` here.
#[test]
fn test_affine_field_round_trip() {
    let a = Matrix::from_cols(Vector::new(0.05, 0.3), Vector::new(-0.3, -0.02));
    let b = Vector::new(0.1, -0.2);

    let mut rng = StdRng::seed_from_u64(5);
    let particles: Vec<Particle> = random_interior_particles(&mut rng, 200, 12.0, 50.0)
        .into_iter()
        .map(|p| {
            let velocity = a * p.position + b;
            p.with_velocity(velocity).with_affine(a)
        })
        .collect();
    let expected_velocities: Vec<Vector> = particles.iter().map(|p| p.velocity).collect();

    let mut solver = Solver::from_particles(free_config(), particles).unwrap();
    solver.reset_grid();
    solver.particle_to_grid();
    solver.update_grid(0.2);
    solver.grid_to_particle(0.0);

    for (particle, expected) in solver.particles().iter().zip(expected_velocities) {
        assert!((particle.velocity - expected).length() < 1e-9);
        let error = particle.affine_momentum_matrix - a;
        assert!(matrix_max_abs(&error) < 1e-9, "C = {:?}", particle.affine_momentum_matrix);
    }
}

/// Stress impulses are internal forces: they redistribute momentum but do
/// not create any.
#[test]
fn test_stress_scatter_adds_no_net_momentum() {
    let mut rng = StdRng::seed_from_u64(8);
    let particles: Vec<Particle> = random_interior_particles(&mut rng, 400, 20.0, 30.0)
        .into_iter()
        .map(|p| p.with_velocity(Vector::ZERO))
        .collect();

    let mut solver = Solver::from_particles(free_config(), particles).unwrap();
    solver.reset_grid();
    solver.particle_to_grid();
    let floored = solver.particle_to_grid_forces(0.2);

    assert_eq!(floored, 0);
    assert!(solver.grid().total_momentum().length() < 1e-8);
}
