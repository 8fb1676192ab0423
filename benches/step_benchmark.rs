/// Simple custom benchmarking without criterion
use std::time::Instant;

use mpm_fluid2d::{SeedLayout, Solver, SolverConfig};

fn time_it<F: FnMut()>(name: &str, iterations: usize, mut f: F) {
    // Warmup
    for _ in 0..5 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();

    let avg_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
    println!("{}: {:.3}ms avg ({} iterations)", name, avg_ms, iterations);
}

fn solver_with_block(side: f64) -> Solver {
    let config = SolverConfig::default().with_seeding(SeedLayout::square(side));
    match Solver::new(config) {
        Ok(solver) => solver,
        Err(err) => panic!("benchmark setup failed: {err}"),
    }
}

fn main() {
    println!("\n=== Fluid Step Benchmarks ===\n");

    println!("--- Full step ---");
    for &side in &[8.0, 16.0, 32.0, 48.0] {
        let mut solver = solver_with_block(side);
        let count = solver.particle_count();
        time_it(&format!("step (n={})", count), 20, || solver.step());
    }

    println!("\n--- Stages (n=4096) ---");
    let mut solver = solver_with_block(32.0);
    let dt = solver.config().time_step;
    solver.step();

    time_it("reset_grid", 50, || solver.reset_grid());
    time_it("particle_to_grid", 20, || {
        solver.reset_grid();
        solver.particle_to_grid();
    });
    time_it("particle_to_grid_forces", 20, || {
        solver.particle_to_grid_forces(dt);
    });
    time_it("grid_to_particle", 20, || solver.grid_to_particle(dt));

    println!("\n=== Benchmark Complete ===\n");
}
