use bevy::log::LogPlugin;
use bevy::prelude::*;
use mpm_fluid2d::{FluidPlugin, Solver, SolverConfig};

const DEFAULT_FRAMES: u64 = 200;
const REPORT_PERIOD: u64 = 25;

fn main() {
    let frames = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let config = SolverConfig::default().with_stats_log_interval(REPORT_PERIOD);

    let mut app = App::new();
    app.add_plugins(LogPlugin::default())
        .add_plugins(FluidPlugin::new(config));

    for _ in 0..frames {
        app.update();
    }

    match app.world().get_resource::<Solver>() {
        Some(solver) => info!("after {} frames: {}", solver.frame(), solver.stats()),
        None => error!("no solver was created"),
    }
}
