// demos/headless.rs

use log::info;
use rs_barnes_hut::simulation::Simulation;
use rs_barnes_hut::utils::{SimulationConfig, SimulationError};

fn main() -> Result<(), SimulationError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let bodies = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(10_000);
    let steps = std::env::args()
        .nth(2)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(200);

    let config = SimulationConfig::default().with_seed(1);
    let mut sim = Simulation::with_disc(bodies, config)?;

    let initial_energy = sim.kinetic_energy();
    let started = std::time::Instant::now();

    for chunk in 0..steps / 50 {
        sim.simulate(50);
        info!(
            "frame {}: {} nodes, kinetic energy {:.3e}, momentum ({:.3e}, {:.3e})",
            sim.frame(),
            sim.node_count(),
            sim.kinetic_energy(),
            sim.total_momentum().x,
            sim.total_momentum().y
        );
        if chunk == 0 {
            info!("first 50 steps took {:?}", started.elapsed());
        }
    }
    sim.simulate(steps % 50);

    let elapsed = started.elapsed();
    info!(
        "{} steps of {} bodies on {} threads in {:?} ({:.2} ms/step)",
        sim.frame(),
        sim.body_count(),
        sim.worker_threads(),
        elapsed,
        elapsed.as_secs_f64() * 1000.0 / sim.frame().max(1) as f64
    );
    info!(
        "kinetic energy {:.3e} -> {:.3e}, root mass {:.6e}",
        initial_energy,
        sim.kinetic_energy(),
        sim.root().map_or(0.0, |root| root.mass)
    );

    Ok(())
}
