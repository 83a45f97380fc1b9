mod integrator;
mod scenario;
mod engine;

pub use integrator::*;
pub use scenario::*;
pub use engine::*;

#[cfg(test)]
mod scenario_tests;
