// src/utils/config.rs

use crate::utils::errors::SimulationError;

pub const DEFAULT_SIMULATION_CONFIG: SimulationConfig = SimulationConfig {
    dt: 0.05,
    theta: 1.0,
    epsilon: 1.0,
    gravity: 1.0,
    collisions: true,
    threads: 0,
    min_chunk_size: 64,
    seed: 0,
};

/// Runtime settings for a [`Simulation`](crate::simulation::Simulation).
///
/// * `dt` - Time step per `step()` call.
/// * `theta` - Barnes-Hut opening angle; larger is faster and less accurate.
/// * `epsilon` - Plummer softening length.
/// * `gravity` - Gravitational constant `G`.
/// * `collisions` - Whether the collision pass runs (requires the `collisions` feature).
/// * `threads` - Worker pool size; `0` uses the rayon default (one per core).
/// * `min_chunk_size` - Lower bound on bodies per force-evaluation job.
/// * `seed` - Seed for the generator used by `reset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub dt: f64,
    pub theta: f64,
    pub epsilon: f64,
    pub gravity: f64,
    pub collisions: bool,
    pub threads: usize,
    pub min_chunk_size: usize,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONFIG
    }
}

impl SimulationConfig {
    /// Builds a configuration, falling back to the defaults for every `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_barnes_hut::utils::SimulationConfig;
    ///
    /// let config = SimulationConfig::new(Some(0.01), None, None, Some(0.5), None);
    /// assert_eq!(config.dt, 0.01);
    /// assert_eq!(config.gravity, 0.5);
    /// assert_eq!(config.theta, SimulationConfig::default().theta);
    /// ```
    pub fn new(
        dt: Option<f64>,
        theta: Option<f64>,
        epsilon: Option<f64>,
        gravity: Option<f64>,
        collisions: Option<bool>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONFIG;
        Self {
            dt: dt.unwrap_or(default.dt),
            theta: theta.unwrap_or(default.theta),
            epsilon: epsilon.unwrap_or(default.epsilon),
            gravity: gravity.unwrap_or(default.gravity),
            collisions: collisions.unwrap_or(default.collisions),
            ..default
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_min_chunk_size(mut self, min_chunk_size: usize) -> Self {
        self.min_chunk_size = min_chunk_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks every numeric setting, returning the first problem found.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.dt.is_finite() || self.dt <= 0.0 { return Err(SimulationError::InvalidTimeStep); }
        if !self.theta.is_finite() || self.theta < 0.0 { return Err(SimulationError::InvalidTheta); }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 { return Err(SimulationError::InvalidEpsilon); }
        if !self.gravity.is_finite() {
            return Err(SimulationError::CalculationError("Gravitational constant must be finite".to_string()));
        }
        if self.min_chunk_size == 0 {
            return Err(SimulationError::CalculationError("Minimum chunk size must be at least 1".to_string()));
        }
        Ok(())
    }
}
