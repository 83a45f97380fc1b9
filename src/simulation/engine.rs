//! The step driver that owns bodies, the quadtree and the worker pool.
//!
//! # Example
//!
//! ```
//! use rs_barnes_hut::simulation::Simulation;
//! use rs_barnes_hut::utils::SimulationConfig;
//!
//! let config = SimulationConfig::default().with_threads(2).with_seed(7);
//! let mut sim = Simulation::with_disc(200, config).unwrap();
//! let mass = sim.total_mass();
//!
//! sim.simulate(10);
//!
//! assert_eq!(sim.frame(), 10);
//! assert_eq!(sim.body_count(), 200);
//! assert!((sim.root().unwrap().mass - mass).abs() < 1e-6 * mass);
//! ```
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::models::{Body, Vec2};
use crate::scheduler::{compute_accelerations, WorkerPool};
use crate::simulation::{integrate, uniform_disc};
use crate::tree::{Node, Quadtree};
use crate::utils::{SimulationConfig, SimulationError};

#[cfg(feature = "collisions")]
use crate::collisions::resolve_collisions;

/// A Barnes-Hut N-body simulation.
///
/// Every method takes `&self` or `&mut self`, so a step never overlaps with
/// authoring calls or reads. Hosts that share one engine between threads put it
/// behind a single `Mutex`.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    frame: u64,
    bodies: Vec<Body>,
    quadtree: Quadtree,
    pool: WorkerPool,
    rng: StdRng,
}

impl Simulation {
    /// Creates an engine with no bodies.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate or the worker pool cannot
    /// be started.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let pool = WorkerPool::new(config.threads, config.min_chunk_size)?;

        info!(
            "Simulation created: dt={}, theta={}, epsilon={}, G={}, collisions={}",
            config.dt,
            config.theta,
            config.epsilon,
            config.gravity,
            config.collisions && cfg!(feature = "collisions")
        );

        Ok(Self {
            config,
            frame: 0,
            bodies: Vec::new(),
            quadtree: Quadtree::new(config.theta, config.epsilon),
            pool,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Creates an engine holding `bodies`.
    ///
    /// # Errors
    ///
    /// Fails like [`Simulation::new`], or with the first invalid body's error.
    pub fn with_bodies(bodies: Vec<Body>, config: SimulationConfig) -> Result<Self, SimulationError> {
        let bodies = bodies
            .into_iter()
            .map(|b| Body::try_new(b.pos, b.vel, b.mass, b.radius))
            .collect::<Result<Vec<_>, _>>()?;

        let mut sim = Self::new(config)?;
        sim.bodies = bodies;
        Ok(sim)
    }

    /// Creates an engine holding a seeded [`uniform_disc`] of `n` bodies.
    pub fn with_disc(n: usize, config: SimulationConfig) -> Result<Self, SimulationError> {
        let mut sim = Self::new(config)?;
        sim.reset(n);
        Ok(sim)
    }

    /// Runs one full cycle: rebuild the tree, resolve collisions, propagate
    /// masses, evaluate forces in parallel, then integrate.
    ///
    /// Bodies that cannot be placed in the tree are skipped for this step and
    /// logged; the step itself never fails.
    pub fn step(&mut self) {
        let skipped = self.quadtree.rebuild(&self.bodies);

        #[cfg(feature = "collisions")]
        let collisions = if self.config.collisions {
            resolve_collisions(&self.quadtree, &mut self.bodies)
        } else {
            0
        };
        #[cfg(not(feature = "collisions"))]
        let collisions = 0;

        self.quadtree.propagate();
        compute_accelerations(&self.pool, &self.quadtree, &mut self.bodies, self.config.gravity);
        integrate(&mut self.bodies, self.config.dt);

        self.frame += 1;
        debug!(
            "Frame {}: {} bodies, {} nodes, {} skipped, {} collisions",
            self.frame,
            self.bodies.len(),
            self.quadtree.len(),
            skipped,
            collisions
        );
    }

    /// Runs `steps` consecutive steps.
    pub fn simulate(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Appends one body.
    ///
    /// # Errors
    ///
    /// Returns the validation error from [`Body::try_new`].
    pub fn add_body(
        &mut self,
        pos: Vec2,
        vel: Vec2,
        mass: f64,
        radius: f64,
    ) -> Result<(), SimulationError> {
        self.bodies.push(Body::try_new(pos, vel, mass, radius)?);
        Ok(())
    }

    /// Adds `force` to the velocity of every body strictly closer than `radius`
    /// to `pos`, regardless of the body's own radius. Returns how many bodies
    /// were pushed.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite `pos`, a negative or non-finite
    /// `radius`, or a non-finite `force`.
    pub fn apply_force(&mut self, pos: Vec2, force: Vec2, radius: f64) -> Result<usize, SimulationError> {
        if !pos.is_finite() {
            return Err(SimulationError::InvalidPosition);
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(SimulationError::InvalidRadius);
        }
        if !force.is_finite() {
            return Err(SimulationError::CalculationError("Force must be finite".to_string()));
        }

        let r_sq = radius * radius;
        let mut pushed = 0;
        for body in &mut self.bodies {
            if (body.pos - pos).mag_sq() < r_sq {
                body.vel += force;
                pushed += 1;
            }
        }
        Ok(pushed)
    }

    /// Replaces all bodies with a fresh disc of `count` bodies drawn from the
    /// engine's generator and restarts the frame counter.
    pub fn reset(&mut self, count: usize) {
        self.bodies = uniform_disc(count, &mut self.rng, self.config.gravity);
        self.quadtree.clear();
        self.frame = 0;
        info!("Simulation reset with {} bodies", self.bodies.len());
    }

    /// Replaces the generator used by [`Simulation::reset`].
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Nodes of the tree built by the last step.
    pub fn nodes(&self) -> &[Node] {
        self.quadtree.nodes()
    }

    pub fn node_count(&self) -> usize {
        self.quadtree.len()
    }

    pub fn quadtree(&self) -> &Quadtree {
        &self.quadtree
    }

    /// Aggregate of every body in the last step's tree.
    pub fn root(&self) -> Option<&Node> {
        self.quadtree.root()
    }

    /// Number of steps taken since creation or the last reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn worker_threads(&self) -> usize {
        self.pool.threads()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    pub fn total_momentum(&self) -> Vec2 {
        self.bodies.iter().fold(Vec2::zero(), |acc, b| acc + b.momentum())
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }
}
