//! Barnes-Hut gravitational N-body simulation in two dimensions.
//!
//! Each [`simulation::Simulation::step`] rebuilds a flat arena quadtree over
//! the bodies, optionally resolves collisions through the same tree, computes
//! aggregate masses bottom-up, evaluates softened gravity in parallel on an
//! owned worker pool and integrates with semi-implicit Euler.
pub mod utils;
pub mod models;
pub mod tree;
pub mod forces;
pub mod scheduler;
#[cfg(feature = "collisions")]
pub mod collisions;
pub mod simulation;
