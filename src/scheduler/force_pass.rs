use crate::models::{Body, Vec2};
use crate::scheduler::WorkerPool;
use crate::tree::Quadtree;

/// Writes the gravitational acceleration of every body from `tree`.
///
/// `tree` must already be propagated. It is only read here, and each worker
/// writes the `acc` field of the bodies in its own chunk. A body with a
/// non-finite position gets zero acceleration.
pub fn compute_accelerations(pool: &WorkerPool, tree: &Quadtree, bodies: &mut [Body], gravity: f64) {
    pool.for_each_chunk(bodies, |body| {
        body.acc = if body.pos.is_finite() {
            tree.acceleration_at(body.pos, gravity)
        } else {
            Vec2::zero()
        };
    });
}
