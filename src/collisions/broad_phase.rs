//! Candidate pair search over the gravity quadtree.
//!
//! The walk uses the same `children`/`next` links as the force evaluator, with
//! box overlap in place of the opening-angle test. A node whose square misses
//! the query box is skipped together with its whole subtree.
use crate::collisions::resolve;
use crate::models::{Body, Vec2};
use crate::tree::{BodyIndex, NodeIndex, Quadtree};

impl Quadtree {
    /// Calls `on_candidate` for every occupied leaf whose square touches the box
    /// `pos ± reach` and whose body index is greater than `body`.
    ///
    /// Only greater indices are reported, so a caller querying every body sees
    /// each unordered pair once. `reach` has to cover the partner's radius too,
    /// since leaves are tested by their square, not by the bodies inside them.
    pub fn find_collisions(
        &self,
        body: BodyIndex,
        pos: Vec2,
        reach: f64,
        mut on_candidate: impl FnMut(BodyIndex),
    ) {
        if self.is_empty() {
            return;
        }

        let min = pos - Vec2::broadcast(reach);
        let max = pos + Vec2::broadcast(reach);
        let nodes = self.nodes();

        let mut node = NodeIndex::ROOT;
        loop {
            let n = &nodes[node.index()];
            let hit = n.quad.overlaps(min, max);

            if hit && n.is_branch() {
                node = n.children;
                continue;
            }

            if hit && !n.body.is_none() && n.mass > 0.0 && n.body > body {
                on_candidate(n.body);
            }

            if n.next.is_null() {
                break;
            }
            node = n.next;
        }
    }
}

/// Resolves every overlapping pair found through `tree` and returns how many
/// pairs were pushed apart.
///
/// `tree` must have been rebuilt from `bodies` in their current order. Pairs are
/// visited in order of the lower index and each pair is resolved at most once.
pub fn resolve_collisions(tree: &Quadtree, bodies: &mut [Body]) -> usize {
    let max_radius = bodies
        .iter()
        .map(|b| b.radius)
        .filter(|r| r.is_finite())
        .fold(0.0_f64, f64::max);

    let mut resolved = 0;
    for i in 0..bodies.len() {
        let Some(index) = BodyIndex::new(i) else {
            break;
        };
        let Body { pos, radius, .. } = bodies[i];
        if !pos.is_finite() || !radius.is_finite() {
            continue;
        }

        tree.find_collisions(index, pos, radius + max_radius, |other| {
            let j = other.index();
            if j < bodies.len() && resolve(bodies, i, j) {
                resolved += 1;
            }
        });
    }
    resolved
}
