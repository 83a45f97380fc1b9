//! Barnes-Hut acceleration queries against a propagated [`Quadtree`].
//!
//! A node is treated as a single point mass when it is a leaf or when
//! `size² < dist² · theta²`. Accepted nodes contribute a Plummer-softened term
//! `d · G·m / (dist² + epsilon²)^{3/2}` and the walk continues at `next`;
//! rejected nodes are opened by moving to `children`. The walk needs no stack
//! and does not allocate.
use crate::models::Vec2;
use crate::tree::{Node, NodeIndex, Quadtree};

/// Node counts gathered during one query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Nodes whose acceptance test was evaluated.
    pub visited: usize,
    /// Nodes treated as a single point mass.
    pub accepted: usize,
}

#[inline(always)]
fn traverse(
    nodes: &[Node],
    pos: Vec2,
    t_sq: f64,
    mut on_accept: impl FnMut(&Node, Vec2, f64),
) -> usize {
    if nodes.is_empty() {
        return 0;
    }

    let mut visited = 0;
    let mut node = NodeIndex::ROOT;
    loop {
        let n = &nodes[node.index()];
        visited += 1;

        let d = n.pos - pos;
        let d_sq = d.mag_sq();

        if n.is_leaf() || n.quad.size * n.quad.size < d_sq * t_sq {
            on_accept(n, d, d_sq);
            if n.next.is_null() {
                break;
            }
            node = n.next;
        } else {
            node = n.children;
        }
    }
    visited
}

/// Gravitational acceleration at `pos` from the tree in `nodes`.
///
/// `t_sq` and `e_sq` are theta² and epsilon². A leaf coincident with `pos`
/// contributes nothing because its separation vector is zero.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::forces::acceleration_at;
/// use rs_barnes_hut::models::{Body, Vec2};
/// use rs_barnes_hut::tree::Quadtree;
///
/// let bodies = [
///     Body::new(Vec2::new(-10.0, 0.0), Vec2::zero(), 1.0, 1.0),
///     Body::new(Vec2::new(10.0, 0.0), Vec2::zero(), 1.0, 1.0),
/// ];
/// let mut tree = Quadtree::new(1.0, 1.0);
/// tree.rebuild(&bodies);
/// tree.propagate();
///
/// let a = acceleration_at(tree.nodes(), bodies[0].pos, 1.0, 1.0, 0.5);
/// let b = acceleration_at(tree.nodes(), bodies[1].pos, 1.0, 1.0, 0.5);
/// assert!(a.x > 0.0);
/// assert_eq!(a, -b);
/// ```
pub fn acceleration_at(nodes: &[Node], pos: Vec2, t_sq: f64, e_sq: f64, g: f64) -> Vec2 {
    let mut acc = Vec2::zero();
    traverse(nodes, pos, t_sq, |n, d, d_sq| {
        if n.mass > 0.0 {
            let denom_term = d_sq + e_sq;
            let denom = denom_term * denom_term.sqrt();
            if denom > 0.0 {
                acc += d * (g * n.mass / denom);
            }
        }
    });
    acc
}

impl Quadtree {
    /// Acceleration at `pos` using this tree's theta and epsilon.
    #[inline]
    pub fn acceleration_at(&self, pos: Vec2, g: f64) -> Vec2 {
        acceleration_at(self.nodes(), pos, self.theta_sq(), self.epsilon_sq(), g)
    }

    /// How many nodes a query at `pos` would visit and accept.
    pub fn traversal_stats(&self, pos: Vec2) -> TraversalStats {
        let mut accepted = 0;
        let visited = traverse(self.nodes(), pos, self.theta_sq(), |_, _, _| accepted += 1);
        TraversalStats { visited, accepted }
    }
}
