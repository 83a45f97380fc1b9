//! A point-region quadtree stored as a flat node arena.
//!
//! Nodes reference each other by [`NodeIndex`] only. A leaf that has to split
//! appends its four children to the end of the arena and is recorded in the
//! branch list, so walking that list backwards always reaches children before
//! their parent. Each node's `next` link points at the node to visit once its
//! subtree is skipped, which lets every traversal run without a stack.
//!
//! # Example
//!
//! ```
//! use rs_barnes_hut::models::Vec2;
//! use rs_barnes_hut::tree::{BodyIndex, Quad, Quadtree};
//!
//! let mut tree = Quadtree::new(0.5, 1.0);
//! tree.reset(Quad::new(Vec2::zero(), 4.0));
//! tree.insert(Vec2::new(-1.0, -1.0), 2.0, BodyIndex::new(0).unwrap()).unwrap();
//! tree.insert(Vec2::new(1.0, 1.0), 2.0, BodyIndex::new(1).unwrap()).unwrap();
//! tree.propagate();
//!
//! let root = tree.root().unwrap();
//! assert_eq!(root.mass, 4.0);
//! assert_eq!(root.pos, Vec2::zero());
//! ```
use log::warn;

use crate::models::{Body, Vec2};
use crate::tree::{BodyIndex, Node, NodeIndex, Quad};
use crate::utils::TreeError;

#[derive(Debug, Clone)]
pub struct Quadtree {
    /// Theta squared (opening angle threshold).
    t_sq: f64,
    /// Epsilon squared (softening length).
    e_sq: f64,
    nodes: Vec<Node>,
    /// Nodes that were split, in creation order.
    branches: Vec<NodeIndex>,
}

impl Default for Quadtree {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Quadtree {
    /// Deepest split allowed while separating two bodies.
    pub const MAX_DEPTH: usize = 128;

    pub fn new(theta: f64, epsilon: f64) -> Self {
        Self {
            t_sq: theta * theta,
            e_sq: epsilon * epsilon,
            nodes: Vec::new(),
            branches: Vec::new(),
        }
    }

    pub fn theta_sq(&self) -> f64 {
        self.t_sq
    }

    pub fn epsilon_sq(&self) -> f64 {
        self.e_sq
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Split nodes in creation order.
    pub fn branches(&self) -> &[NodeIndex] {
        &self.branches
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(NodeIndex::ROOT.index())
    }

    /// Drops every node, leaving a tree with no root.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.branches.clear();
    }

    /// Clears the arena and installs an empty root leaf covering `quad`.
    pub fn reset(&mut self, quad: Quad) {
        self.clear();
        self.nodes.push(Node::new(NodeIndex::NULL, quad));
    }

    /// Rebuilds the tree from scratch for `bodies`, recording each body's index.
    ///
    /// Bodies that cannot be inserted are logged and left out of this tree.
    /// Returns how many were left out.
    pub fn rebuild(&mut self, bodies: &[Body]) -> usize {
        let Some(quad) = Quad::new_containing(bodies) else {
            self.clear();
            return bodies.len();
        };
        self.reset(quad);

        let mut skipped = 0;
        for (i, body) in bodies.iter().enumerate() {
            let result = match BodyIndex::new(i) {
                Some(index) => self.insert(body.pos, body.mass, index),
                None => Err(TreeError::ArenaFull),
            };
            if let Err(err) = result {
                warn!("Body {} left out of the tree this step: {}", i, err);
                skipped += 1;
            }
        }
        skipped
    }

    /// Splits leaf `node` into four children and returns the first child's index.
    fn subdivide(&mut self, node: usize) -> Result<usize, TreeError> {
        if self.nodes.len() + 4 > NodeIndex::CAPACITY {
            return Err(TreeError::ArenaFull);
        }
        let first = self.nodes.len();
        let children = NodeIndex::new(first).ok_or(TreeError::ArenaFull)?;
        let link = |offset: usize| NodeIndex::new(first + offset).ok_or(TreeError::ArenaFull);

        // The last child inherits the split node's own `next`, so skipping the
        // children lands exactly where skipping the parent would have.
        let nexts = [link(1)?, link(2)?, link(3)?, self.nodes[node].next];
        let quads = self.nodes[node].quad.subdivide();

        self.branches.push(NodeIndex::new(node).ok_or(TreeError::ArenaFull)?);
        self.nodes[node].children = children;
        self.nodes[node].body = BodyIndex::NONE;
        for (next, quad) in nexts.into_iter().zip(quads) {
            self.nodes.push(Node::new(next, quad));
        }

        Ok(first)
    }

    /// Inserts a point mass for body `body`.
    ///
    /// A body at exactly the same position as an existing leaf is merged into it
    /// by adding the masses; the leaf keeps its original position and body index.
    ///
    /// # Errors
    ///
    /// Fails without changing any stored mass if the position is not finite, the
    /// mass is not positive, the tree has no root, the two positions could not be
    /// separated within [`Quadtree::MAX_DEPTH`] splits or the arena is full. In
    /// every case the bodies already in the tree stay in it.
    pub fn insert(&mut self, pos: Vec2, mass: f64, body: BodyIndex) -> Result<(), TreeError> {
        if self.nodes.is_empty() {
            return Err(TreeError::NoRoot);
        }
        if !pos.is_finite() {
            return Err(TreeError::NonFinitePosition);
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(TreeError::InvalidMass);
        }

        let mut node = NodeIndex::ROOT.index();
        let mut depth = 0;

        while self.nodes[node].is_branch() {
            let quadrant = self.nodes[node].quad.find_quadrant(pos);
            node = self.nodes[node].children.index() + quadrant;
            depth += 1;
        }

        if self.nodes[node].is_empty() {
            let leaf = &mut self.nodes[node];
            leaf.pos = pos;
            leaf.mass = mass;
            leaf.body = body;
            return Ok(());
        }

        let (p, m, b) = (self.nodes[node].pos, self.nodes[node].mass, self.nodes[node].body);

        if pos == p {
            self.nodes[node].mass += mass;
            return Ok(());
        }

        loop {
            if depth >= Self::MAX_DEPTH {
                return Err(TreeError::DepthExceeded);
            }

            let children = self.subdivide(node)?;
            let q1 = self.nodes[node].quad.find_quadrant(p);
            let q2 = self.nodes[node].quad.find_quadrant(pos);

            // Move the resident body down first so it is never lost if the
            // next split fails.
            let n1 = children + q1;
            self.nodes[n1].pos = p;
            self.nodes[n1].mass = m;
            self.nodes[n1].body = b;

            if q1 != q2 {
                let n2 = children + q2;
                self.nodes[n2].pos = pos;
                self.nodes[n2].mass = mass;
                self.nodes[n2].body = body;
                return Ok(());
            }

            node = n1;
            depth += 1;
        }
    }

    /// Computes total mass and centre of mass for every branch, bottom-up.
    ///
    /// Must run after the last insertion and before any force query.
    pub fn propagate(&mut self) {
        for &node in self.branches.iter().rev() {
            let node = node.index();
            let i = self.nodes[node].children.index();

            let children = &self.nodes[i..i + 4];
            let mass: f64 = children.iter().map(|c| c.mass).sum();
            let weighted = children
                .iter()
                .fold(Vec2::zero(), |acc, c| acc + c.pos * c.mass);

            let parent = &mut self.nodes[node];
            parent.mass = mass;
            parent.pos = if mass > 0.0 { weighted / mass } else { parent.quad.center };
        }
    }
}
