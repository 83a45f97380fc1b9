use crate::models::Vec2;
use crate::tree::Quad;

/// Index of a node in a [`Quadtree`](crate::tree::Quadtree) arena.
///
/// `NodeIndex::NULL` marks "no children" and "end of traversal". It is distinct
/// from every valid index, so the root at index 0 is never ambiguous.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(u32);

impl NodeIndex {
    pub const ROOT: NodeIndex = NodeIndex(0);
    pub const NULL: NodeIndex = NodeIndex(u32::MAX);

    /// Number of addressable nodes; one value is reserved for `NULL`.
    pub const CAPACITY: usize = u32::MAX as usize;

    /// Returns `None` if `index` cannot be represented.
    pub fn new(index: usize) -> Option<Self> {
        if index < Self::CAPACITY {
            Some(NodeIndex(index as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_null(self) -> bool {
        self == Self::NULL
    }

    /// The index as `usize`, or `None` for `NULL`.
    pub fn get(self) -> Option<usize> {
        if self.is_null() { None } else { Some(self.index()) }
    }
}

/// Index of a body in the engine's body vector, as recorded in tree leaves.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyIndex(u32);

impl BodyIndex {
    /// Marks a leaf with no recorded body.
    pub const NONE: BodyIndex = BodyIndex(u32::MAX);

    pub fn new(index: usize) -> Option<Self> {
        if index < u32::MAX as usize {
            Some(BodyIndex(index as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// One element of the quadtree arena.
///
/// Children of a branch are stored contiguously starting at `children`.
/// `next` is the node to visit after this node's subtree has been skipped.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    /// First of four contiguous children, or `NodeIndex::NULL` for a leaf.
    pub children: NodeIndex,
    /// Next node in depth-first order once this subtree is done.
    pub next: NodeIndex,
    /// Centre of mass of everything below this node.
    pub pos: Vec2,
    /// Total mass below this node; zero for an empty leaf.
    pub mass: f64,
    /// Region covered by this node.
    pub quad: Quad,
    /// Body stored in this leaf (only meaningful for non-empty leaves).
    pub body: BodyIndex,
}

impl Node {
    pub fn new(next: NodeIndex, quad: Quad) -> Self {
        Self {
            children: NodeIndex::NULL,
            next,
            pos: Vec2::zero(),
            mass: 0.0,
            quad,
            body: BodyIndex::NONE,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_null()
    }

    #[inline]
    pub fn is_branch(&self) -> bool {
        !self.children.is_null()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mass == 0.0
    }
}
