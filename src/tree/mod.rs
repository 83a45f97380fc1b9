mod quad;
mod node;
mod quadtree;

pub use quad::*;
pub use node::*;
pub use quadtree::*;
