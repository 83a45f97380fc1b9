mod broad_phase;
mod resolution;

pub use broad_phase::*;
pub use resolution::*;

#[cfg(test)]
mod collisions_tests;
