mod errors;
mod config;

pub use errors::*;
pub use config::*;
