mod worker_pool;
mod force_pass;

pub use worker_pool::*;
pub use force_pass::*;
