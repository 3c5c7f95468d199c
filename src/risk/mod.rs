pub mod aggregator;
pub mod ensemble;

pub use aggregator::*;
pub use ensemble::*;
