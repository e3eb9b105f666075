//! Protocol checker filters
//!
//! Filters that consume clocked digital streams and publish derived streams.

pub mod prbs_checker;
pub mod types;

// Re-export common types
pub use types::{Polynomial, generate};

// Re-export filters
pub use prbs_checker::PrbsChecker;
