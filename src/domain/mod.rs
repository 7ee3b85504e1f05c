//! Domain types for pair rotation.
//!
//! The value types the engine computes over: developers and their day-scoped
//! counters, companies, pairs, and one day's full assignment.

mod company;
mod day_pairs;
mod developer;
mod pair;

pub use company::{Company, OpsRotation};
pub use day_pairs::DayPairs;
pub use developer::{DevId, Developer, find_dev, find_dev_mut};
pub use pair::{Pair, PairKey};
