//! Pairwheel - a daily pair-rotation engine
//!
//! Pairwheel assigns developers to work tracks for a day. Given historical
//! day-by-day pairing records and today's roster, it builds weighted
//! candidate pairs, decides when continuity must break ("rotation"), greedily
//! fills tracks, repairs any leftover solo developer, and tags one pair each
//! as "build" and "community".

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod history;
pub mod pipeline;
pub mod rng;

pub use error::{PairwheelError, Result};
