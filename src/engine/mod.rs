//! The pairing/rotation assignment engine.
//!
//! One generation cycle flows through:
//! weights → conformity → rotation → assignment → solo repair → role tags.
//! All intermediate state is created fresh per cycle and discarded; the
//! engine is a pure computation over the inputs it is handed.

pub mod assign;
pub mod conformity;
pub mod roles;
pub mod rotation;
pub mod solo;
pub mod weights;

pub use assign::TrackAssignmentEngine;
pub use rotation::RotationPolicy;
pub use weights::WeightMap;
