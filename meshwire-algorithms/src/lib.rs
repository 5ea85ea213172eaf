//! # Meshwire Algorithms
//!
//! Pure geometry passes over meshwire scene trees: bounding-volume
//! analysis and point-cloud/wireframe derivation.

pub mod analysis;
pub mod wireframe;

pub use analysis::*;
pub use wireframe::*;
