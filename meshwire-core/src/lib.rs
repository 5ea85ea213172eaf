//! Core data structures for meshwire
//!
//! This crate provides the fundamental types for mesh-to-wireframe
//! derivation: points, indexed triangle geometry, scene trees, bounding
//! boxes, transforms, and the derived renderable primitives.

pub mod point;
pub mod geometry;
pub mod scene;
pub mod bounds;
pub mod transform;
pub mod render;
pub mod error;

pub use point::*;
pub use geometry::*;
pub use scene::*;
pub use bounds::*;
pub use transform::*;
pub use render::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};

/// Common result type for meshwire operations
pub type Result<T> = std::result::Result<T, Error>;
