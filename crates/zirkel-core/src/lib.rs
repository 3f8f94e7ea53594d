//! Zirkel Core Scene Model
//!
//! This crate contains the model and math of the construction engine:
//! - Shape: tagged point/circle scene entries with the compact wire format
//! - geometry: Euclidean distance and the circle-circle intersection solver
//! - nearest: snapping and delete-target queries over the scene
//! - Scene: the ordered committed collection plus the clamped view transform

pub mod geometry;
pub mod nearest;
pub mod scene;
pub mod shape;

pub use geometry::*;
pub use nearest::*;
pub use scene::*;
pub use shape::*;
