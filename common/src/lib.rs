//! Common utilities for the atom viewer
//!
//! Window and GPU setup, the depth target, and the orbital camera shared by
//! the visualization crates in this workspace.

pub mod graphics;
pub mod camera;

pub use graphics::*;
pub use camera::*;
