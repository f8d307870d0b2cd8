//! Bohr-model Atom Viewer
//!
//! Interactive 3D view of the first twenty elements: a packed nucleus of
//! protons and neutrons with electrons circling on their shells.
//!
//! - **Elements**: the fixed periodic-table slice the viewer can show
//! - **Shells**: electron-to-shell filling with capacities 2, 8, 8, 8
//! - **Packing**: deterministic layered Fibonacci-sphere nucleon placement
//! - **Orbits**: per-electron animation state
//! - **Atom**: the application state driven by `advance(dt)`
//! - **Ion**: mass number and ionic charge of the current configuration

pub mod atom;
pub mod config;
pub mod elements;
pub mod error;
pub mod ion;
pub mod orbit;
pub mod packing;
pub mod renderer;
pub mod shells;
pub mod ui;

pub use atom::{AtomState, Nucleon, NucleonKind};
pub use config::{CliArgs, LayoutConfig};
pub use elements::{ElementRecord, ELEMENTS};
pub use error::{AtomError, Result};
pub use ion::{ChargeKind, IonInfo};
pub use orbit::OrbitState;
pub use packing::pack;
pub use shells::{distribute, ShellDistribution, SHELL_CAPACITIES};
