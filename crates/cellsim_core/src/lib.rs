//! # Cellsim Core
//!
//! Agent-based simulation engine for populations of growing, moving and
//! dividing cells.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Spherical growth physics with a fixed volume/diameter relation
//! - Cells carrying ordered, pluggable behavior modules
//! - The division protocol (volume split, placement, module propagation)
//! - The environment registry and the discrete-time scheduler
//! - Configuration, metrics and structured logging
//!
//! ## Architecture
//!
//! A run is an explicit [`Simulation`] context. Each call to
//! [`Scheduler::simulate_one_step`] visits the cells registered when the step
//! begins; cells created during the step are staged and join at its end.
//! Seeding the random service makes every trajectory reproducible.
//!
//! ## Example
//!
//! ```
//! use cellsim_core::{AppConfig, CellFactory, Ecm, GrowthDivisionModule, Scheduler};
//! use glam::DVec3;
//!
//! let mut ecm = Ecm::new(&AppConfig::default());
//! CellFactory::default()
//!     .create_cell_instance(DVec3::ZERO, &mut ecm)
//!     .unwrap()
//!     .add_module(Box::new(GrowthDivisionModule::default()));
//!
//! let mut scheduler = Scheduler::new(&ecm);
//! scheduler.simulate_one_step(&mut ecm).unwrap();
//! assert_eq!(ecm.count(), 1);
//! ```

/// Cells and the division protocol
pub mod cell;
/// Configuration management for simulation parameters
pub mod config;
/// Environment registry of live cells
pub mod ecm;
/// Error types
pub mod error;
/// Founder cell creation
pub mod factory;
/// Performance metrics collection and logging
pub mod metrics;
/// Behavior module interface and step context
pub mod module;
/// Built-in behavior modules
pub mod modules;
/// Spherical growth physics
pub mod physics;
/// Seeded random service
pub mod random;
/// Discrete-time step driver
pub mod scheduler;
/// Per-run simulation context
pub mod simulation;
/// Mechanical body of a cell
pub mod soma;

pub use cell::Cell;
pub use cellsim_data::{CellId, CellSnapshot, EcmSnapshot, Lineage, ModuleKind};
pub use config::AppConfig;
pub use ecm::{Ecm, StepSummary};
pub use error::{Result, SimError};
pub use factory::CellFactory;
pub use metrics::{init_logging, Metrics};
pub use module::{CellModule, StepContext};
pub use modules::{GrowthDivisionModule, RandomWalkModule, SenescenceModule};
pub use physics::PhysicalSphere;
pub use random::SimRandom;
pub use scheduler::Scheduler;
pub use simulation::{RunReport, Simulation};
pub use soma::SomaElement;
