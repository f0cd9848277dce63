//! Core data structures shared by the cellsim engine and its consumers.

pub mod data;

pub use data::cell::{CellId, Lineage, ModuleKind};
pub use data::snapshot::{CellSnapshot, EcmSnapshot, ModuleSnapshot};
pub use glam::DVec3;
