//! Error types for the simulation engine.
//!
//! Precondition violations and module failures surface here. Numeric
//! degeneracy inside the physics model is recovered locally and never
//! becomes an error.

use cellsim_data::{CellId, ModuleKind};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SimError {
    /// The scheduler was driven against an environment it was not created for.
    #[error("Scheduler bound to run {expected} was driven against run {found}")]
    EnvironmentMismatch { expected: Uuid, found: Uuid },

    /// The environment was torn down and can no longer be stepped or mutated.
    #[error("Environment {0} has been torn down")]
    TornDown(Uuid),

    /// Another driver has advanced the environment past this scheduler.
    #[error("Scheduler at step {scheduler} is out of sync with environment at step {environment}")]
    StepOutOfSync { scheduler: u64, environment: u64 },

    #[error("Unknown cell: {0}")]
    UnknownCell(CellId),

    #[error("Cell already registered: {0}")]
    DuplicateCell(CellId),

    /// A behavior module returned an error; the step was aborted.
    #[error("Module {module} on {cell} failed during step {step}: {source}")]
    ModuleFailed {
        module: ModuleKind,
        cell: CellId,
        step: u64,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, SimError>;
