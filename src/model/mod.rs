//! Engine surface re-exported for the application and integration tests.

pub use cellsim_core::{
    AppConfig, Cell, CellFactory, CellId, CellModule, Ecm, GrowthDivisionModule, PhysicalSphere,
    RandomWalkModule, Scheduler, SenescenceModule, SimError, Simulation, SomaElement, StepContext,
};

pub mod config {
    pub use cellsim_core::config::*;
}
pub mod physics {
    pub use cellsim_core::physics::*;
}
pub mod cell {
    pub use cellsim_core::cell::*;
}
pub mod module {
    pub use cellsim_core::module::*;
}
pub mod modules {
    pub use cellsim_core::modules::*;
}
pub mod ecm {
    pub use cellsim_core::ecm::*;
}
pub mod scheduler {
    pub use cellsim_core::scheduler::*;
}
pub mod simulation {
    pub use cellsim_core::simulation::*;
}
pub mod state {
    pub use cellsim_data::*;
}
