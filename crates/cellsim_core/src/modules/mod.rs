//! Built-in behavior modules.

pub mod growth;
pub mod movement;
pub mod senescence;

pub use growth::GrowthDivisionModule;
pub use movement::RandomWalkModule;
pub use senescence::SenescenceModule;

use crate::config::AppConfig;
use crate::module::CellModule;

/// Modules a freshly populated cell receives under `config`, in execution order.
#[must_use]
pub fn standard_modules(config: &AppConfig) -> Vec<Box<dyn CellModule>> {
    let mut modules: Vec<Box<dyn CellModule>> =
        vec![Box::new(GrowthDivisionModule::from_config(&config.growth))];
    if config.movement.enabled {
        modules.push(Box::new(RandomWalkModule::from_config(&config.movement)));
    }
    if config.senescence.enabled {
        modules.push(Box::new(SenescenceModule::new(
            config.senescence.lifespan_steps,
        )));
    }
    modules
}
