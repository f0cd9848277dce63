use crate::config::MovementConfig;
use crate::module::{CellModule, StepContext};
use cellsim_data::{CellId, ModuleKind};

/// Displaces the cell along a fresh random direction each step.
#[derive(Debug, Clone)]
pub struct RandomWalkModule {
    cell: Option<CellId>,
    speed: f64,
    copy_on_divide: bool,
    distance_travelled: f64,
}

impl RandomWalkModule {
    #[must_use]
    pub fn new(speed: f64, copy_on_divide: bool) -> Self {
        Self {
            cell: None,
            speed,
            copy_on_divide,
            distance_travelled: 0.0,
        }
    }

    #[must_use]
    pub fn from_config(config: &MovementConfig) -> Self {
        Self::new(config.speed, config.copy_on_divide)
    }

    #[must_use]
    pub fn distance_travelled(&self) -> f64 {
        self.distance_travelled
    }
}

impl CellModule for RandomWalkModule {
    fn kind(&self) -> ModuleKind {
        ModuleKind::RandomWalk
    }

    fn run(&mut self, ctx: &mut StepContext<'_>) -> anyhow::Result<()> {
        let distance = self.speed * ctx.time_step();
        let direction = ctx.random().unit_vector();
        ctx.soma_mut()
            .physical_sphere_mut()
            .move_by(direction * distance);
        self.distance_travelled += distance;
        Ok(())
    }

    fn cell(&self) -> Option<CellId> {
        self.cell
    }

    fn set_cell(&mut self, cell: Option<CellId>) {
        self.cell = cell;
    }

    fn get_copy(&self) -> Box<dyn CellModule> {
        Box::new(Self::new(self.speed, self.copy_on_divide))
    }

    fn is_copied_when_cell_divides(&self) -> bool {
        self.copy_on_divide
    }

    fn sim_state_to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "speed": self.speed,
            "distance_travelled": self.distance_travelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_resets_odometer() {
        let mut m = RandomWalkModule::new(2.0, true);
        m.distance_travelled = 10.0;
        let copy = m.get_copy();
        assert_eq!(copy.sim_state_to_json()["distance_travelled"], 0.0);
        assert_eq!(copy.sim_state_to_json()["speed"], 2.0);
    }
}
