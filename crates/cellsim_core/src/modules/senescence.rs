use crate::module::{CellModule, StepContext};
use cellsim_data::{CellId, ModuleKind};

/// Removes the cell once it has lived `lifespan_steps` steps.
///
/// Daughters inherit a fresh clock.
#[derive(Debug, Clone)]
pub struct SenescenceModule {
    cell: Option<CellId>,
    lifespan_steps: u64,
    age: u64,
}

impl SenescenceModule {
    #[must_use]
    pub fn new(lifespan_steps: u64) -> Self {
        Self {
            cell: None,
            lifespan_steps,
            age: 0,
        }
    }

    #[must_use]
    pub fn age(&self) -> u64 {
        self.age
    }
}

impl CellModule for SenescenceModule {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Senescence
    }

    fn run(&mut self, ctx: &mut StepContext<'_>) -> anyhow::Result<()> {
        self.age += 1;
        if self.age >= self.lifespan_steps {
            tracing::trace!(cell = %ctx.cell_id(), age = self.age, "Cell reached lifespan");
            ctx.remove_cell();
        }
        Ok(())
    }

    fn cell(&self) -> Option<CellId> {
        self.cell
    }

    fn set_cell(&mut self, cell: Option<CellId>) {
        self.cell = cell;
    }

    fn get_copy(&self) -> Box<dyn CellModule> {
        Box::new(Self::new(self.lifespan_steps))
    }

    fn is_copied_when_cell_divides(&self) -> bool {
        true
    }

    fn sim_state_to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "lifespan_steps": self.lifespan_steps,
            "age": self.age,
        })
    }
}
