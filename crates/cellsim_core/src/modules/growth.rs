use crate::config::GrowthConfig;
use crate::module::{CellModule, StepContext};
use cellsim_data::{CellId, ModuleKind};

/// Grows the cell every step until its diameter exceeds the division
/// threshold, then divides it.
#[derive(Debug, Clone)]
pub struct GrowthDivisionModule {
    cell: Option<CellId>,
    division_diameter: f64,
    growth_rate: f64,
    copy_on_divide: bool,
}

impl Default for GrowthDivisionModule {
    fn default() -> Self {
        Self::from_config(&GrowthConfig::default())
    }
}

impl GrowthDivisionModule {
    /// `growth_rate` is volume per unit of simulated time; each step adds
    /// `growth_rate * time_step`.
    #[must_use]
    pub fn new(division_diameter: f64, growth_rate: f64) -> Self {
        Self {
            cell: None,
            division_diameter,
            growth_rate,
            copy_on_divide: true,
        }
    }

    #[must_use]
    pub fn from_config(config: &GrowthConfig) -> Self {
        Self {
            copy_on_divide: config.copy_on_divide,
            ..Self::new(config.division_diameter, config.growth_rate)
        }
    }

    #[must_use]
    pub fn with_copy_on_divide(mut self, copy: bool) -> Self {
        self.copy_on_divide = copy;
        self
    }

    #[must_use]
    pub fn division_diameter(&self) -> f64 {
        self.division_diameter
    }

    #[must_use]
    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }
}

impl CellModule for GrowthDivisionModule {
    fn kind(&self) -> ModuleKind {
        ModuleKind::GrowthDivision
    }

    fn run(&mut self, ctx: &mut StepContext<'_>) -> anyhow::Result<()> {
        if ctx.soma().diameter() > self.division_diameter {
            ctx.divide();
        } else {
            let delta = self.growth_rate * ctx.time_step();
            ctx.soma_mut().physical_sphere_mut().change_volume(delta);
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
        Box::new(Self {
            cell: None,
            ..self.clone()
        })
    }

    fn is_copied_when_cell_divides(&self) -> bool {
        self.copy_on_divide
    }

    fn sim_state_to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "division_diameter": self.division_diameter,
            "growth_rate": self.growth_rate,
        })
    }
}
