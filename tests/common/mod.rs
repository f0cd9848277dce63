pub mod macros;

use cellsim_lib::model::config::AppConfig;
use cellsim_lib::model::{CellId, CellModule, Simulation, StepContext};
use cellsim_lib::model::state::ModuleKind;
use glam::DVec3;
use std::sync::{Arc, Mutex};

type CellSpec = (DVec3, f64, Vec<Box<dyn CellModule>>);

#[allow(dead_code)]
pub struct SimulationBuilder {
    config: AppConfig,
    cells: Vec<CellSpec>,
}

#[allow(dead_code)]
impl SimulationBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.simulation.seed = Some(2);
        config.simulation.initial_population = 0;
        Self {
            config,
            cells: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.simulation.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_cell(
        mut self,
        position: DVec3,
        diameter: f64,
        modules: Vec<Box<dyn CellModule>>,
    ) -> Self {
        self.cells.push((position, diameter, modules));
        self
    }

    pub fn build(self) -> (Simulation, Vec<CellId>) {
        let mut sim = Simulation::new(self.config).expect("Failed to create simulation in test builder");
        let mut ids = sim.populate().expect("Failed to populate");
        let factory = sim.factory().clone();
        for (position, diameter, modules) in self.cells {
            let cell = factory
                .create_cell_with_diameter(position, diameter, &mut sim.ecm)
                .expect("Failed to create cell");
            for module in modules {
                cell.add_module(module);
            }
            ids.push(cell.id());
        }
        (sim, ids)
    }
}

/// Shared log of `(step, cell)` pairs written by [`Recorder`].
pub type RunLog = Arc<Mutex<Vec<(u64, CellId)>>>;

pub fn run_log() -> RunLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Test module that logs every run, counts its own runs, and can be told to
/// divide, fail, add a module or retire itself on a given step.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)]
pub struct Recorder {
    pub cell: Option<CellId>,
    pub log: Option<RunLog>,
    pub runs: u64,
    pub copy_on_divide: bool,
    pub divide_at: Option<u64>,
    pub fail_at: Option<u64>,
    pub retire_at: Option<u64>,
    pub spawn_module_at: Option<u64>,
}

#[allow(dead_code)]
impl Recorder {
    pub fn logging(log: &RunLog) -> Self {
        Self {
            log: Some(Arc::clone(log)),
            copy_on_divide: true,
            ..Default::default()
        }
    }
}

impl CellModule for Recorder {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Custom
    }

    fn run(&mut self, ctx: &mut StepContext<'_>) -> anyhow::Result<()> {
        let step = ctx.step();
        self.runs += 1;
        if let Some(log) = &self.log {
            log.lock().unwrap().push((step, ctx.cell_id()));
        }
        if self.divide_at == Some(step) {
            ctx.divide();
        }
        if self.retire_at == Some(step) {
            ctx.remove_current_module();
        }
        if self.spawn_module_at == Some(step) {
            let mut child = Recorder::default();
            child.log = self.log.clone();
            ctx.add_module(Box::new(child));
        }
        if self.fail_at == Some(step) {
            anyhow::bail!("recorder failure at step {step}");
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
        Box::new(Recorder {
            cell: None,
            log: self.log.clone(),
            runs: 0,
            copy_on_divide: self.copy_on_divide,
            ..Default::default()
        })
    }

    fn is_copied_when_cell_divides(&self) -> bool {
        self.copy_on_divide
    }

    fn sim_state_to_json(&self) -> serde_json::Value {
        serde_json::json!({ "runs": self.runs })
    }
}
