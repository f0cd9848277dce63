//! The environment: registry and owner of every live cell.
//!
//! Cells are kept sorted by id. Because ids are allocated monotonically,
//! newly created cells always append, and iteration order is creation order.
//! While a step is in progress, daughters and removals are staged in a
//! nursery and merged only at the step boundary.

use crate::cell::Cell;
use crate::config::{AppConfig, DivisionConfig};
use crate::error::{Result, SimError};
use crate::module::StepContext;
use crate::random::SimRandom;
use cellsim_data::{CellId, EcmSnapshot};
use glam::DVec3;
use serde::Serialize;
use uuid::Uuid;

/// Population changes staged during a step.
#[derive(Debug, Default)]
pub(crate) struct Nursery {
    pub daughters: Vec<Cell>,
    pub doomed: Vec<CellId>,
}

impl Nursery {
    pub fn daughter_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.daughters.iter_mut().find(|c| c.id() == id)
    }
}

/// Environment-wide services lent to modules.
#[derive(Debug)]
pub(crate) struct Services {
    pub next_id: CellId,
    pub random: SimRandom,
    pub division: DivisionConfig,
    pub time_step: f64,
}

impl Services {
    pub fn allocate_id(&mut self) -> CellId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    pub fn division_axis(&mut self) -> DVec3 {
        if self.division.random_axis {
            self.random.unit_vector()
        } else {
            DVec3::X
        }
    }
}

/// Outcome of the most recent step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepSummary {
    pub step: u64,
    pub visited: usize,
    pub born: usize,
    pub removed: usize,
}

#[derive(Debug)]
pub struct Ecm {
    run_id: Uuid,
    cells: Vec<Cell>,
    nursery: Nursery,
    services: Services,
    clock: u64,
    torn_down: bool,
    last_step: StepSummary,
}

impl Default for Ecm {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl Ecm {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let mut random = SimRandom::new(config.simulation.seed);
        let run_id = Uuid::from_u128(random.next_u128());
        tracing::info!(run_id = %run_id, seed = random.seed(), "Environment created");
        Self {
            run_id,
            cells: Vec::new(),
            nursery: Nursery::default(),
            services: Services {
                next_id: CellId(0),
                random,
                division: config.division.clone(),
                time_step: config.simulation.time_step,
            },
            clock: 0,
            torn_down: false,
            last_step: StepSummary::default(),
        }
    }

    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.services.random.seed()
    }

    pub fn set_random_seed(&mut self, seed: u64) {
        self.services.random.set_random_seed(seed);
    }

    pub fn random_mut(&mut self) -> &mut SimRandom {
        &mut self.services.random
    }

    #[must_use]
    pub fn time_step(&self) -> f64 {
        self.services.time_step
    }

    /// Index of the next step to run, which equals the number of completed steps.
    #[must_use]
    pub fn clock(&self) -> u64 {
        self.clock
    }

    #[must_use]
    pub fn last_step(&self) -> StepSummary {
        self.last_step
    }

    pub fn allocate_id(&mut self) -> CellId {
        self.services.allocate_id()
    }

    /// Adds a live cell.
    pub fn register(&mut self, cell: Cell) -> Result<&mut Cell> {
        self.ensure_live()?;
        let id = cell.id();
        let pos = match self.cells.binary_search_by_key(&id, Cell::id) {
            Ok(_) => return Err(SimError::DuplicateCell(id)),
            Err(pos) => pos,
        };
        if id >= self.services.next_id {
            self.services.next_id = id.next();
        }
        self.cells.insert(pos, cell);
        Ok(&mut self.cells[pos])
    }

    /// Removes a cell and detaches its modules.
    pub fn remove(&mut self, id: CellId) -> Result<Cell> {
        self.ensure_live()?;
        let index = self.index_of(id).ok_or(SimError::UnknownCell(id))?;
        let mut cell = self.cells.remove(index);
        for module in &mut cell.modules {
            module.set_cell(None);
        }
        Ok(cell)
    }

    /// Divides a cell outside of a step and registers the daughter at once.
    pub fn divide(&mut self, id: CellId) -> Result<CellId> {
        self.ensure_live()?;
        let index = self.index_of(id).ok_or(SimError::UnknownCell(id))?;
        let daughter_id = self.services.allocate_id();
        let axis = self.services.division_axis();
        let daughter = self.cells[index].divide(
            daughter_id,
            axis,
            self.services.division.separation_factor,
            self.clock,
        );
        self.cells.push(daughter);
        Ok(daughter_id)
    }

    #[must_use]
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        let index = self.index_of(id)?;
        Some(&self.cells[index])
    }

    pub fn get_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        let index = self.index_of(id)?;
        Some(&mut self.cells[index])
    }

    #[must_use]
    pub fn contains(&self, id: CellId) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<CellId> {
        self.cells.iter().map(Cell::id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Visits every registered cell in id order.
    pub fn for_each_cell<F: FnMut(&Cell)>(&self, mut visit: F) {
        for cell in &self.cells {
            visit(cell);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> EcmSnapshot {
        EcmSnapshot {
            run_id: self.run_id,
            step: self.clock,
            cells: self.cells.iter().map(Cell::snapshot).collect(),
        }
    }

    /// Drops every cell and refuses further mutation.
    pub fn teardown(&mut self) {
        tracing::info!(run_id = %self.run_id, cells = self.cells.len(), "Environment torn down");
        self.cells.clear();
        self.nursery = Nursery::default();
        self.torn_down = true;
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub(crate) fn ensure_live(&self) -> Result<()> {
        if self.torn_down {
            return Err(SimError::TornDown(self.run_id));
        }
        Ok(())
    }

    fn index_of(&self, id: CellId) -> Option<usize> {
        self.cells.binary_search_by_key(&id, Cell::id).ok()
    }

    /// Opens step `step` and returns the size of its snapshot.
    pub(crate) fn begin_step(&mut self, step: u64) -> usize {
        self.clock = step;
        self.cells.len()
    }

    /// Runs every module of the cell at `index` in list order.
    ///
    /// On a module failure the remaining modules of this cell are skipped,
    /// but the module list is restored and daughters created so far keep
    /// their inherited modules.
    pub(crate) fn run_cell(&mut self, index: usize, step: u64) -> Result<()> {
        let Self {
            cells,
            nursery,
            services,
            ..
        } = self;
        let cell = &mut cells[index];
        let mut modules = std::mem::take(&mut cell.modules);
        let mut retired = vec![false; modules.len()];
        let mut outcome = Ok(());

        for i in 0..modules.len() {
            let (before, rest) = modules.split_at_mut(i);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };
            debug_assert_eq!(current.cell(), Some(cell.id()));

            let mut ctx = StepContext::new(cell, nursery, services, step);
            let result = current.run(&mut ctx);
            let done = ctx.finish();
            retired[i] = done.remove_current;

            // Modules the parent drops at the end of this pass are not inherited.
            for daughter_id in done.daughters {
                if let Some(daughter) = nursery.daughter_mut(daughter_id) {
                    let parent_modules = before
                        .iter()
                        .chain(std::iter::once(&*current))
                        .zip(&retired)
                        .filter(|(_, gone)| !**gone)
                        .map(|(m, _)| m)
                        .chain(after.iter())
                        .chain(cell.modules.iter())
                        .map(|m| &**m);
                    daughter.inherit_modules(parent_modules);
                }
            }

            if let Err(source) = result {
                outcome = Err(SimError::ModuleFailed {
                    module: current.kind(),
                    cell: cell.id(),
                    step,
                    source,
                });
                break;
            }
        }

        let added = std::mem::take(&mut cell.modules);
        cell.modules = modules
            .into_iter()
            .zip(retired)
            .filter_map(|(mut module, retired)| {
                if retired {
                    module.set_cell(None);
                    None
                } else {
                    Some(module)
                }
            })
            .chain(added)
            .collect();
        outcome
    }

    /// Closes the step: merges daughters, applies staged removals.
    pub(crate) fn end_step(&mut self, step: u64, visited: usize) -> StepSummary {
        let mut daughters = std::mem::take(&mut self.nursery.daughters);
        let born = daughters.len();
        self.cells.append(&mut daughters);

        let mut doomed = std::mem::take(&mut self.nursery.doomed);
        let removed = if doomed.is_empty() {
            0
        } else {
            doomed.sort_unstable();
            let before = self.cells.len();
            self.cells.retain(|c| doomed.binary_search(&c.id()).is_err());
            before - self.cells.len()
        };

        self.clock = step + 1;
        self.last_step = StepSummary {
            step,
            visited,
            born,
            removed,
        };
        self.last_step
    }
}
