//! Pluggable per-step behavior attached to cells.
//!
//! A module is *detached* until added to a cell, at which point it records
//! the owning cell's id. The id is a non-owning back-reference: lifetime is
//! governed entirely by the cell's ownership of its module list.

use crate::cell::Cell;
use crate::ecm::{Nursery, Services};
use crate::random::SimRandom;
use crate::soma::SomaElement;
use cellsim_data::{CellId, Lineage, ModuleKind, ModuleSnapshot};
use std::fmt;

pub trait CellModule: fmt::Debug + Send {
    fn kind(&self) -> ModuleKind;

    /// Executes one step of behavior for the owning cell.
    ///
    /// Errors abort the step in progress and reach the caller of
    /// `Scheduler::simulate_one_step`.
    fn run(&mut self, ctx: &mut StepContext<'_>) -> anyhow::Result<()>;

    fn cell(&self) -> Option<CellId>;

    fn set_cell(&mut self, cell: Option<CellId>);

    /// Fresh, detached instance with the same configured behavior.
    fn get_copy(&self) -> Box<dyn CellModule>;

    /// Whether daughters receive a copy of this module on division.
    fn is_copied_when_cell_divides(&self) -> bool;

    fn sim_state_to_json(&self) -> serde_json::Value {
        serde_json::json!({})
    }

    fn is_attached(&self) -> bool {
        self.cell().is_some()
    }

    fn snapshot(&self) -> ModuleSnapshot {
        ModuleSnapshot {
            kind: self.kind(),
            copied_on_divide: self.is_copied_when_cell_divides(),
            state: self.sim_state_to_json(),
        }
    }
}

/// What a module may touch while it runs.
///
/// During a cell's pass the scheduler holds that cell's module list, so the
/// context exposes the body and lineage rather than the whole cell. Edits to
/// the population are staged and applied at the step boundary.
pub struct StepContext<'a> {
    cell: &'a mut Cell,
    nursery: &'a mut Nursery,
    services: &'a mut Services,
    step: u64,
    daughters: Vec<CellId>,
    remove_current: bool,
}

pub(crate) struct ModuleOutcome {
    pub daughters: Vec<CellId>,
    pub remove_current: bool,
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(
        cell: &'a mut Cell,
        nursery: &'a mut Nursery,
        services: &'a mut Services,
        step: u64,
    ) -> Self {
        Self {
            cell,
            nursery,
            services,
            step,
            daughters: Vec::new(),
            remove_current: false,
        }
    }

    #[must_use]
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Simulated time covered by one step.
    #[must_use]
    pub fn time_step(&self) -> f64 {
        self.services.time_step
    }

    #[must_use]
    pub fn cell_id(&self) -> CellId {
        self.cell.id()
    }

    #[must_use]
    pub fn lineage(&self) -> &Lineage {
        self.cell.lineage()
    }

    #[must_use]
    pub fn soma(&self) -> &SomaElement {
        self.cell.soma()
    }

    pub fn soma_mut(&mut self) -> &mut SomaElement {
        self.cell.soma_mut()
    }

    pub fn random(&mut self) -> &mut SimRandom {
        &mut self.services.random
    }

    /// Attaches a module to the running cell. It first runs next step.
    pub fn add_module(&mut self, module: Box<dyn CellModule>) {
        self.cell.add_module(module);
    }

    /// Detaches the running module once the cell's pass ends.
    ///
    /// Daughters created later in the same pass do not inherit it.
    pub fn remove_current_module(&mut self) {
        self.remove_current = true;
    }

    /// Removes the running cell from the environment at the step boundary.
    ///
    /// Its remaining modules still run for this step.
    pub fn remove_cell(&mut self) {
        let id = self.cell.id();
        if !self.nursery.doomed.contains(&id) {
            self.nursery.doomed.push(id);
        }
    }

    /// Divides the running cell.
    ///
    /// The volume split happens immediately. The daughter receives copies of
    /// the parent's copy-on-divide modules when this module returns, and
    /// joins the live population at the step boundary.
    pub fn divide(&mut self) -> CellId {
        let daughter_id = self.services.allocate_id();
        let axis = self.services.division_axis();
        let daughter = self.cell.split_off(
            daughter_id,
            axis,
            self.services.division.separation_factor,
            self.step,
        );
        tracing::trace!(
            parent = %self.cell.id(),
            daughter = %daughter_id,
            step = self.step,
            diameter = daughter.soma().diameter(),
            "Cell divided"
        );
        self.nursery.daughters.push(daughter);
        self.daughters.push(daughter_id);
        daughter_id
    }

    /// A daughter created earlier in this step, before it joins the population.
    pub fn daughter_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.nursery.daughter_mut(id)
    }

    pub(crate) fn finish(self) -> ModuleOutcome {
        ModuleOutcome {
            daughters: self.daughters,
            remove_current: self.remove_current,
        }
    }
}
