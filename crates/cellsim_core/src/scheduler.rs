//! Discrete-time driver of a simulation run.

use crate::ecm::Ecm;
use crate::error::{Result, SimError};
use uuid::Uuid;

/// Advances one environment through discrete steps.
///
/// A scheduler is bound to the environment it was created for and refuses
/// to drive any other. It also refuses to run once another driver has
/// advanced the environment's clock past its own counter, so no step index
/// is ever replayed.
#[derive(Debug)]
pub struct Scheduler {
    run_id: Uuid,
    step: u64,
}

impl Scheduler {
    #[must_use]
    pub fn new(ecm: &Ecm) -> Self {
        Self {
            run_id: ecm.run_id(),
            step: ecm.clock(),
        }
    }

    /// Number of steps started so far.
    #[must_use]
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Executes exactly one step over the cells registered when it begins.
    ///
    /// Cells are visited in id order and each runs its modules in list
    /// order. Cells created during the step join the population at its end
    /// and first run in the next step. A module error aborts the rest of
    /// the step; mutations already made are kept, staged daughters are still
    /// merged, and the step counter still advances.
    pub fn simulate_one_step(&mut self, ecm: &mut Ecm) -> Result<()> {
        if ecm.run_id() != self.run_id {
            return Err(SimError::EnvironmentMismatch {
                expected: self.run_id,
                found: ecm.run_id(),
            });
        }
        ecm.ensure_live()?;
        if ecm.clock() != self.step {
            return Err(SimError::StepOutOfSync {
                scheduler: self.step,
                environment: ecm.clock(),
            });
        }

        let step = self.step;
        let _span = tracing::debug_span!("step", step).entered();

        let snapshot_len = ecm.begin_step(step);
        let mut outcome = Ok(());
        let mut visited = 0;
        for index in 0..snapshot_len {
            visited += 1;
            if let Err(e) = ecm.run_cell(index, step) {
                tracing::error!(error = %e, "Step aborted");
                outcome = Err(e);
                break;
            }
        }

        let summary = ecm.end_step(step, visited);
        self.step += 1;
        tracing::debug!(
            visited = summary.visited,
            born = summary.born,
            removed = summary.removed,
            cells = ecm.count(),
            "Step complete"
        );
        outcome
    }
}
