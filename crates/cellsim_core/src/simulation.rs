//! Explicit per-run simulation context.
//!
//! Bundles the environment, its scheduler and the metrics collector so a
//! run has one owner with clear setup and teardown.

use crate::config::AppConfig;
use crate::ecm::Ecm;
use crate::error::Result;
use crate::factory::CellFactory;
use crate::metrics::Metrics;
use crate::modules::standard_modules;
use crate::scheduler::Scheduler;
use cellsim_data::{CellId, EcmSnapshot};
use glam::DVec3;
use serde::Serialize;
use std::time::Instant;
use uuid::Uuid;

/// Summary of a run, suitable for logging or writing out as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub seed: u64,
    pub config_fingerprint: String,
    pub steps: u64,
    pub cells: usize,
    pub divisions: u64,
    pub removals: u64,
    pub max_generation: u32,
    pub total_volume: f64,
    pub elapsed_ms: u64,
}

pub struct Simulation {
    pub config: AppConfig,
    pub ecm: Ecm,
    pub scheduler: Scheduler,
    pub metrics: Metrics,
    factory: CellFactory,
}

impl Simulation {
    /// Creates an empty, validated run.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let ecm = Ecm::new(&config);
        let scheduler = Scheduler::new(&ecm);
        Ok(Self {
            metrics: Metrics::new(config.simulation.log_interval),
            factory: CellFactory::from_config(&config),
            ecm,
            scheduler,
            config,
        })
    }

    /// Places `initial_population` founders, each carrying the standard
    /// module set.
    ///
    /// Founders line up along +X, spaced one division diameter apart.
    pub fn populate(&mut self) -> Result<Vec<CellId>> {
        let spacing = self.config.growth.division_diameter;
        let mut ids = Vec::with_capacity(self.config.simulation.initial_population);
        for i in 0..self.config.simulation.initial_population {
            let position = DVec3::new(i as f64 * spacing, 0.0, 0.0);
            let cell = self.factory.create_cell_instance(position, &mut self.ecm)?;
            for module in standard_modules(&self.config) {
                cell.add_module(module);
            }
            ids.push(cell.id());
        }
        tracing::info!(cells = ids.len(), "Population seeded");
        Ok(ids)
    }

    #[must_use]
    pub fn factory(&self) -> &CellFactory {
        &self.factory
    }

    /// Advances the run by one step and records metrics.
    pub fn step(&mut self) -> Result<()> {
        let start = Instant::now();
        let started = self.scheduler.step();
        let result = self.scheduler.simulate_one_step(&mut self.ecm);
        if self.scheduler.step() > started {
            let summary = self.ecm.last_step();
            self.metrics.record_step(
                start.elapsed(),
                self.ecm.count(),
                summary.born,
                summary.removed,
            );
        }
        result
    }

    /// Runs `steps` steps, stopping at the first failure.
    pub fn run(&mut self, steps: u64) -> Result<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> EcmSnapshot {
        self.ecm.snapshot()
    }

    #[must_use]
    pub fn report(&self) -> RunReport {
        let mut max_generation = 0;
        let mut total_volume = 0.0;
        self.ecm.for_each_cell(|cell| {
            max_generation = max_generation.max(cell.lineage().generation);
            total_volume += cell.soma().volume();
        });
        RunReport {
            run_id: self.ecm.run_id(),
            seed: self.ecm.seed(),
            config_fingerprint: self.config.fingerprint(),
            steps: self.scheduler.step(),
            cells: self.ecm.count(),
            divisions: self.metrics.divisions(),
            removals: self.metrics.removals(),
            max_generation,
            total_volume,
            elapsed_ms: self.metrics.elapsed().as_millis() as u64,
        }
    }

    /// Ends the run, releasing every cell.
    pub fn teardown(&mut self) -> RunReport {
        let report = self.report();
        self.ecm.teardown();
        report
    }
}
