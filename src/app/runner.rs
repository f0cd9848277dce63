//! Headless run loop: seeds a population, steps it, and writes results.

use super::shutdown::ShutdownManager;
use anyhow::{Context, Result};
use cellsim_core::{AppConfig, RunReport, Simulation};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Completed,
    Extinct,
    Interrupted,
}

pub struct HeadlessRunner {
    pub sim: Simulation,
    shutdown: ShutdownManager,
    snapshot_path: Option<PathBuf>,
}

impl HeadlessRunner {
    /// Builds a simulation from `config` and seeds its initial population.
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut sim = Simulation::new(config).context("invalid simulation config")?;
        sim.populate()?;
        Ok(Self {
            sim,
            shutdown: ShutdownManager::new(),
            snapshot_path: None,
        })
    }

    #[must_use]
    pub fn with_snapshot_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    pub fn shutdown(&self) -> &ShutdownManager {
        &self.shutdown
    }

    /// Steps until `steps` have run, the population dies out, or shutdown
    /// is requested.
    pub fn run(&mut self, steps: u64) -> Result<(StopReason, RunReport)> {
        let mut reason = StopReason::Completed;
        for _ in 0..steps {
            if self.shutdown.is_shutdown_requested() {
                reason = StopReason::Interrupted;
                break;
            }
            self.sim
                .step()
                .with_context(|| format!("step {} failed", self.sim.scheduler.step()))?;
            if self.sim.ecm.is_empty() {
                reason = StopReason::Extinct;
                break;
            }
        }

        let report = self.sim.report();
        tracing::info!(
            reason = ?reason,
            steps = report.steps,
            cells = report.cells,
            divisions = report.divisions,
            "Run finished"
        );
        if let Some(path) = &self.snapshot_path {
            write_snapshot(&self.sim, path)?;
        }
        Ok((reason, report))
    }
}

/// Writes the environment's current snapshot as pretty JSON.
///
/// When `path` is a directory the file is named after the current time.
pub fn write_snapshot(sim: &Simulation, path: &Path) -> Result<PathBuf> {
    let target = if path.is_dir() {
        let timestamp = Utc::now().format("%Y-%m-%d_%H-%M-%S");
        path.join(format!("snapshot_{}.json", timestamp))
    } else {
        path.to_path_buf()
    };
    let json = serde_json::to_string_pretty(&sim.snapshot())?;
    fs::write(&target, json).with_context(|| format!("writing snapshot {}", target.display()))?;
    tracing::info!(path = %target.display(), "Snapshot written");
    Ok(target)
}
