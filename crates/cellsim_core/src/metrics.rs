//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and counters for monitoring population
//! growth and step cost.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics collector for simulation statistics.
pub struct Metrics {
    step_count: AtomicU64,
    cell_count: AtomicU64,
    divisions: AtomicU64,
    removals: AtomicU64,
    last_step_micros: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Metrics {
    /// Creates a collector that logs every `log_interval` steps.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            step_count: AtomicU64::new(0),
            cell_count: AtomicU64::new(0),
            divisions: AtomicU64::new(0),
            removals: AtomicU64::new(0),
            last_step_micros: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Records a completed step with its duration and population changes.
    pub fn record_step(&self, duration: Duration, cells: usize, born: usize, removed: usize) {
        self.step_count.fetch_add(1, Ordering::Relaxed);
        self.cell_count.store(cells as u64, Ordering::Relaxed);
        self.divisions.fetch_add(born as u64, Ordering::Relaxed);
        self.removals.fetch_add(removed as u64, Ordering::Relaxed);
        self.last_step_micros
            .store(duration.as_micros() as u64, Ordering::Relaxed);

        let step = self.step_count.load(Ordering::Relaxed);
        if step % self.log_interval == 0 {
            tracing::info!(
                step = step,
                cells = cells,
                divisions = self.divisions.load(Ordering::Relaxed),
                duration_us = duration.as_micros() as u64,
                "Simulation step"
            );
        }
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn cell_count(&self) -> u64 {
        self.cell_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn divisions(&self) -> u64 {
        self.divisions.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn removals(&self) -> u64 {
        self.removals.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn last_step_duration(&self) -> Duration {
        Duration::from_micros(self.last_step_micros.load(Ordering::Relaxed))
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new(10);
        assert_eq!(metrics.step_count(), 0);
        assert_eq!(metrics.divisions(), 0);
    }

    #[test]
    fn test_record_step() {
        let metrics = Metrics::new(10);
        metrics.record_step(Duration::from_millis(2), 3, 2, 0);
        metrics.record_step(Duration::from_millis(1), 4, 1, 1);
        assert_eq!(metrics.step_count(), 2);
        assert_eq!(metrics.cell_count(), 4);
        assert_eq!(metrics.divisions(), 3);
        assert_eq!(metrics.removals(), 1);
        assert_eq!(metrics.last_step_duration(), Duration::from_millis(1));
    }

    #[test]
    fn test_zero_log_interval_is_clamped() {
        let metrics = Metrics::new(0);
        metrics.record_step(Duration::ZERO, 1, 0, 0);
        assert_eq!(metrics.step_count(), 1);
    }
}
