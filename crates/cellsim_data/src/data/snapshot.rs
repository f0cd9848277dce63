use super::cell::{CellId, Lineage, ModuleKind};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// State of one attached module, as reported by the module itself.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ModuleSnapshot {
    pub kind: ModuleKind,
    pub copied_on_divide: bool,
    pub state: serde_json::Value,
}

/// Read-only view of a single cell.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CellSnapshot {
    pub id: CellId,
    pub lineage: Lineage,
    pub position: DVec3,
    pub diameter: f64,
    pub volume: f64,
    pub modules: Vec<ModuleSnapshot>,
}

/// Read-only view of the whole environment at a step boundary.
///
/// This is the only surface reporting and visualization code reads from.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EcmSnapshot {
    pub run_id: Uuid,
    pub step: u64,
    pub cells: Vec<CellSnapshot>,
}

impl EcmSnapshot {
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.cells.iter().map(|c| c.volume).sum()
    }

    #[must_use]
    pub fn max_diameter(&self) -> f64 {
        self.cells.iter().map(|c| c.diameter).fold(0.0, f64::max)
    }
}
