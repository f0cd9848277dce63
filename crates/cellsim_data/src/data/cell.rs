use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a live cell.
///
/// Ids are allocated monotonically by the environment, so ordering by id is
/// ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(pub u64);

impl CellId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell#{}", self.0)
    }
}

/// Ancestry of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Lineage {
    /// Cell this one divided from, `None` for founders.
    pub parent: Option<CellId>,
    /// Step during which the cell was created.
    pub birth_step: u64,
    /// Number of divisions separating this cell from its founder.
    pub generation: u32,
}

impl Lineage {
    #[must_use]
    pub fn founder(birth_step: u64) -> Self {
        Self {
            parent: None,
            birth_step,
            generation: 0,
        }
    }

    #[must_use]
    pub fn daughter_of(parent: CellId, parent_lineage: &Lineage, birth_step: u64) -> Self {
        Self {
            parent: Some(parent),
            birth_step,
            generation: parent_lineage.generation + 1,
        }
    }
}

/// Label of a behavior module variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    GrowthDivision,
    RandomWalk,
    Senescence,
    /// Modules defined outside the engine.
    Custom,
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModuleKind::GrowthDivision => "growth_division",
            ModuleKind::RandomWalk => "random_walk",
            ModuleKind::Senescence => "senescence",
            ModuleKind::Custom => "custom",
        };
        f.write_str(name)
    }
}
