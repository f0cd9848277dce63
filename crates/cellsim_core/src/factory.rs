use crate::cell::Cell;
use crate::config::AppConfig;
use crate::ecm::Ecm;
use crate::error::Result;
use crate::physics::PhysicalSphere;
use crate::soma::SomaElement;
use cellsim_data::Lineage;
use glam::DVec3;

/// Creates founder cells and registers them with an environment.
#[derive(Debug, Clone)]
pub struct CellFactory {
    default_diameter: f64,
}

impl Default for CellFactory {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl CellFactory {
    #[must_use]
    pub fn new(default_diameter: f64) -> Self {
        Self { default_diameter }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.simulation.initial_diameter)
    }

    /// Creates a module-less cell of the default diameter at `position`.
    pub fn create_cell_instance<'e>(
        &self,
        position: DVec3,
        ecm: &'e mut Ecm,
    ) -> Result<&'e mut Cell> {
        self.create_cell_with_diameter(position, self.default_diameter, ecm)
    }

    pub fn create_cell_with_diameter<'e>(
        &self,
        position: DVec3,
        diameter: f64,
        ecm: &'e mut Ecm,
    ) -> Result<&'e mut Cell> {
        ecm.ensure_live()?;
        let id = ecm.allocate_id();
        let cell = Cell::new(
            id,
            SomaElement::new(PhysicalSphere::new(position, diameter)),
            Lineage::founder(ecm.clock()),
        );
        ecm.register(cell)
    }
}
