//! Cells and the division protocol.

use crate::module::CellModule;
use crate::physics::PhysicalSphere;
use crate::soma::SomaElement;
use cellsim_data::{CellId, CellSnapshot, Lineage};
use glam::DVec3;

/// Smallest distance between the two centres after a division, so that even
/// an empty cell produces a displaced daughter.
pub const MIN_SEPARATION: f64 = 1e-3;

/// A simulated agent: one mechanical body plus an ordered list of behavior
/// modules. List order is execution order within a step.
#[derive(Debug)]
pub struct Cell {
    id: CellId,
    lineage: Lineage,
    soma: SomaElement,
    pub(crate) modules: Vec<Box<dyn CellModule>>,
}

impl Cell {
    #[must_use]
    pub fn new(id: CellId, soma: SomaElement, lineage: Lineage) -> Self {
        Self {
            id,
            lineage,
            soma,
            modules: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> CellId {
        self.id
    }

    #[must_use]
    pub fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    #[must_use]
    pub fn soma(&self) -> &SomaElement {
        &self.soma
    }

    pub fn soma_mut(&mut self) -> &mut SomaElement {
        &mut self.soma
    }

    #[must_use]
    pub fn modules(&self) -> &[Box<dyn CellModule>] {
        &self.modules
    }

    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Appends `module` and points its back-reference at this cell.
    pub fn add_module(&mut self, mut module: Box<dyn CellModule>) -> &mut Self {
        module.set_cell(Some(self.id));
        self.modules.push(module);
        self
    }

    /// Detaches and returns the module at `index`.
    pub fn remove_module(&mut self, index: usize) -> Option<Box<dyn CellModule>> {
        if index >= self.modules.len() {
            return None;
        }
        let mut module = self.modules.remove(index);
        module.set_cell(None);
        Some(module)
    }

    /// Divides this cell into itself and a new daughter.
    ///
    /// Volume is split equally, the two centers move apart along `axis`, and
    /// the daughter receives independent copies of every copy-on-divide
    /// module. The parent keeps its module list unchanged. Division is not
    /// gated by size; callers decide when to divide.
    pub fn divide(
        &mut self,
        daughter_id: CellId,
        axis: DVec3,
        separation_factor: f64,
        step: u64,
    ) -> Cell {
        let mut daughter = self.split_off(daughter_id, axis, separation_factor, step);
        daughter.inherit_modules(self.modules.iter().map(|m| &**m));
        daughter
    }

    /// Mechanical half of division: halves the volume and positions both
    /// cells. The returned daughter has no modules yet.
    pub(crate) fn split_off(
        &mut self,
        daughter_id: CellId,
        axis: DVec3,
        separation_factor: f64,
        step: u64,
    ) -> Cell {
        let axis = axis.try_normalize().unwrap_or(DVec3::X);
        let center = self.soma.position();
        let sphere = self.soma.physical_sphere_mut();
        let half = sphere.split_volume();

        let mut daughter_sphere = PhysicalSphere::with_volume(center, half);
        let half_gap =
            (daughter_sphere.diameter() * separation_factor / 2.0).max(MIN_SEPARATION / 2.0);
        let offset = axis * half_gap;
        sphere.set_position(center - offset);
        daughter_sphere.set_position(center + offset);

        Cell::new(
            daughter_id,
            SomaElement::new(daughter_sphere),
            Lineage::daughter_of(self.id, &self.lineage, step),
        )
    }

    pub(crate) fn inherit_modules<'m, I>(&mut self, parent_modules: I)
    where
        I: IntoIterator<Item = &'m (dyn CellModule + 'static)>,
    {
        for module in parent_modules {
            if module.is_copied_when_cell_divides() {
                self.add_module(module.get_copy());
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            id: self.id,
            lineage: self.lineage,
            position: self.soma.position(),
            diameter: self.soma.diameter(),
            volume: self.soma.volume(),
            modules: self.modules.iter().map(|m| m.snapshot()).collect(),
        }
    }
}
