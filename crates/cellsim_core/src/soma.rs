use crate::physics::PhysicalSphere;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Mechanical body of a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SomaElement {
    sphere: PhysicalSphere,
}

impl SomaElement {
    #[must_use]
    pub fn new(sphere: PhysicalSphere) -> Self {
        Self { sphere }
    }

    #[must_use]
    pub fn physical_sphere(&self) -> &PhysicalSphere {
        &self.sphere
    }

    pub fn physical_sphere_mut(&mut self) -> &mut PhysicalSphere {
        &mut self.sphere
    }

    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.sphere.position()
    }

    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.sphere.diameter()
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        self.sphere.volume()
    }
}
