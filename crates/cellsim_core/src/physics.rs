//! Spherical geometry backing each cell's mechanical body.
//!
//! Volume is the tracked quantity; the diameter is always recomputed from it
//! through `V = (4/3)·π·r³`, so the two never drift apart.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Diameter of a sphere holding `volume`.
#[must_use]
pub fn diameter_from_volume(volume: f64) -> f64 {
    2.0 * (3.0 * volume / (4.0 * PI)).cbrt()
}

/// Volume of a sphere of the given diameter.
#[must_use]
pub fn volume_from_diameter(diameter: f64) -> f64 {
    PI / 6.0 * diameter.powi(3)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSphere {
    position: DVec3,
    diameter: f64,
    volume: f64,
}

impl PhysicalSphere {
    /// Creates a sphere centred on `position`. Negative diameters clamp to zero.
    #[must_use]
    pub fn new(position: DVec3, diameter: f64) -> Self {
        let mut sphere = Self {
            position,
            diameter: 0.0,
            volume: 0.0,
        };
        sphere.set_diameter(diameter);
        sphere
    }

    #[must_use]
    pub fn with_volume(position: DVec3, volume: f64) -> Self {
        let mut sphere = Self {
            position,
            diameter: 0.0,
            volume: 0.0,
        };
        sphere.set_volume(volume);
        sphere
    }

    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Adds `delta` to the volume and recomputes the diameter.
    ///
    /// This is the growth primitive. A result below zero clamps to an empty
    /// sphere instead of failing; a NaN delta is ignored.
    pub fn change_volume(&mut self, delta: f64) {
        if delta.is_nan() {
            tracing::warn!("Ignoring NaN volume change");
            return;
        }
        let target = self.volume + delta;
        if target < 0.0 {
            tracing::debug!(
                volume = self.volume,
                delta = delta,
                "Volume change clamped to zero"
            );
        }
        self.set_volume(target);
    }

    /// Sets the volume directly, clamping negatives to zero.
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = if volume.is_nan() { 0.0 } else { volume.max(0.0) };
        self.diameter = diameter_from_volume(self.volume);
    }

    /// Sets the diameter directly, clamping negatives to zero.
    pub fn set_diameter(&mut self, diameter: f64) {
        let diameter = if diameter.is_nan() { 0.0 } else { diameter.max(0.0) };
        self.volume = volume_from_diameter(diameter);
        self.diameter = diameter;
    }

    pub fn change_diameter(&mut self, delta: f64) {
        self.set_diameter(self.diameter + delta);
    }

    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    pub fn move_by(&mut self, delta: DVec3) {
        self.position += delta;
    }

    /// Halves the volume in place and returns the half that was given away.
    pub(crate) fn split_volume(&mut self) -> f64 {
        let half = self.volume / 2.0;
        self.set_volume(half);
        half
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        let scale = a.abs().max(b.abs()).max(1.0);
        assert!((a - b).abs() <= 1e-9 * scale, "{a} != {b}");
    }

    #[test]
    fn test_new_sphere_volume_matches_diameter() {
        let s = PhysicalSphere::new(DVec3::ZERO, 10.0);
        assert_close(s.volume(), PI / 6.0 * 1000.0);
        assert_close(s.diameter(), 10.0);
        assert_close(s.radius(), 5.0);
    }

    #[test]
    fn test_change_volume_grows_diameter() {
        let mut s = PhysicalSphere::new(DVec3::ZERO, 10.0);
        let before = s.diameter();
        s.change_volume(300.0);
        assert!(s.diameter() > before);
        assert_close(s.diameter(), diameter_from_volume(s.volume()));
    }

    #[test]
    fn test_change_volume_clamps_at_zero() {
        let mut s = PhysicalSphere::new(DVec3::ZERO, 10.0);
        s.change_volume(-1.0e6);
        assert_eq!(s.volume(), 0.0);
        assert_eq!(s.diameter(), 0.0);
    }

    #[test]
    fn test_nan_delta_is_ignored() {
        let mut s = PhysicalSphere::new(DVec3::ZERO, 10.0);
        let before = s.clone();
        s.change_volume(f64::NAN);
        assert_eq!(s, before);
    }

    #[test]
    fn test_negative_diameter_clamps() {
        let s = PhysicalSphere::new(DVec3::ZERO, -3.0);
        assert_eq!(s.diameter(), 0.0);
        assert_eq!(s.volume(), 0.0);
    }

    #[test]
    fn test_change_diameter_updates_volume() {
        let mut s = PhysicalSphere::new(DVec3::ZERO, 10.0);
        s.change_diameter(2.0);
        assert_close(s.diameter(), 12.0);
        assert_close(s.volume(), volume_from_diameter(12.0));
    }

    #[test]
    fn test_split_volume_halves() {
        let mut s = PhysicalSphere::new(DVec3::ZERO, 20.0);
        let before = s.volume();
        let given = s.split_volume();
        assert_eq!(given, before / 2.0);
        assert_eq!(s.volume(), before / 2.0);
    }

    #[test]
    fn test_move_by() {
        let mut s = PhysicalSphere::new(DVec3::new(1.0, 2.0, 3.0), 5.0);
        s.move_by(DVec3::new(1.0, -2.0, 0.5));
        assert_eq!(s.position(), DVec3::new(2.0, 0.0, 3.5));
    }
}
