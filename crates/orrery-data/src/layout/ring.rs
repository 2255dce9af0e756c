// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use orrery_core::math::{Quaternion, Vec3, TAU};
use orrery_core::renderer::PanelTransform;

/// Evenly spaced slots on a horizontal circle around the origin, each facing inwards.
///
/// Slot `i` of `N` sits at angle `θ = 2π·i/N`, at `(R·cos θ, 0, R·sin θ)`,
/// rotated so that its local `+Z` axis points at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    radius: f32,
    slots: usize,
}

impl RingLayout {
    /// Creates a ring of `slots` positions at `radius` metres from the origin.
    pub fn new(radius: f32, slots: usize) -> Self {
        Self { radius, slots }
    }

    /// Radius of the ring.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Number of slots.
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Angle of slot `index` around the Y axis, in radians.
    pub fn angle(&self, index: usize) -> f32 {
        if self.slots == 0 {
            return 0.0;
        }
        TAU * index as f32 / self.slots as f32
    }

    /// The world transform of slot `index`.
    pub fn slot(&self, index: usize) -> PanelTransform {
        let (sin, cos) = self.angle(index).sin_cos();
        let position = Vec3::new(self.radius * cos, 0.0, self.radius * sin);
        // Zero radius leaves nothing to face; keep the identity orientation.
        let rotation = Quaternion::look_rotation(-position, Vec3::Y).unwrap_or_default();
        PanelTransform { position, rotation }
    }

    /// The transforms of every slot, in slot order.
    pub fn transforms(&self) -> impl Iterator<Item = PanelTransform> + '_ {
        (0..self.slots).map(|i| self.slot(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn every_slot_is_on_the_ring_and_faces_the_origin() {
        for slots in 0..=16 {
            let ring = RingLayout::new(1.5, slots);
            assert_eq!(ring.transforms().count(), slots);
            for transform in ring.transforms() {
                assert_relative_eq!(transform.position.horizontal_length(), 1.5, epsilon = 1e-5);
                assert_eq!(transform.position.y, 0.0);
                let to_origin = (-transform.position).normalize();
                assert_relative_eq!(transform.forward().dot(to_origin), 1.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn first_slot_is_on_positive_x() {
        let slot = RingLayout::new(2.0, 4).slot(0);
        assert_relative_eq!(slot.position.x, 2.0);
        assert_relative_eq!(slot.position.z, 0.0);
    }

    #[test]
    fn slots_are_evenly_spaced() {
        let ring = RingLayout::new(1.0, 3);
        assert_relative_eq!(ring.angle(1).to_degrees(), 120.0, epsilon = 1e-4);
        assert_relative_eq!(ring.angle(2).to_degrees(), 240.0, epsilon = 1e-4);
        let quarter = RingLayout::new(1.0, 4).slot(1);
        assert_relative_eq!(quarter.position.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(quarter.position.z, 1.0, epsilon = 1e-6);
    }
}
