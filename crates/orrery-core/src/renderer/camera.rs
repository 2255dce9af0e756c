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

//! The externally driven camera the scheduler renders with.

use crate::math::{Mat4, Vec3};
use crate::xr::{PoseSample, Viewport};

/// The virtual camera, mirrored from the tracked head pose every frame.
///
/// Unlike a scene-graph camera, this one never recomputes its own matrices
/// (`matrix_auto_update` is always `false`): the XR runtime is the only source
/// of truth, and [`CameraState::apply_pose`] is the only writer.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    world_matrix: Mat4,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    viewport: Option<Viewport>,
    matrix_auto_update: bool,
    revision: u64,
}

impl CameraState {
    /// Creates a camera at the origin with identity matrices.
    pub fn new() -> Self {
        Self {
            world_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            viewport: None,
            matrix_auto_update: false,
            revision: 0,
        }
    }

    /// Copies a freshly sampled pose into the camera.
    ///
    /// Returns `false` and leaves the camera untouched if the pose transform
    /// cannot be inverted into a view matrix.
    pub fn apply_pose(&mut self, sample: &PoseSample) -> bool {
        let Some(view_matrix) = sample.view_transform.affine_inverse() else {
            return false;
        };
        self.world_matrix = sample.view_transform;
        self.view_matrix = view_matrix;
        self.projection_matrix = sample.projection_transform;
        self.viewport = Some(sample.viewport);
        self.revision += 1;
        true
    }

    /// Camera-to-world transform, as reported by the runtime.
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// Camera-to-clip transform, as reported by the runtime.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// World-to-clip transform.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// The camera's position in world space.
    pub fn position(&self) -> Vec3 {
        self.world_matrix.translation()
    }

    /// The viewport of the last applied pose.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Always `false`; see the type-level documentation.
    pub fn matrix_auto_update(&self) -> bool {
        self.matrix_auto_update
    }

    /// Number of poses applied so far. Unchanged by skipped frames.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Quaternion, FRAC_PI_2};

    fn sample(view_transform: Mat4) -> PoseSample {
        PoseSample {
            view_transform,
            projection_transform: Mat4::from_translation(Vec3::new(0.0, 0.0, 0.5)),
            viewport: Viewport::new(0, 0, 1280, 720),
        }
    }

    #[test]
    fn apply_pose_derives_view_from_transform() {
        let mut camera = CameraState::new();
        let transform = Mat4::from_rotation_translation(
            Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2),
            Vec3::new(0.0, 1.6, 0.0),
        );
        assert!(camera.apply_pose(&sample(transform)));

        assert_eq!(camera.position(), Vec3::new(0.0, 1.6, 0.0));
        assert_eq!(camera.revision(), 1);
        assert_eq!(camera.viewport().map(|v| v.width), Some(1280));
        let eye = camera.view_matrix().transform_point3(camera.position());
        assert!(eye.length() < 1e-5);
        assert!(!camera.matrix_auto_update());
    }

    #[test]
    fn singular_pose_is_ignored() {
        let mut camera = CameraState::new();
        let mut singular = Mat4::IDENTITY;
        singular.cols[1] = crate::math::Vec4::ZERO;
        assert!(!camera.apply_pose(&sample(singular)));
        assert_eq!(camera, CameraState::new());
    }
}
