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

use orrery_core::math::{Mat4, Quaternion, Vec3};
use orrery_core::renderer::FramebufferId;
use orrery_core::xr::{
    Eye, FrameRequestId, ReferenceSpaceType, SessionFeature, SessionMode, ViewerPose,
    Viewport, XrInputEvent, XrView,
};
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Display refresh interval of the simulated device, in milliseconds.
pub(super) const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// A viewer standing at the origin at eye height `height`, turned `yaw_radians`
/// around the vertical axis from looking down `-Z`.
pub fn standing_pose(height: f32, yaw_radians: f32, aspect_ratio: f32) -> ViewerPose {
    let transform = Mat4::from_rotation_translation(
        Quaternion::from_axis_angle(Vec3::Y, yaw_radians),
        Vec3::new(0.0, height, 0.0),
    );
    ViewerPose {
        transform,
        views: vec![XrView {
            eye: Eye::None,
            transform,
            projection: Mat4::perspective_rh_gl(1.2, aspect_ratio, 0.05, 100.0),
        }],
        emulated_position: false,
    }
}

#[derive(Debug)]
pub(super) struct SimState {
    pub supported_modes: HashSet<SessionMode>,
    pub supported_features: HashSet<SessionFeature>,
    pub reference_spaces: HashSet<ReferenceSpaceType>,
    pub scripted_poses: VecDeque<Option<ViewerPose>>,
    pub idle_pose: Option<ViewerPose>,
    pub select_every: Option<u64>,
    pub input: Option<flume::Sender<XrInputEvent>>,
    pub pending_request: Option<FrameRequestId>,
    pub next_request: u64,
    pub frame_index: u64,
    pub sessions_granted: u64,
    pub session_live: bool,
    pub ended: bool,
    pub framebuffer: FramebufferId,
    pub viewport: Viewport,
}

impl Default for SimState {
    fn default() -> Self {
        let viewport = Viewport::new(0, 0, 1280, 720);
        Self {
            supported_modes: [SessionMode::ImmersiveAr, SessionMode::Inline].into(),
            supported_features: [
                SessionFeature::HitTest,
                SessionFeature::Local,
                SessionFeature::LocalFloor,
            ]
            .into(),
            reference_spaces: [
                ReferenceSpaceType::Viewer,
                ReferenceSpaceType::Local,
                ReferenceSpaceType::LocalFloor,
            ]
            .into(),
            scripted_poses: VecDeque::new(),
            idle_pose: Some(standing_pose(
                1.6,
                0.0,
                viewport.width as f32 / viewport.height as f32,
            )),
            select_every: None,
            input: None,
            pending_request: None,
            next_request: 0,
            frame_index: 0,
            sessions_granted: 0,
            session_live: false,
            ended: false,
            framebuffer: FramebufferId(1),
            viewport,
        }
    }
}

impl SimState {
    /// Forwards a full select gesture. Returns `false` if nobody listens.
    pub fn emit_select(&mut self) -> bool {
        let Some(input) = &self.input else {
            return false;
        };
        let delivered = [
            XrInputEvent::SelectStart,
            XrInputEvent::SelectEnd,
            XrInputEvent::Select,
        ]
        .into_iter()
        .all(|event| input.send(event).is_ok());
        if !delivered {
            self.input = None;
        }
        delivered
    }
}

pub(super) fn lock(state: &Mutex<SimState>) -> MutexGuard<'_, SimState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
