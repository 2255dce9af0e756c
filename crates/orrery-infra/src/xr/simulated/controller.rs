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

use super::state::{lock, SimState};
use orrery_core::xr::{ReferenceSpaceType, SessionFeature, SessionMode, ViewerPose, Viewport};
use std::sync::{Arc, Mutex};

/// Scripts a [`SimulatedXrRuntime`](super::SimulatedXrRuntime) and its sessions.
///
/// Cloneable and `Send`, so a test or a demo can keep it after the runtime has
/// been handed to a scheduler.
#[derive(Debug, Clone)]
pub struct SimulatedXrController {
    state: Arc<Mutex<SimState>>,
}

impl SimulatedXrController {
    pub(super) fn new(state: Arc<Mutex<SimState>>) -> Self {
        Self { state }
    }

    /// Queues the pose reported by the next frame.
    pub fn push_pose(&self, pose: ViewerPose) {
        lock(&self.state).scripted_poses.push_back(Some(pose));
    }

    /// Makes the next `frames` frames report no pose.
    pub fn push_tracking_loss(&self, frames: usize) {
        let mut state = lock(&self.state);
        state
            .scripted_poses
            .extend(std::iter::repeat(None).take(frames));
    }

    /// Sets the pose reported once the scripted poses run out. `None` means no tracking.
    pub fn set_idle_pose(&self, pose: Option<ViewerPose>) {
        lock(&self.state).idle_pose = pose;
    }

    /// Performs a select gesture now. Returns `false` if no session listens for input.
    pub fn select(&self) -> bool {
        lock(&self.state).emit_select()
    }

    /// Performs a select gesture every `frames` frames; `None` stops it.
    pub fn select_every(&self, frames: Option<u64>) {
        lock(&self.state).select_every = frames;
    }

    /// Ends the live session from the runtime side, as if the user left AR.
    pub fn end_session(&self) {
        let mut state = lock(&self.state);
        state.ended = true;
        state.session_live = false;
        state.pending_request = None;
        state.input = None;
    }

    /// Replaces the set of supported session features.
    pub fn set_supported_features(&self, features: &[SessionFeature]) {
        lock(&self.state).supported_features = features.iter().copied().collect();
    }

    /// Replaces the set of supported session modes.
    pub fn set_supported_modes(&self, modes: &[SessionMode]) {
        lock(&self.state).supported_modes = modes.iter().copied().collect();
    }

    /// Replaces the set of reference spaces sessions can create.
    pub fn set_reference_spaces(&self, spaces: &[ReferenceSpaceType]) {
        lock(&self.state).reference_spaces = spaces.iter().copied().collect();
    }

    /// Sets the viewport the output layer reports.
    pub fn set_viewport(&self, viewport: Viewport) {
        lock(&self.state).viewport = viewport;
    }

    /// Returns `true` if a frame has been requested and not yet delivered.
    pub fn has_pending_frame_request(&self) -> bool {
        lock(&self.state).pending_request.is_some()
    }

    /// Frames delivered so far, across sessions.
    pub fn frames_delivered(&self) -> u64 {
        lock(&self.state).frame_index
    }

    /// Sessions granted so far.
    pub fn sessions_granted(&self) -> u64 {
        lock(&self.state).sessions_granted
    }

    /// Returns `true` while a session is live.
    pub fn session_live(&self) -> bool {
        let state = lock(&self.state);
        state.session_live && !state.ended
    }
}
