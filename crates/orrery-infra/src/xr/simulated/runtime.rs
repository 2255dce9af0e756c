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

use super::state::{lock, SimState, FRAME_INTERVAL_MS};
use super::SimulatedXrController;
use orrery_core::renderer::FramebufferId;
use orrery_core::xr::{
    FrameRequestId, ReferenceSpace, ReferenceSpaceType, SessionFeature, SessionMode,
    SessionUnavailableError, ViewerPose, Viewport, XrFrame, XrInputEvent, XrRuntime, XrSession,
    XrView,
};
use std::sync::{Arc, Mutex};

/// A runtime that grants one simulated device session at a time.
#[derive(Debug, Default)]
pub struct SimulatedXrRuntime {
    state: Arc<Mutex<SimState>>,
}

impl SimulatedXrRuntime {
    /// Creates a runtime supporting immersive AR with hit testing, with a viewer
    /// standing at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a controller for scripting this runtime.
    pub fn controller(&self) -> SimulatedXrController {
        SimulatedXrController::new(Arc::clone(&self.state))
    }
}

impl XrRuntime for SimulatedXrRuntime {
    fn is_session_supported(&self, mode: SessionMode) -> bool {
        lock(&self.state).supported_modes.contains(&mode)
    }

    fn request_session(
        &mut self,
        mode: SessionMode,
        required: &[SessionFeature],
    ) -> Result<Box<dyn XrSession>, SessionUnavailableError> {
        let mut state = lock(&self.state);
        if !state.supported_modes.contains(&mode) {
            return Err(SessionUnavailableError::UnsupportedMode(mode));
        }
        if let Some(missing) = required
            .iter()
            .find(|f| !state.supported_features.contains(*f))
        {
            return Err(SessionUnavailableError::FeatureUnsupported(*missing));
        }
        if state.session_live && !state.ended {
            return Err(SessionUnavailableError::AlreadyActive);
        }

        state.sessions_granted += 1;
        state.session_live = true;
        state.ended = false;
        state.pending_request = None;
        state.input = None;
        log::info!(
            "Simulated {mode:?} session #{} granted.",
            state.sessions_granted
        );
        Ok(Box::new(SimulatedXrSession {
            state: Arc::clone(&self.state),
            next_space: 0,
        }))
    }
}

/// A session of a [`SimulatedXrRuntime`].
#[derive(Debug)]
pub struct SimulatedXrSession {
    state: Arc<Mutex<SimState>>,
    next_space: u32,
}

impl XrSession for SimulatedXrSession {
    fn request_reference_space(
        &mut self,
        kind: ReferenceSpaceType,
    ) -> Result<ReferenceSpace, SessionUnavailableError> {
        if !lock(&self.state).reference_spaces.contains(&kind) {
            return Err(SessionUnavailableError::ReferenceSpaceUnavailable(kind));
        }
        self.next_space += 1;
        Ok(ReferenceSpace {
            kind,
            id: self.next_space,
        })
    }

    fn set_input_sender(&mut self, sender: flume::Sender<XrInputEvent>) {
        lock(&self.state).input = Some(sender);
    }

    fn request_animation_frame(&mut self) -> FrameRequestId {
        let mut state = lock(&self.state);
        state.next_request += 1;
        let id = FrameRequestId(state.next_request);
        state.pending_request = Some(id);
        id
    }

    fn poll_frame(&mut self) -> Option<Box<dyn XrFrame>> {
        let mut state = lock(&self.state);
        if state.ended {
            return None;
        }
        state.pending_request.take()?;
        state.frame_index += 1;

        if let Some(every) = state.select_every.filter(|n| *n > 0) {
            if state.frame_index % every == 0 {
                state.emit_select();
            }
        }
        let pose = match state.scripted_poses.pop_front() {
            Some(scripted) => scripted,
            None => state.idle_pose.clone(),
        };
        Some(Box::new(SimulatedFrame {
            time: state.frame_index as f64 * FRAME_INTERVAL_MS,
            pose,
        }))
    }

    fn framebuffer(&self) -> FramebufferId {
        lock(&self.state).framebuffer
    }

    fn viewport(&self, _view: &XrView) -> Viewport {
        lock(&self.state).viewport
    }

    fn is_ended(&self) -> bool {
        lock(&self.state).ended
    }

    fn end(&mut self) {
        let mut state = lock(&self.state);
        if !state.ended {
            state.ended = true;
            state.session_live = false;
            state.pending_request = None;
            state.input = None;
            log::info!("Simulated session ended.");
        }
    }
}

/// One frame delivered by a [`SimulatedXrSession`].
#[derive(Debug, Clone)]
pub struct SimulatedFrame {
    time: f64,
    pose: Option<ViewerPose>,
}

impl SimulatedFrame {
    /// Creates a frame directly, bypassing a session.
    pub fn new(time: f64, pose: Option<ViewerPose>) -> Self {
        Self { time, pose }
    }
}

impl XrFrame for SimulatedFrame {
    fn time(&self) -> f64 {
        self.time
    }

    fn viewer_pose(&self, _space: &ReferenceSpace) -> Option<ViewerPose> {
        self.pose.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_feature_is_refused() {
        let mut runtime = SimulatedXrRuntime::new();
        runtime.controller().set_supported_features(&[]);
        let err = runtime
            .request_session(SessionMode::ImmersiveAr, &[SessionFeature::HitTest])
            .unwrap_err();
        assert_eq!(
            err,
            SessionUnavailableError::FeatureUnsupported(SessionFeature::HitTest)
        );
    }

    #[test]
    fn unsupported_mode_is_refused() {
        let mut runtime = SimulatedXrRuntime::new();
        assert!(!runtime.is_session_supported(SessionMode::ImmersiveVr));
        assert!(matches!(
            runtime.request_session(SessionMode::ImmersiveVr, &[]),
            Err(SessionUnavailableError::UnsupportedMode(SessionMode::ImmersiveVr))
        ));
    }

    #[test]
    fn frames_are_only_delivered_when_requested() {
        let mut runtime = SimulatedXrRuntime::new();
        let mut session = runtime
            .request_session(SessionMode::ImmersiveAr, &[SessionFeature::HitTest])
            .unwrap();
        assert!(session.poll_frame().is_none());

        session.request_animation_frame();
        let frame = session.poll_frame().expect("frame was requested");
        assert!(frame.time() > 0.0);
        assert!(session.poll_frame().is_none());
    }

    #[test]
    fn scripted_poses_are_consumed_in_order() {
        let mut runtime = SimulatedXrRuntime::new();
        let controller = runtime.controller();
        controller.push_tracking_loss(1);
        let mut session = runtime
            .request_session(SessionMode::ImmersiveAr, &[])
            .unwrap();
        let space = session
            .request_reference_space(ReferenceSpaceType::Local)
            .unwrap();

        session.request_animation_frame();
        assert!(session.poll_frame().unwrap().viewer_pose(&space).is_none());
        session.request_animation_frame();
        assert!(session.poll_frame().unwrap().viewer_pose(&space).is_some());
    }

    #[test]
    fn only_one_live_session() {
        let mut runtime = SimulatedXrRuntime::new();
        let mut first = runtime.request_session(SessionMode::ImmersiveAr, &[]).unwrap();
        assert!(matches!(
            runtime.request_session(SessionMode::ImmersiveAr, &[]),
            Err(SessionUnavailableError::AlreadyActive)
        ));
        first.end();
        assert!(first.is_ended());
        assert!(runtime.request_session(SessionMode::ImmersiveAr, &[]).is_ok());
    }
}
