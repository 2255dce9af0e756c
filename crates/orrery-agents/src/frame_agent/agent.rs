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

use super::{FrameOutcome, FramePhase, FrameStats, SchedulerState};
use crate::scene_agent::SceneObjectManager;
use orrery_core::event::EventBus;
use orrery_core::renderer::{CameraState, GalleryRenderer};
use orrery_core::xr::{
    PoseSample, ReferenceSpace, ReferenceSpaceType, SessionFeature, SessionMode,
    SessionUnavailableError, XrFrame, XrInputEvent, XrRuntime, XrSession,
};
use orrery_data::gallery::CarouselState;
use std::time::Duration;

/// Drives the gallery from an immersive AR session.
///
/// The scheduler is the single writer of the scene and the camera: input
/// events and texture completions are queued by other threads and applied
/// here, on whichever thread calls [`on_frame`](Self::on_frame) or
/// [`pump`](Self::pump).
#[derive(Debug)]
pub struct ArFrameScheduler {
    renderer: Box<dyn GalleryRenderer>,
    runtime: Box<dyn XrRuntime>,
    session: Option<Box<dyn XrSession>>,
    reference_space: Option<ReferenceSpace>,
    carousel: CarouselState,
    scene: SceneObjectManager,
    camera: CameraState,
    input: EventBus<XrInputEvent>,
    state: SchedulerState,
    phase: FramePhase,
    stats: FrameStats,
    required_features: Vec<SessionFeature>,
}

impl ArFrameScheduler {
    /// Creates an inactive scheduler.
    pub fn new(
        renderer: Box<dyn GalleryRenderer>,
        runtime: Box<dyn XrRuntime>,
        carousel: CarouselState,
        scene: SceneObjectManager,
    ) -> Self {
        Self {
            renderer,
            runtime,
            session: None,
            reference_space: None,
            carousel,
            scene,
            camera: CameraState::new(),
            input: EventBus::new(),
            state: SchedulerState::Uninitialized,
            phase: FramePhase::FramePending,
            stats: FrameStats::default(),
            required_features: vec![SessionFeature::HitTest],
        }
    }

    /// Starts an immersive AR session and places the first batch.
    ///
    /// On failure the scheduler returns to [`SchedulerState::Uninitialized`] and
    /// may be activated again. A scheduler that has ended stays ended.
    pub fn activate(&mut self) -> Result<(), SessionUnavailableError> {
        if self.state == SchedulerState::Ended {
            return Err(SessionUnavailableError::Ended);
        }
        if matches!(
            self.state,
            SchedulerState::SessionRequested | SchedulerState::Active
        ) {
            return Err(SessionUnavailableError::AlreadyActive);
        }

        self.state = SchedulerState::SessionRequested;
        match self.start_session() {
            Ok(()) => {
                self.state = SchedulerState::Active;
                self.phase = FramePhase::FramePending;
                log::info!(
                    "AR session active with {} panels.",
                    self.scene.live().len()
                );
                Ok(())
            }
            Err(e) => {
                self.state = SchedulerState::Uninitialized;
                log::error!("AR session activation failed: {e}");
                Err(e)
            }
        }
    }

    fn start_session(&mut self) -> Result<(), SessionUnavailableError> {
        self.renderer
            .acquire_surface()
            .map_err(|e| SessionUnavailableError::SurfaceUnavailable(e.to_string()))?;

        let mut session = self
            .runtime
            .request_session(SessionMode::ImmersiveAr, &self.required_features)?;
        let space = match session.request_reference_space(ReferenceSpaceType::Local) {
            Ok(space) => space,
            Err(e) => {
                session.end();
                return Err(e);
            }
        };
        session.set_input_sender(self.input.sender());

        let batch = self.carousel.advance();
        self.scene
            .place(batch, self.carousel.batch_size(), self.renderer.as_mut());

        session.request_animation_frame();
        self.session = Some(session);
        self.reference_space = Some(space);
        Ok(())
    }

    /// Processes one display refresh.
    pub fn on_frame(&mut self, frame: &dyn XrFrame) -> FrameOutcome {
        if self.state != SchedulerState::Active {
            return FrameOutcome::Inactive;
        }
        let (Some(session), Some(space)) = (self.session.as_deref_mut(), self.reference_space)
        else {
            return FrameOutcome::Inactive;
        };
        if session.is_ended() {
            self.finish();
            return FrameOutcome::Inactive;
        }

        // Keep the loop alive whatever happens below.
        session.request_animation_frame();

        for event in self.input.drain() {
            if event == XrInputEvent::Select {
                let batch = self.carousel.advance();
                let placed =
                    self.scene
                        .swap(batch, self.carousel.batch_size(), self.renderer.as_mut());
                self.stats.selects_handled += 1;
                log::info!("Select: swapped in {placed} panels.");
            }
        }

        let report = self.scene.poll(self.renderer.as_mut());
        if report != Default::default() {
            log::trace!("Texture poll: {report:?}");
        }

        self.renderer.bind_framebuffer(session.framebuffer());

        self.phase = FramePhase::PoseSampling;
        let view = frame
            .viewer_pose(&space)
            .and_then(|pose| pose.primary_view().copied());
        let Some(view) = view else {
            self.phase = FramePhase::FramePending;
            self.stats.frames_skipped += 1;
            log::trace!("No viewer pose at t={:.1}ms, frame skipped.", frame.time());
            return FrameOutcome::Skipped;
        };

        let viewport = session.viewport(&view);
        self.renderer.set_size(viewport.width, viewport.height);
        if !self.camera.apply_pose(&PoseSample::from_view(&view, viewport)) {
            self.phase = FramePhase::FramePending;
            self.stats.frames_skipped += 1;
            log::warn!("Viewer pose is not invertible, frame skipped.");
            return FrameOutcome::Skipped;
        }

        self.phase = FramePhase::Rendering;
        let outcome = match self.renderer.render(&self.camera) {
            Ok(stats) => {
                self.stats.frames_rendered += 1;
                log::trace!("Frame rendered: {stats:?}");
                FrameOutcome::Rendered(stats)
            }
            Err(e) => {
                self.stats.frames_failed += 1;
                log::error!("Render failed: {e}");
                FrameOutcome::RenderFailed(e)
            }
        };
        self.phase = FramePhase::FramePending;
        outcome
    }

    /// Runs [`on_frame`](Self::on_frame) if the session has a frame due.
    ///
    /// Returns `None` when no frame was processed.
    pub fn pump(&mut self) -> Option<FrameOutcome> {
        if self.state != SchedulerState::Active {
            return None;
        }
        let session = self.session.as_deref_mut()?;
        if session.is_ended() {
            self.finish();
            return None;
        }
        let frame = session.poll_frame()?;
        Some(self.on_frame(frame.as_ref()))
    }

    /// Clears the scene and ends the session.
    pub fn end(&mut self) {
        if let Some(session) = self.session.as_deref_mut() {
            if !session.is_ended() {
                session.end();
            }
        }
        self.finish();
    }

    fn finish(&mut self) {
        if self.state == SchedulerState::Ended {
            return;
        }
        self.scene.clear(self.renderer.as_mut());
        self.session = None;
        self.reference_space = None;
        self.state = SchedulerState::Ended;
        self.phase = FramePhase::FramePending;
        log::info!(
            "AR session ended after {} rendered frames.",
            self.stats.frames_rendered
        );
    }

    /// Blocks until every in-flight texture load has finished, or `timeout` elapses.
    pub fn wait_for_loads(&mut self, timeout: Duration) -> bool {
        self.scene.wait_for_loads(timeout)
    }

    /// A sender that injects input events as if they came from the session.
    pub fn input_sender(&self) -> flume::Sender<XrInputEvent> {
        self.input.sender()
    }

    /// Lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Current frame phase.
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Frame counters.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// The camera as of the last rendered frame.
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// The live scene.
    pub fn scene(&self) -> &SceneObjectManager {
        &self.scene
    }

    /// The carousel.
    pub fn carousel(&self) -> &CarouselState {
        &self.carousel
    }

    /// The renderer.
    pub fn renderer(&self) -> &dyn GalleryRenderer {
        self.renderer.as_ref()
    }
}
