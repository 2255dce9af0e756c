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

use super::{
    FrameRequestId, ReferenceSpace, ReferenceSpaceType, SessionFeature, SessionMode,
    SessionUnavailableError, Viewport, ViewerPose, XrInputEvent, XrView,
};
use crate::renderer::FramebufferId;

/// Entry point of an XR runtime.
pub trait XrRuntime: std::fmt::Debug + Send {
    /// Returns `true` if sessions of `mode` can be requested at all.
    fn is_session_supported(&self, mode: SessionMode) -> bool;

    /// Requests a session that supports every feature in `required`.
    fn request_session(
        &mut self,
        mode: SessionMode,
        required: &[SessionFeature],
    ) -> Result<Box<dyn XrSession>, SessionUnavailableError>;
}

/// A live XR session.
pub trait XrSession: std::fmt::Debug + Send {
    /// Creates a reference space of the given type.
    fn request_reference_space(
        &mut self,
        kind: ReferenceSpaceType,
    ) -> Result<ReferenceSpace, SessionUnavailableError>;

    /// Registers the channel input events are forwarded to.
    fn set_input_sender(&mut self, sender: flume::Sender<XrInputEvent>);

    /// Asks for the next display refresh to be delivered through [`poll_frame`](Self::poll_frame).
    ///
    /// Requests are one-shot: a frame is only delivered if one was requested.
    fn request_animation_frame(&mut self) -> FrameRequestId;

    /// Returns the frame for the current display refresh, if one is due and was requested.
    fn poll_frame(&mut self) -> Option<Box<dyn XrFrame>>;

    /// The framebuffer of the session's output layer.
    fn framebuffer(&self) -> FramebufferId;

    /// The viewport the output layer assigns to `view`.
    fn viewport(&self, view: &XrView) -> Viewport;

    /// `true` once the session has ended, by request or by the runtime.
    fn is_ended(&self) -> bool;

    /// Ends the session.
    fn end(&mut self);
}

/// The state of the world for one display refresh.
pub trait XrFrame {
    /// Predicted display time, in milliseconds.
    fn time(&self) -> f64;

    /// The viewer pose relative to `space`; `None` while tracking is not established.
    fn viewer_pose(&self, space: &ReferenceSpace) -> Option<ViewerPose>;
}
