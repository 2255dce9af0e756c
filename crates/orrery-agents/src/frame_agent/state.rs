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

use orrery_core::renderer::{RenderError, RenderStats};

/// Lifecycle of the scheduler.
///
/// `Uninitialized -> SessionRequested -> Active -> Ended`. A failed activation
/// returns to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulerState {
    /// No session.
    Uninitialized,
    /// Activation in progress.
    SessionRequested,
    /// Frames are being processed.
    Active,
    /// The session ended; no more frames are processed.
    Ended,
}

/// Where an active scheduler is within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramePhase {
    /// Waiting for the next display refresh.
    FramePending,
    /// Reading the viewer pose.
    PoseSampling,
    /// Submitting the draw.
    Rendering,
}

/// The result of processing one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The scene was drawn.
    Rendered(RenderStats),
    /// No viewer pose was available; nothing was drawn and the camera was left as is.
    Skipped,
    /// The renderer reported an error. The loop carries on.
    RenderFailed(RenderError),
    /// The scheduler is not active.
    Inactive,
}

/// Counters accumulated over the lifetime of a scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames drawn successfully.
    pub frames_rendered: u64,
    /// Frames skipped for lack of a pose.
    pub frames_skipped: u64,
    /// Frames whose render failed.
    pub frames_failed: u64,
    /// Select events that advanced the carousel.
    pub selects_handled: u64,
}
