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

//! The XR runtime capability: sessions, reference spaces, frames and poses.
//!
//! The shapes here follow the usual immersive-session model. A runtime grants a
//! session, the session hands out a reference space and calls back once per
//! display refresh with a frame, and a frame can be asked for the viewer pose
//! in a reference space. Callbacks are modelled as explicit polling
//! ([`XrSession::poll_frame`]) plus a channel for input events, so that the
//! host loop controls which thread runs the frame step.

mod error;
mod pose;
mod traits;

pub use error::*;
pub use pose::*;
pub use traits::*;

/// The kind of session to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionMode {
    /// Camera passthrough with virtual content composited on top.
    ImmersiveAr,
    /// Fully virtual environment.
    ImmersiveVr,
    /// Non-immersive, rendered into a regular surface.
    Inline,
}

/// A capability a session can be required to support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionFeature {
    /// Ray casts against real-world geometry.
    HitTest,
    /// Persistent world anchors.
    Anchors,
    /// A `local` reference space.
    Local,
    /// A `local-floor` reference space.
    LocalFloor,
}

impl SessionFeature {
    /// The runtime-facing feature descriptor.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionFeature::HitTest => "hit-test",
            SessionFeature::Anchors => "anchors",
            SessionFeature::Local => "local",
            SessionFeature::LocalFloor => "local-floor",
        }
    }
}

/// The type of coordinate system poses are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceSpaceType {
    /// Tracks the viewer itself.
    Viewer,
    /// Origin near the viewer's position when the session started.
    Local,
    /// Like `Local`, with the origin on the floor.
    LocalFloor,
}

/// A reference space granted by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceSpace {
    /// The kind of space.
    pub kind: ReferenceSpaceType,
    /// Runtime-specific identifier.
    pub id: u32,
}

/// Identifies a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(pub u64);

/// Input events a session forwards to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrInputEvent {
    /// The primary action started (screen touched, trigger pressed).
    SelectStart,
    /// The primary action ended.
    SelectEnd,
    /// A complete primary action.
    Select,
}
