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

use crate::math::Mat4;

/// A rectangle of the output framebuffer, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Left edge.
    pub x: i32,
    /// Bottom edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a new viewport.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Which eye (if any) a view is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    /// Monoscopic view, e.g. a handheld AR screen.
    None,
    /// Left eye of a stereo display.
    Left,
    /// Right eye of a stereo display.
    Right,
}

/// One view of a viewer pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XrView {
    /// The eye this view is for.
    pub eye: Eye,
    /// View-to-reference-space transform (the camera's world matrix).
    pub transform: Mat4,
    /// Projection matrix for this view.
    pub projection: Mat4,
}

/// The viewer's pose relative to a reference space, for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerPose {
    /// Viewer-to-reference-space transform.
    pub transform: Mat4,
    /// The views to render. Handheld AR has exactly one.
    pub views: Vec<XrView>,
    /// `true` when position is estimated rather than tracked.
    pub emulated_position: bool,
}

impl ViewerPose {
    /// The primary (first) view, if any.
    pub fn primary_view(&self) -> Option<&XrView> {
        self.views.first()
    }
}

/// Everything the camera needs from one frame's pose. Valid for that frame only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSample {
    /// Camera-to-world transform of the primary view.
    pub view_transform: Mat4,
    /// Projection of the primary view.
    pub projection_transform: Mat4,
    /// Where on the framebuffer the view is drawn.
    pub viewport: Viewport,
}

impl PoseSample {
    /// Builds a sample from a view and the viewport the session assigned to it.
    pub fn from_view(view: &XrView, viewport: Viewport) -> Self {
        Self {
            view_transform: view.transform,
            projection_transform: view.projection,
            viewport,
        }
    }
}
