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

use super::{CameraState, FramebufferId, NodeId, PanelDescriptor, RenderError, TextureHandle};
use crate::asset::CpuTexture;

/// Statistics about a single submitted frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Panels attached to the scene when the frame was drawn.
    pub panels_drawn: u32,
    /// Of those, panels with a bound texture.
    pub textured_panels: u32,
    /// Of those, panels still showing their placeholder faces.
    pub placeholder_panels: u32,
    /// Panels in front of the camera (inside the clip volume's depth range).
    pub panels_in_view: u32,
}

/// The renderer, scene-graph and mesh capability used by the gallery.
///
/// A renderer owns every node and texture it hands out. The gallery refers to
/// them only through [`NodeId`]s and owning [`TextureHandle`]s, and is
/// responsible for destroying what it created.
pub trait GalleryRenderer: std::fmt::Debug + Send {
    /// Acquires the output surface and rendering context.
    fn acquire_surface(&mut self) -> Result<(), RenderError>;

    /// Creates a detached panel node with placeholder faces.
    fn create_panel(&mut self, desc: &PanelDescriptor) -> Result<NodeId, RenderError>;

    /// Attaches a node to the rendered scene.
    fn attach(&mut self, node: NodeId) -> Result<(), RenderError>;

    /// Detaches a node from the rendered scene. Unknown nodes are ignored.
    fn detach(&mut self, node: NodeId);

    /// Destroys a node, detaching it first if needed.
    fn destroy_panel(&mut self, node: NodeId);

    /// Uploads decoded pixels into a new GPU texture.
    fn create_texture(&mut self, texture: &CpuTexture) -> Result<TextureHandle, RenderError>;

    /// Binds a texture to every textured face of a node.
    fn bind_texture(&mut self, node: NodeId, texture: &TextureHandle) -> Result<(), RenderError>;

    /// Releases a texture. The handle is consumed.
    fn destroy_texture(&mut self, texture: TextureHandle);

    /// Binds the framebuffer the next render writes to.
    fn bind_framebuffer(&mut self, framebuffer: FramebufferId);

    /// Resizes the drawing buffer.
    fn set_size(&mut self, width: u32, height: u32);

    /// Renders the attached scene with `camera`.
    fn render(&mut self, camera: &CameraState) -> Result<RenderStats, RenderError>;

    /// Number of nodes currently attached to the scene.
    fn attached_count(&self) -> usize;
}
