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

use orrery_core::math::Vec4;
use orrery_core::renderer::{
    CameraState, FaceMaterial, FramebufferId, NodeId, PanelDescriptor, PanelTransform,
    RenderStats,
};
use std::collections::HashMap;

/// A frame-level call, in the order the renderer received it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCall {
    /// `bind_framebuffer`.
    BindFramebuffer(FramebufferId),
    /// `set_size`.
    SetSize(u32, u32),
    /// `render`, with the camera revision it was called with.
    Render {
        /// [`CameraState::revision`] at the time of the call.
        camera_revision: u64,
    },
}

/// A copy of one panel node's state.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSnapshot {
    /// The node.
    pub node: NodeId,
    /// The label given at creation.
    pub label: Option<String>,
    /// World placement.
    pub transform: PanelTransform,
    /// The bound texture id, if any.
    pub texture: Option<u64>,
    /// Whether the node is part of the rendered scene.
    pub attached: bool,
}

#[derive(Debug)]
pub(super) struct Node {
    pub desc: PanelDescriptor,
    pub texture: Option<u64>,
}

#[derive(Debug, Default)]
pub(super) struct HeadlessScene {
    pub surface_acquired: bool,
    pub surface_unavailable: bool,
    pub nodes: HashMap<NodeId, Node>,
    pub attached: Vec<NodeId>,
    pub textures: HashMap<u64, (u32, u32)>,
    pub next_node: u64,
    pub next_texture: u64,
    pub framebuffer: Option<FramebufferId>,
    pub size: (u32, u32),
    pub frames: u64,
    pub last_stats: Option<RenderStats>,
    pub journal: Vec<FrameCall>,
    pub failing_renders: u32,
    pub failing_uploads: u32,
}

impl HeadlessScene {
    pub fn snapshot(&self, node: NodeId) -> Option<PanelSnapshot> {
        self.nodes.get(&node).map(|n| PanelSnapshot {
            node,
            label: n.desc.label.clone(),
            transform: n.desc.transform,
            texture: n.texture,
            attached: self.attached.contains(&node),
        })
    }

    pub fn stats(&self, camera: &CameraState) -> RenderStats {
        let view_projection = camera.view_projection_matrix();
        let mut stats = RenderStats::default();
        for node in self.attached.iter().filter_map(|id| self.nodes.get(id)) {
            stats.panels_drawn += 1;
            let has_textured_faces = node
                .desc
                .faces
                .iter()
                .any(|f| matches!(f, FaceMaterial::Textured { .. }));
            if node.texture.is_some() {
                stats.textured_panels += 1;
            } else if has_textured_faces {
                stats.placeholder_panels += 1;
            }

            let clip = view_projection * Vec4::from_vec3(node.desc.transform.position, 1.0);
            if clip.w > 0.0 && clip.x.abs() <= clip.w && clip.y.abs() <= clip.w {
                stats.panels_in_view += 1;
            }
        }
        stats
    }
}
