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

use super::scene::{FrameCall, HeadlessScene, Node, PanelSnapshot};
use orrery_core::asset::CpuTexture;
use orrery_core::renderer::{
    CameraState, FramebufferId, GalleryRenderer, NodeId, PanelDescriptor, RenderError,
    RenderStats, TextureHandle,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An in-memory [`GalleryRenderer`].
///
/// Use [`probe`](Self::probe) before handing the renderer off to keep a view
/// of its state.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    scene: Arc<Mutex<HeadlessScene>>,
}

impl HeadlessRenderer {
    /// Creates a renderer with no surface yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle that observes (and can inject faults into) this renderer.
    pub fn probe(&self) -> HeadlessProbe {
        HeadlessProbe {
            scene: Arc::clone(&self.scene),
        }
    }

    fn scene(&self) -> MutexGuard<'_, HeadlessScene> {
        lock(&self.scene)
    }
}

fn lock(scene: &Mutex<HeadlessScene>) -> MutexGuard<'_, HeadlessScene> {
    scene.lock().unwrap_or_else(PoisonError::into_inner)
}

impl GalleryRenderer for HeadlessRenderer {
    fn acquire_surface(&mut self) -> Result<(), RenderError> {
        let mut scene = self.scene();
        if scene.surface_unavailable {
            return Err(RenderError::SurfaceAcquisitionFailed(
                "no output surface available".to_string(),
            ));
        }
        scene.surface_acquired = true;
        log::debug!("Headless surface acquired.");
        Ok(())
    }

    fn create_panel(&mut self, desc: &PanelDescriptor) -> Result<NodeId, RenderError> {
        let mut scene = self.scene();
        if !scene.surface_acquired {
            return Err(RenderError::NotInitialized);
        }
        scene.next_node += 1;
        let id = NodeId(scene.next_node);
        scene.nodes.insert(
            id,
            Node {
                desc: desc.clone(),
                texture: None,
            },
        );
        Ok(id)
    }

    fn attach(&mut self, node: NodeId) -> Result<(), RenderError> {
        let mut scene = self.scene();
        if !scene.nodes.contains_key(&node) {
            return Err(RenderError::InvalidNode(node));
        }
        if !scene.attached.contains(&node) {
            scene.attached.push(node);
        }
        Ok(())
    }

    fn detach(&mut self, node: NodeId) {
        self.scene().attached.retain(|n| *n != node);
    }

    fn destroy_panel(&mut self, node: NodeId) {
        let mut scene = self.scene();
        scene.attached.retain(|n| *n != node);
        scene.nodes.remove(&node);
    }

    fn create_texture(&mut self, texture: &CpuTexture) -> Result<TextureHandle, RenderError> {
        let mut scene = self.scene();
        if !scene.surface_acquired {
            return Err(RenderError::NotInitialized);
        }
        if scene.failing_uploads > 0 {
            scene.failing_uploads -= 1;
            return Err(RenderError::DeviceLost);
        }
        if !texture.is_consistent() {
            return Err(RenderError::InvalidTextureData(format!(
                "{} bytes for a {}x{} texture",
                texture.pixels.len(),
                texture.width,
                texture.height
            )));
        }
        scene.next_texture += 1;
        let id = scene.next_texture;
        scene.textures.insert(id, (texture.width, texture.height));
        Ok(TextureHandle::from_raw(id))
    }

    fn bind_texture(&mut self, node: NodeId, texture: &TextureHandle) -> Result<(), RenderError> {
        let mut scene = self.scene();
        if !scene.textures.contains_key(&texture.id()) {
            return Err(RenderError::InvalidTexture(texture.id()));
        }
        let node = scene
            .nodes
            .get_mut(&node)
            .ok_or(RenderError::InvalidNode(node))?;
        node.texture = Some(texture.id());
        Ok(())
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        let mut scene = self.scene();
        let id = texture.id();
        scene.textures.remove(&id);
        for node in scene.nodes.values_mut() {
            if node.texture == Some(id) {
                node.texture = None;
            }
        }
    }

    fn bind_framebuffer(&mut self, framebuffer: FramebufferId) {
        let mut scene = self.scene();
        scene.framebuffer = Some(framebuffer);
        scene.journal.push(FrameCall::BindFramebuffer(framebuffer));
    }

    fn set_size(&mut self, width: u32, height: u32) {
        let mut scene = self.scene();
        scene.size = (width, height);
        scene.journal.push(FrameCall::SetSize(width, height));
    }

    fn render(&mut self, camera: &CameraState) -> Result<RenderStats, RenderError> {
        let mut scene = self.scene();
        scene.journal.push(FrameCall::Render {
            camera_revision: camera.revision(),
        });
        if !scene.surface_acquired {
            return Err(RenderError::NotInitialized);
        }
        if scene.failing_renders > 0 {
            scene.failing_renders -= 1;
            return Err(RenderError::RenderingFailed("injected failure".to_string()));
        }
        let stats = scene.stats(camera);
        scene.frames += 1;
        scene.last_stats = Some(stats);
        Ok(stats)
    }

    fn attached_count(&self) -> usize {
        self.scene().attached.len()
    }
}

/// A shared view into a [`HeadlessRenderer`].
#[derive(Debug, Clone)]
pub struct HeadlessProbe {
    scene: Arc<Mutex<HeadlessScene>>,
}

impl HeadlessProbe {
    /// The attached panels, in attach order.
    pub fn attached(&self) -> Vec<PanelSnapshot> {
        let scene = lock(&self.scene);
        scene
            .attached
            .iter()
            .filter_map(|id| scene.snapshot(*id))
            .collect()
    }

    /// Number of nodes that exist, attached or not.
    pub fn node_count(&self) -> usize {
        lock(&self.scene).nodes.len()
    }

    /// Number of textures that have not been destroyed.
    pub fn live_textures(&self) -> usize {
        lock(&self.scene).textures.len()
    }

    /// Frames rendered successfully.
    pub fn frames(&self) -> u64 {
        lock(&self.scene).frames
    }

    /// Statistics of the last successful render.
    pub fn last_stats(&self) -> Option<RenderStats> {
        lock(&self.scene).last_stats
    }

    /// Every frame-level call so far.
    pub fn journal(&self) -> Vec<FrameCall> {
        lock(&self.scene).journal.clone()
    }

    /// The drawing buffer size.
    pub fn size(&self) -> (u32, u32) {
        lock(&self.scene).size
    }

    /// The last bound framebuffer.
    pub fn framebuffer(&self) -> Option<FramebufferId> {
        lock(&self.scene).framebuffer
    }

    /// Makes the next `count` renders fail.
    pub fn fail_renders(&self, count: u32) {
        lock(&self.scene).failing_renders = count;
    }

    /// Makes the next `count` texture uploads fail.
    pub fn fail_uploads(&self, count: u32) {
        lock(&self.scene).failing_uploads = count;
    }

    /// Controls whether [`GalleryRenderer::acquire_surface`] succeeds.
    pub fn set_surface_available(&self, available: bool) {
        lock(&self.scene).surface_unavailable = !available;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::asset::TextureFormat;
    use orrery_core::math::{Mat4, Quaternion, Vec3};
    use orrery_core::renderer::{PanelTransform, DEFAULT_PANEL_FACES};
    use orrery_core::xr::{PoseSample, Viewport};

    fn panel_at(position: Vec3) -> PanelDescriptor {
        PanelDescriptor {
            label: None,
            size: Vec3::new(0.5, 0.5, 0.01),
            transform: PanelTransform {
                position,
                rotation: Quaternion::IDENTITY,
            },
            faces: DEFAULT_PANEL_FACES,
        }
    }

    fn texture() -> CpuTexture {
        CpuTexture {
            pixels: vec![255; 2 * 2 * 4],
            width: 2,
            height: 2,
            format: TextureFormat::Rgba8UnormSrgb,
        }
    }

    #[test]
    fn nothing_works_before_the_surface() {
        let mut renderer = HeadlessRenderer::new();
        assert_eq!(
            renderer.create_panel(&panel_at(Vec3::ZERO)),
            Err(RenderError::NotInitialized)
        );
        assert_eq!(
            renderer.render(&CameraState::new()),
            Err(RenderError::NotInitialized)
        );
    }

    #[test]
    fn render_counts_textured_and_placeholder_panels() {
        let mut renderer = HeadlessRenderer::new();
        let probe = renderer.probe();
        renderer.acquire_surface().unwrap();

        let a = renderer.create_panel(&panel_at(Vec3::new(0.0, 0.0, -2.0))).unwrap();
        let b = renderer.create_panel(&panel_at(Vec3::new(0.0, 0.0, 2.0))).unwrap();
        renderer.attach(a).unwrap();
        renderer.attach(b).unwrap();
        let handle = renderer.create_texture(&texture()).unwrap();
        renderer.bind_texture(a, &handle).unwrap();

        let mut camera = CameraState::new();
        camera.apply_pose(&PoseSample {
            view_transform: Mat4::IDENTITY,
            projection_transform: Mat4::perspective_rh_gl(1.2, 1.0, 0.1, 100.0),
            viewport: Viewport::new(0, 0, 64, 64),
        });
        let stats = renderer.render(&camera).unwrap();
        assert_eq!(stats.panels_drawn, 2);
        assert_eq!(stats.textured_panels, 1);
        assert_eq!(stats.placeholder_panels, 1);
        assert_eq!(stats.panels_in_view, 1);
        assert_eq!(probe.frames(), 1);
    }

    #[test]
    fn destroyed_textures_cannot_be_bound() {
        let mut renderer = HeadlessRenderer::new();
        let probe = renderer.probe();
        renderer.acquire_surface().unwrap();
        let node = renderer.create_panel(&panel_at(Vec3::ZERO)).unwrap();
        let handle = renderer.create_texture(&texture()).unwrap();
        let id = handle.id();
        renderer.destroy_texture(handle);
        assert_eq!(probe.live_textures(), 0);
        assert_eq!(
            renderer.bind_texture(node, &TextureHandle::from_raw(id)),
            Err(RenderError::InvalidTexture(id))
        );
    }

    #[test]
    fn inconsistent_pixels_are_rejected() {
        let mut renderer = HeadlessRenderer::new();
        renderer.acquire_surface().unwrap();
        let mut bad = texture();
        bad.pixels.truncate(3);
        assert!(matches!(
            renderer.create_texture(&bad),
            Err(RenderError::InvalidTextureData(_))
        ));
    }

    #[test]
    fn destroy_detaches() {
        let mut renderer = HeadlessRenderer::new();
        let probe = renderer.probe();
        renderer.acquire_surface().unwrap();
        let node = renderer.create_panel(&panel_at(Vec3::ZERO)).unwrap();
        renderer.attach(node).unwrap();
        assert_eq!(renderer.attached_count(), 1);
        renderer.destroy_panel(node);
        assert_eq!(renderer.attached_count(), 0);
        assert_eq!(probe.node_count(), 0);
        assert_eq!(renderer.attach(node), Err(RenderError::InvalidNode(node)));
    }
}
