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

use orrery_core::asset::{ImageLoadError, ImageRef};
use orrery_core::config::GalleryConfig;
use orrery_core::math::Vec3;
use orrery_core::renderer::{
    GalleryRenderer, NodeId, PanelDescriptor, RenderError, DEFAULT_PANEL_FACES,
};
use orrery_data::layout::RingLayout;
use orrery_data::scene::{LiveSceneSet, TexturedPanel};
use orrery_lanes::{LoadCompletion, LoadTicket, TextureLoader};
use std::time::Duration;

/// Geometry and texture parameters of the placed panels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    /// Ring radius, in metres.
    pub radius: f32,
    /// Panel box extents, in metres.
    pub panel_size: Vec3,
    /// Decoded texture width.
    pub texture_width: u32,
    /// Decoded texture height.
    pub texture_height: u32,
}

impl SceneSettings {
    /// Extracts the scene-related values of a gallery configuration.
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self {
            radius: config.layout.radius,
            panel_size: Vec3::new(config.panel.width, config.panel.height, config.panel.depth),
            texture_width: config.texture.width,
            texture_height: config.texture.height,
        }
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self::from_config(&GalleryConfig::default())
    }
}

/// What one [`SceneObjectManager::poll`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Textures uploaded and bound to their panel.
    pub bound: usize,
    /// Panels removed because their load failed.
    pub failed: usize,
    /// Completions dropped because their batch was cleared.
    pub stale: usize,
}

/// Owns the live panels and their textures.
#[derive(Debug)]
pub struct SceneObjectManager {
    loader: TextureLoader,
    live: LiveSceneSet,
    generation: u64,
    settings: SceneSettings,
}

impl SceneObjectManager {
    /// Creates an empty scene that loads textures through `loader`.
    pub fn new(loader: TextureLoader, settings: SceneSettings) -> Self {
        Self {
            loader,
            live: LiveSceneSet::new(),
            generation: 0,
            settings,
        }
    }

    /// Lays `batch` out on a ring of `slots` positions, attaches a placeholder
    /// panel per image and issues one texture load per panel.
    ///
    /// `slots` is normally the carousel batch size, so a short batch keeps the
    /// spacing of a full one. Any panels still live are cleared first.
    /// Returns the number of panels attached.
    pub fn place(
        &mut self,
        batch: Vec<ImageRef>,
        slots: usize,
        renderer: &mut dyn GalleryRenderer,
    ) -> usize {
        if !self.live.is_empty() {
            self.clear(renderer);
        }
        let layout = RingLayout::new(self.settings.radius, slots.max(batch.len()));
        log::debug!(
            "Placing {} panels on {} slots (generation {}).",
            batch.len(),
            layout.slots(),
            self.generation
        );

        for (placement_index, image) in batch.into_iter().enumerate() {
            let transform = layout.slot(placement_index);
            let desc = PanelDescriptor {
                label: Some(format!("gallery-panel-{placement_index}")),
                size: self.settings.panel_size,
                transform,
                faces: DEFAULT_PANEL_FACES,
            };
            let node = match create_and_attach(renderer, &desc) {
                Ok(node) => node,
                Err(e) => {
                    log::warn!("Could not place panel {placement_index} for '{image}': {e}");
                    continue;
                }
            };

            let ticket = LoadTicket {
                generation: self.generation,
                placement_index,
            };
            self.loader.load(
                image.clone(),
                self.settings.texture_width,
                self.settings.texture_height,
                ticket,
            );
            self.live.insert(TexturedPanel::placeholder(
                image,
                placement_index,
                transform,
                node,
            ));
        }
        self.live.len()
    }

    /// Applies every texture load that completed since the last poll.
    ///
    /// Completions from an earlier generation are dropped without touching the
    /// renderer. A failed load removes its panel from the scene.
    pub fn poll(&mut self, renderer: &mut dyn GalleryRenderer) -> PollReport {
        let mut report = PollReport::default();
        for completion in self.loader.drain_completed() {
            if completion.ticket.generation != self.generation {
                log::warn!(
                    "Discarding stale texture for '{}' (generation {} != {}).",
                    completion.image,
                    completion.ticket.generation,
                    self.generation
                );
                report.stale += 1;
                continue;
            }
            match self.apply(completion, renderer) {
                Ok(true) => report.bound += 1,
                Ok(false) => {}
                Err(e) => {
                    log::warn!("Removing panel after failed load: {e}");
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Detaches and destroys every live panel and its texture, then starts a new generation.
    pub fn clear(&mut self, renderer: &mut dyn GalleryRenderer) {
        let panels = self.live.take_all();
        for panel in &panels {
            renderer.detach(panel.node);
        }
        let count = panels.len();
        for panel in panels {
            release(renderer, panel);
        }
        self.generation += 1;
        log::debug!(
            "Cleared {count} panels, now at generation {}.",
            self.generation
        );
    }

    /// Replaces the live batch with `batch`: a [`clear`](Self::clear) followed by a
    /// [`place`](Self::place).
    pub fn swap(
        &mut self,
        batch: Vec<ImageRef>,
        slots: usize,
        renderer: &mut dyn GalleryRenderer,
    ) -> usize {
        self.clear(renderer);
        self.place(batch, slots, renderer)
    }

    /// The live panels.
    pub fn live(&self) -> &LiveSceneSet {
        &self.live
    }

    /// The current generation. Bumped by every clear.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Texture loads issued but not yet applied or discarded.
    pub fn pending_loads(&self) -> usize {
        self.loader.in_flight()
    }

    /// Blocks until every issued load has finished on its worker, or `timeout` elapses.
    ///
    /// The results are applied by the next [`poll`](Self::poll).
    pub fn wait_for_loads(&mut self, timeout: Duration) -> bool {
        self.loader.wait_until_settled(timeout)
    }

    /// The geometry in use.
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Returns `Ok(true)` if a texture was bound, `Ok(false)` if the completion
    /// had no panel to go to, and `Err` if the panel was removed.
    fn apply(
        &mut self,
        completion: LoadCompletion,
        renderer: &mut dyn GalleryRenderer,
    ) -> Result<bool, ImageLoadError> {
        let LoadCompletion {
            ticket,
            image,
            result,
            ..
        } = completion;

        let Some(panel) = self.live.get_mut(ticket.placement_index) else {
            log::debug!("No panel left for '{image}' in slot {}.", ticket.placement_index);
            return Ok(false);
        };
        if panel.is_textured() {
            return Ok(false);
        }

        let bound = result.and_then(|texture| {
            let upload_error = |e: RenderError| ImageLoadError::Upload {
                image: image.clone(),
                reason: e.to_string(),
            };
            let handle = renderer.create_texture(&texture).map_err(upload_error)?;
            match renderer.bind_texture(panel.node, &handle) {
                Ok(()) => Ok(handle),
                Err(e) => {
                    renderer.destroy_texture(handle);
                    Err(upload_error(e))
                }
            }
        });

        match bound {
            Ok(handle) => {
                log::debug!("Bound texture {} to slot {}.", handle.id(), ticket.placement_index);
                panel.texture = Some(handle);
                Ok(true)
            }
            Err(e) => {
                if let Some(panel) = self.live.remove(ticket.placement_index) {
                    renderer.detach(panel.node);
                    release(renderer, panel);
                }
                Err(e)
            }
        }
    }
}

fn create_and_attach(
    renderer: &mut dyn GalleryRenderer,
    desc: &PanelDescriptor,
) -> Result<NodeId, RenderError> {
    let node = renderer.create_panel(desc)?;
    if let Err(e) = renderer.attach(node) {
        renderer.destroy_panel(node);
        return Err(e);
    }
    Ok(node)
}

fn release(renderer: &mut dyn GalleryRenderer, panel: TexturedPanel) {
    if let Some(texture) = panel.texture {
        renderer.destroy_texture(texture);
    }
    renderer.destroy_panel(panel.node);
}
