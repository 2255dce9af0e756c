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

use orrery_core::asset::ImageRef;
use orrery_core::renderer::{NodeId, PanelTransform, TextureHandle};

/// A panel showing one gallery image.
///
/// The panel owns its texture: the handle is never shared and is released
/// together with the panel.
#[derive(Debug)]
pub struct TexturedPanel {
    /// The image this panel shows.
    pub source_image: ImageRef,
    /// The bound texture. `None` while the image is still loading.
    pub texture: Option<TextureHandle>,
    /// The ring slot, in `[0, batch_size)`.
    pub placement_index: usize,
    /// World placement derived from the slot.
    pub transform: PanelTransform,
    /// The renderer node.
    pub node: NodeId,
}

impl TexturedPanel {
    /// Creates a panel still waiting for its texture.
    pub fn placeholder(
        source_image: ImageRef,
        placement_index: usize,
        transform: PanelTransform,
        node: NodeId,
    ) -> Self {
        Self {
            source_image,
            texture: None,
            placement_index,
            transform,
            node,
        }
    }

    /// Returns `true` once a texture is bound.
    pub fn is_textured(&self) -> bool {
        self.texture.is_some()
    }
}
