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

use super::TexturedPanel;
use orrery_core::renderer::NodeId;

/// The panels currently attached to the render graph, keyed by slot.
#[derive(Debug, Default)]
pub struct LiveSceneSet {
    panels: Vec<TexturedPanel>,
}

impl LiveSceneSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a panel, replacing and returning any panel already in its slot.
    pub fn insert(&mut self, panel: TexturedPanel) -> Option<TexturedPanel> {
        let previous = self.remove(panel.placement_index);
        self.panels.push(panel);
        previous
    }

    /// The panel in `placement_index`, if any.
    pub fn get(&self, placement_index: usize) -> Option<&TexturedPanel> {
        self.panels
            .iter()
            .find(|p| p.placement_index == placement_index)
    }

    /// Mutable access to the panel in `placement_index`.
    pub fn get_mut(&mut self, placement_index: usize) -> Option<&mut TexturedPanel> {
        self.panels
            .iter_mut()
            .find(|p| p.placement_index == placement_index)
    }

    /// Removes the panel in `placement_index`.
    pub fn remove(&mut self, placement_index: usize) -> Option<TexturedPanel> {
        let pos = self
            .panels
            .iter()
            .position(|p| p.placement_index == placement_index)?;
        Some(self.panels.swap_remove(pos))
    }

    /// Empties the set, returning every panel.
    pub fn take_all(&mut self) -> Vec<TexturedPanel> {
        std::mem::take(&mut self.panels)
    }

    /// Iterates over the panels in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TexturedPanel> {
        self.panels.iter()
    }

    /// The renderer nodes of every panel.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.panels.iter().map(|p| p.node).collect()
    }

    /// Number of panels.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns `true` if no panel is live.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Number of panels with a bound texture.
    pub fn textured_count(&self) -> usize {
        self.panels.iter().filter(|p| p.is_textured()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::asset::ImageRef;
    use orrery_core::renderer::{PanelTransform, TextureHandle};

    fn panel(slot: usize, node: u64) -> TexturedPanel {
        TexturedPanel::placeholder(
            ImageRef::new(format!("img-{slot}")),
            slot,
            PanelTransform::default(),
            NodeId(node),
        )
    }

    #[test]
    fn insert_replaces_panel_in_same_slot() {
        let mut set = LiveSceneSet::new();
        assert!(set.insert(panel(0, 1)).is_none());
        assert!(set.insert(panel(1, 2)).is_none());
        let replaced = set.insert(panel(0, 3)).expect("slot 0 was occupied");
        assert_eq!(replaced.node, NodeId(1));
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).map(|p| p.node), Some(NodeId(3)));
    }

    #[test]
    fn textured_count_tracks_bound_textures() {
        let mut set = LiveSceneSet::new();
        set.insert(panel(0, 1));
        set.insert(panel(1, 2));
        set.get_mut(1).expect("slot 1").texture = Some(TextureHandle::from_raw(9));
        assert_eq!(set.textured_count(), 1);
    }

    #[test]
    fn take_all_empties_the_set() {
        let mut set = LiveSceneSet::new();
        set.insert(panel(0, 1));
        set.insert(panel(1, 2));
        let mut nodes: Vec<_> = set.take_all().into_iter().map(|p| p.node).collect();
        nodes.sort();
        assert_eq!(nodes, vec![NodeId(1), NodeId(2)]);
        assert!(set.is_empty());
        assert!(set.remove(0).is_none());
    }
}
