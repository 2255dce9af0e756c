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

//! Describes the box-shaped panels the gallery places in the scene.

use crate::math::{Mat4, Quaternion, Vec3};

/// Identifies a node in the renderer's scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Identifies the framebuffer of the XR session's output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferId(pub u32);

/// An owning handle to a GPU-resident texture.
///
/// The handle is deliberately neither `Clone` nor `Copy`: exactly one panel owns
/// each texture, and the texture is released by moving the handle back into
/// [`GalleryRenderer::destroy_texture`](super::GalleryRenderer::destroy_texture).
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(u64);

impl TextureHandle {
    /// Wraps a backend-specific texture id. Only renderers should call this.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The backend-specific texture id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A linear RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Opaque white, the colour of untextured panel faces.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Creates an opaque colour.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// How texture coordinates outside `[0, 1]` are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressMode {
    /// Coordinates are clamped to the edge.
    ClampToEdge,
    /// Coordinates wrap around.
    Repeat,
    /// Coordinates wrap around, mirroring at each integer boundary.
    MirrorRepeat,
}

/// The material of one face of a panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaceMaterial {
    /// A flat colour; never receives a texture.
    Solid(Color),
    /// Shows the panel's texture once one is bound, `placeholder` until then.
    Textured {
        /// Colour drawn while no texture is bound.
        placeholder: Color,
        /// Wrapping applied when sampling the texture.
        address_mode: AddressMode,
    },
}

/// Face order of a panel box: `+X, -X, +Y, -Y, +Z, -Z`.
pub const PANEL_FACE_COUNT: usize = 6;

/// The default per-face materials: four neutral sides, image on front and back.
pub const DEFAULT_PANEL_FACES: [FaceMaterial; PANEL_FACE_COUNT] = {
    const SIDE: FaceMaterial = FaceMaterial::Solid(Color::WHITE);
    const IMAGE: FaceMaterial = FaceMaterial::Textured {
        placeholder: Color::WHITE,
        address_mode: AddressMode::MirrorRepeat,
    };
    [SIDE, SIDE, SIDE, SIDE, IMAGE, IMAGE]
};

/// The placement of a panel in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelTransform {
    /// World-space position of the panel centre.
    pub position: Vec3,
    /// World-space orientation.
    pub rotation: Quaternion,
}

impl PanelTransform {
    /// The direction the panel's front (`+Z`) face points to.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// The model matrix of the panel.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

/// Everything a renderer needs to create a panel node.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelDescriptor {
    /// A debug label for the node.
    pub label: Option<String>,
    /// Box extents: width (x), height (y), depth (z).
    pub size: Vec3,
    /// World placement.
    pub transform: PanelTransform,
    /// Per-face materials, in `+X, -X, +Y, -Y, +Z, -Z` order.
    pub faces: [FaceMaterial; PANEL_FACE_COUNT],
}

impl PanelDescriptor {
    /// Number of faces that will show the bound texture.
    pub fn textured_face_count(&self) -> usize {
        self.faces
            .iter()
            .filter(|f| matches!(f, FaceMaterial::Textured { .. }))
            .count()
    }
}
