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

//! Defines the error type for the rendering capability.

use super::NodeId;
use std::fmt;

/// An error reported by a [`GalleryRenderer`](super::GalleryRenderer).
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// An operation was attempted before the output surface was acquired.
    NotInitialized,
    /// The output surface or rendering context could not be acquired.
    SurfaceAcquisitionFailed(String),
    /// The node does not exist (never created, or already destroyed).
    InvalidNode(NodeId),
    /// The texture handle does not refer to a live texture.
    InvalidTexture(u64),
    /// The pixel payload does not match its declared size or format.
    InvalidTextureData(String),
    /// A rendering operation failed.
    RenderingFailed(String),
    /// The graphics device was lost and must be re-created.
    DeviceLost,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NotInitialized => {
                write!(f, "The renderer has no output surface yet.")
            }
            RenderError::SurfaceAcquisitionFailed(msg) => {
                write!(f, "Failed to acquire output surface: {msg}")
            }
            RenderError::InvalidNode(node) => write!(f, "Unknown scene node {node:?}"),
            RenderError::InvalidTexture(id) => write!(f, "Unknown texture handle #{id}"),
            RenderError::InvalidTextureData(msg) => {
                write!(f, "Texture data rejected: {msg}")
            }
            RenderError::RenderingFailed(msg) => {
                write!(f, "A rendering operation failed: {msg}")
            }
            RenderError::DeviceLost => write!(
                f,
                "The graphics device was lost and needs to be reinitialized."
            ),
        }
    }
}

impl std::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_display() {
        assert_eq!(
            RenderError::InvalidNode(NodeId(7)).to_string(),
            "Unknown scene node NodeId(7)"
        );
        assert_eq!(
            RenderError::SurfaceAcquisitionFailed("no adapter".into()).to_string(),
            "Failed to acquire output surface: no adapter"
        );
    }
}
