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

//! Gallery configuration.
//!
//! Every section and key is optional when deserializing: missing values fall
//! back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the carousel picks the next batch once it reaches the end of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarouselPolicy {
    /// Batches wrap around to the start of the list; the carousel never runs dry.
    #[default]
    Wrapping,
    /// Batches stop at the end of the list; once exhausted, batches are empty.
    Truncating,
}

/// The top-level configuration of a gallery.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Carousel behaviour.
    pub gallery: CarouselSection,
    /// Ring geometry.
    pub layout: LayoutSection,
    /// Panel box size.
    pub panel: PanelSection,
    /// Texture decoding.
    pub texture: TextureSection,
}

/// `[gallery]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSection {
    /// Number of images shown at once.
    pub batch_size: usize,
    /// Batch selection policy.
    pub policy: CarouselPolicy,
}

impl Default for CarouselSection {
    fn default() -> Self {
        Self {
            batch_size: 10,
            policy: CarouselPolicy::Wrapping,
        }
    }
}

/// `[layout]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSection {
    /// Radius of the ring, in metres.
    pub radius: f32,
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self { radius: 1.5 }
    }
}

/// `[panel]` section. Extents are in metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSection {
    /// Extent along local X.
    pub width: f32,
    /// Extent along local Y.
    pub height: f32,
    /// Extent along local Z.
    pub depth: f32,
}

impl Default for PanelSection {
    fn default() -> Self {
        Self {
            width: 0.5,
            height: 0.5,
            depth: 0.01,
        }
    }
}

/// `[texture]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSection {
    /// Decoded texture width in texels.
    pub width: u32,
    /// Decoded texture height in texels.
    pub height: u32,
    /// Number of background decode workers.
    pub workers: usize,
}

impl Default for TextureSection {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            workers: 4,
        }
    }
}

/// A configuration value outside its allowed range.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Dotted path of the offending key, e.g. `layout.radius`.
    pub key: &'static str,
    /// What is wrong with it.
    pub reason: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid value for '{}': {}", self.key, self.reason)
    }
}

impl std::error::Error for ConfigValidationError {}

impl GalleryConfig {
    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigValidationError {
            ConfigValidationError {
                key,
                reason: reason.into(),
            }
        }

        if self.gallery.batch_size == 0 {
            return Err(invalid("gallery.batch_size", "must be at least 1"));
        }
        if self.layout.radius.is_nan() || self.layout.radius <= 0.0 {
            return Err(invalid(
                "layout.radius",
                format!("must be positive, got {}", self.layout.radius),
            ));
        }
        for (key, value) in [
            ("panel.width", self.panel.width),
            ("panel.height", self.panel.height),
            ("panel.depth", self.panel.depth),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(invalid(key, format!("must be positive, got {value}")));
            }
        }
        if self.texture.width == 0 {
            return Err(invalid("texture.width", "must be at least 1"));
        }
        if self.texture.height == 0 {
            return Err(invalid("texture.height", "must be at least 1"));
        }
        if self.texture.workers == 0 {
            return Err(invalid("texture.workers", "must be at least 1"));
        }
        Ok(())
    }
}
