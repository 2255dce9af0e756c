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

use super::ImageRef;
use std::fmt;

/// An error raised while turning an [`ImageRef`] into a texture.
///
/// These errors are recoverable and scoped to a single panel: the panel whose
/// load failed is removed from the scene, its siblings are unaffected.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageLoadError {
    /// The requested target size had a zero dimension.
    InvalidTarget {
        /// The requested width.
        width: u32,
        /// The requested height.
        height: u32,
    },
    /// The image bytes could not be fetched (missing file, network failure, bad URI).
    Fetch {
        /// The image that failed.
        image: ImageRef,
        /// Human-readable cause.
        reason: String,
    },
    /// The bytes were fetched but are not a decodable image.
    Decode {
        /// The image that failed.
        image: ImageRef,
        /// Human-readable cause.
        reason: String,
    },
    /// The renderer refused the decoded pixels.
    Upload {
        /// The image that failed.
        image: ImageRef,
        /// Human-readable cause.
        reason: String,
    },
    /// Fetching or decoding panicked on the worker. The worker survives.
    Panicked {
        /// The image that failed.
        image: ImageRef,
        /// The panic message, if it was a string.
        reason: String,
    },
    /// The loader shut down before the request was served.
    Disconnected,
}

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageLoadError::InvalidTarget { width, height } => {
                write!(f, "Invalid texture target size {width}x{height}")
            }
            ImageLoadError::Fetch { image, reason } => {
                write!(f, "Failed to fetch image '{image}': {reason}")
            }
            ImageLoadError::Decode { image, reason } => {
                write!(f, "Failed to decode image '{image}': {reason}")
            }
            ImageLoadError::Upload { image, reason } => {
                write!(f, "Failed to upload texture for '{image}': {reason}")
            }
            ImageLoadError::Panicked { image, reason } => {
                write!(f, "Loading image '{image}' panicked: {reason}")
            }
            ImageLoadError::Disconnected => {
                write!(f, "The texture loader shut down before the load completed")
            }
        }
    }
}

impl std::error::Error for ImageLoadError {}
