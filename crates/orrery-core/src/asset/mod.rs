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

//! Provides the primitive types shared by every stage of the image pipeline.
//!
//! This module knows nothing about *how* an image is fetched or decoded. It
//! defines the locator ([`ImageRef`]), the decoded CPU-side pixel payload
//! ([`CpuTexture`]), the fetch capability ([`ImageSource`]) and the per-image
//! failure type ([`ImageLoadError`]).

mod error;
mod image_ref;
mod texture;

pub use error::*;
pub use image_ref::*;
pub use texture::*;

/// A capability that resolves an [`ImageRef`] to the raw, still-encoded bytes of the image.
///
/// Implementations are called from background decode workers, never from the
/// frame thread, so they are free to block on I/O.
pub trait ImageSource: Send + Sync {
    /// Fetches the encoded bytes (PNG, JPEG, ...) for `image`.
    fn fetch(&self, image: &ImageRef) -> Result<Vec<u8>, ImageLoadError>;
}

impl<S: ImageSource + ?Sized> ImageSource for std::sync::Arc<S> {
    fn fetch(&self, image: &ImageRef) -> Result<Vec<u8>, ImageLoadError> {
        (**self).fetch(image)
    }
}
