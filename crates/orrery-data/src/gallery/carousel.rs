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
use orrery_core::config::CarouselPolicy;

/// The ordered image list and the cursor into it.
///
/// The list is fixed at construction and its order is the display order.
/// [`advance`](Self::advance) is the only method that moves the cursor.
#[derive(Debug, Clone)]
pub struct CarouselState {
    images: Vec<ImageRef>,
    cursor: usize,
    batch_size: usize,
    policy: CarouselPolicy,
}

impl CarouselState {
    /// Creates a carousel positioned at the first image.
    ///
    /// `batch_size` is clamped to `[1, images.len()]`; for an empty list it is 0.
    pub fn new(images: Vec<ImageRef>, batch_size: usize, policy: CarouselPolicy) -> Self {
        let clamped = batch_size.max(1).min(images.len());
        if clamped != batch_size {
            log::debug!(
                "Carousel batch size {batch_size} clamped to {clamped} for {} images.",
                images.len()
            );
        }
        Self {
            images,
            cursor: 0,
            batch_size: clamped,
            policy,
        }
    }

    /// Returns the next batch and moves the cursor past it.
    ///
    /// With [`CarouselPolicy::Wrapping`] the batch always holds `batch_size`
    /// images, continuing from the start of the list when it runs past the end.
    /// With [`CarouselPolicy::Truncating`] the batch stops at the end of the list,
    /// so the last batches may be short and, once the list is exhausted, empty.
    pub fn advance(&mut self) -> Vec<ImageRef> {
        let len = self.images.len();
        if len == 0 {
            return Vec::new();
        }

        let batch = match self.policy {
            CarouselPolicy::Wrapping => {
                let batch = (0..self.batch_size)
                    .map(|offset| self.images[(self.cursor + offset) % len].clone())
                    .collect();
                self.cursor = (self.cursor + self.batch_size) % len;
                batch
            }
            CarouselPolicy::Truncating => {
                let start = self.cursor.min(len);
                let end = (start + self.batch_size).min(len);
                self.cursor = end;
                self.images[start..end].to_vec()
            }
        };
        log::debug!(
            "Carousel advanced: {} images, cursor now {}.",
            batch.len(),
            self.cursor
        );
        batch
    }

    /// Index of the first image of the next batch.
    ///
    /// Under the truncating policy this equals [`len`](Self::len) once the list is exhausted.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The effective batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The batch selection policy.
    pub fn policy(&self) -> CarouselPolicy {
        self.policy
    }

    /// Number of images in the list.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns `true` if the list holds no image.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The full image list, in display order.
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }
}
