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

use orrery_core::asset::{CpuTexture, ImageLoadError, ImageRef};

/// Identifies which batch and which slot a load was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    /// The scene generation that was current when the load was issued.
    pub generation: u64,
    /// The ring slot the texture is destined for.
    pub placement_index: usize,
}

/// A receipt for an issued load. The result arrives later as a [`LoadCompletion`]
/// carrying the same ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureTask {
    /// Monotonic id of the load, unique per loader.
    pub id: u64,
    /// The ticket the completion will carry.
    pub ticket: LoadTicket,
    /// The image being loaded.
    pub image: ImageRef,
}

/// The outcome of one load, delivered to the frame thread.
#[derive(Debug)]
pub struct LoadCompletion {
    /// Id of the originating [`TextureTask`].
    pub task_id: u64,
    /// The ticket given to [`TextureLoader::load`](super::TextureLoader::load).
    pub ticket: LoadTicket,
    /// The requested image.
    pub image: ImageRef,
    /// Decoded pixels, or why there are none.
    pub result: Result<CpuTexture, ImageLoadError>,
}
