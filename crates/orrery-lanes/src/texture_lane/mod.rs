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

//! Turns [`ImageRef`](orrery_core::asset::ImageRef)s into decoded textures off the frame thread.
//!
//! [`TextureDecodeLane`] is the pure CPU step (bytes in, RGBA8 pixels out).
//! [`TextureLoader`] runs fetch and decode on a pool of worker threads and
//! hands the results back to the frame thread, which performs the GPU upload.

mod decode;
mod loader;
mod task;

pub use decode::{DecodeError, TextureDecodeLane};
pub use loader::TextureLoader;
pub use task::{LoadCompletion, LoadTicket, TextureTask};
