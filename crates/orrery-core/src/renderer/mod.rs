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

//! The rendering capability consumed by the gallery.
//!
//! The gallery never talks to a graphics API directly. It drives an opaque
//! [`GalleryRenderer`] that owns the scene graph, the GPU textures and the output
//! surface; concrete backends live in `orrery-infra`.

pub mod camera;
pub mod error;
pub mod panel;
pub mod traits;

pub use camera::*;
pub use error::*;
pub use panel::*;
pub use traits::*;
