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

//! A renderer that keeps the scene graph in memory and draws nothing.
//!
//! It validates every call the way a GPU backend would (unknown nodes, dead
//! textures, rendering before the surface exists) and records what it was
//! asked to do, which makes it the reference backend for tests and for the
//! sandbox.

mod renderer;
mod scene;

pub use renderer::*;
pub use scene::{FrameCall, PanelSnapshot};
