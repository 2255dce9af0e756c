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

//! Keeps the scene graph's panels in sync with the current carousel batch.
//!
//! The [`SceneObjectManager`] lays a batch out on a ring, attaches one panel per
//! image, issues the texture loads and binds each texture when its load comes
//! back. A generation counter, bumped by every clear, lets it drop loads that
//! finish after their batch was replaced.

mod agent;

pub use agent::*;
