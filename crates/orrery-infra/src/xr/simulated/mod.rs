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

//! A scripted XR runtime for tests, demos and machines without an XR device.
//!
//! [`SimulatedXrRuntime`] grants sessions that deliver one frame per
//! requested animation frame. Poses, tracking loss, select input and
//! runtime-initiated session end are driven from a [`SimulatedXrController`].

mod controller;
mod runtime;
mod state;

pub use controller::SimulatedXrController;
pub use runtime::{SimulatedFrame, SimulatedXrRuntime, SimulatedXrSession};
pub use state::standing_pose;
