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

//! # Orrery Agents
//!
//! The orchestrators of the gallery. The [`scene_agent`] keeps the rendered
//! panels in sync with the carousel; the [`frame_agent`] owns the XR session
//! and drives one pose-synchronized render per display refresh.

#![warn(missing_docs)]

pub mod frame_agent;
pub mod scene_agent;

pub use frame_agent::{ArFrameScheduler, FrameOutcome, FramePhase, FrameStats, SchedulerState};
pub use scene_agent::{PollReport, SceneObjectManager, SceneSettings};
