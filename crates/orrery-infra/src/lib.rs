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

//! # Orrery Infra
//!
//! Concrete implementations of the capabilities `orrery-core` defines:
//! a headless scene renderer, a simulated XR runtime and a URI-based image
//! source.

#![warn(missing_docs)]

pub mod graphics;
pub mod source;
pub mod xr;

pub use graphics::headless::{HeadlessProbe, HeadlessRenderer};
pub use source::{SourceError, UriImageSource};
pub use xr::simulated::{SimulatedXrController, SimulatedXrRuntime};
