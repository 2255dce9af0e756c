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

//! # Orrery SDK
//!
//! The public entry point of the AR image gallery. A [`Gallery`] wires a
//! configuration, an image list and an image source to a renderer and an XR
//! runtime, then runs the frame loop.
//!
//! ```no_run
//! use orrery_sdk::{config, sources, Gallery};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = config::load_config("gallery.toml")?;
//! let images = sources::scan_directory("photos")?;
//! let (mut gallery, _renderer, _xr) = Gallery::simulated(config, images, "photos")?;
//! gallery.start()?;
//! gallery.run_frames(120)?;
//! gallery.stop();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod sources;

use anyhow::{Context, Result};
use orrery_agents::{ArFrameScheduler, FrameOutcome, FrameStats, SceneObjectManager, SceneSettings};
use orrery_core::asset::{ImageRef, ImageSource};
use orrery_core::config::GalleryConfig;
use orrery_core::renderer::GalleryRenderer;
use orrery_core::xr::{XrInputEvent, XrRuntime};
use orrery_data::gallery::CarouselState;
use orrery_infra::{
    HeadlessProbe, HeadlessRenderer, SimulatedXrController, SimulatedXrRuntime, UriImageSource,
};
use orrery_lanes::TextureLoader;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub use orrery_agents::SchedulerState;

/// Commonly used types.
pub mod prelude {
    pub use crate::{config::load_config, sources::scan_directory, Gallery};
    pub use orrery_agents::{FrameOutcome, FrameStats, SchedulerState};
    pub use orrery_core::asset::{ImageRef, ImageSource};
    pub use orrery_core::config::{CarouselPolicy, GalleryConfig};
}

/// How long [`Gallery::run_frames`] sleeps when no frame is due yet.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// A running AR image gallery.
#[derive(Debug)]
pub struct Gallery {
    scheduler: ArFrameScheduler,
    config: GalleryConfig,
}

impl Gallery {
    /// Assembles a gallery from its parts. The configuration is validated first.
    pub fn new(
        config: GalleryConfig,
        images: Vec<ImageRef>,
        source: Arc<dyn ImageSource>,
        renderer: Box<dyn GalleryRenderer>,
        runtime: Box<dyn XrRuntime>,
    ) -> Result<Self> {
        config.validate().context("Invalid gallery configuration")?;

        let carousel = CarouselState::new(images, config.gallery.batch_size, config.gallery.policy);
        let loader = TextureLoader::new(source, config.texture.workers);
        let scene = SceneObjectManager::new(loader, SceneSettings::from_config(&config));
        log::info!(
            "Gallery assembled: {} images, batch of {}, {:?} policy.",
            carousel.len(),
            carousel.batch_size(),
            carousel.policy()
        );

        Ok(Self {
            scheduler: ArFrameScheduler::new(renderer, runtime, carousel, scene),
            config,
        })
    }

    /// Assembles a gallery on the headless renderer and the simulated XR runtime,
    /// reading images relative to `root`.
    ///
    /// Also returns the handles that observe the renderer and script the runtime.
    pub fn simulated(
        config: GalleryConfig,
        images: Vec<ImageRef>,
        root: impl Into<PathBuf>,
    ) -> Result<(Self, HeadlessProbe, SimulatedXrController)> {
        let renderer = HeadlessRenderer::new();
        let runtime = SimulatedXrRuntime::new();
        let probe = renderer.probe();
        let controller = runtime.controller();
        let gallery = Self::new(
            config,
            images,
            Arc::new(UriImageSource::new(root)),
            Box::new(renderer),
            Box::new(runtime),
        )?;
        Ok((gallery, probe, controller))
    }

    /// Requests the AR session and places the first batch.
    pub fn start(&mut self) -> Result<()> {
        self.scheduler
            .activate()
            .context("Failed to start the AR session")
    }

    /// Processes the next frame if one is due.
    pub fn pump(&mut self) -> Option<FrameOutcome> {
        self.scheduler.pump()
    }

    /// Processes `frames` frames, or fewer if the session ends first.
    pub fn run_frames(&mut self, frames: u64) -> Result<FrameStats> {
        if self.scheduler.state() != SchedulerState::Active {
            anyhow::bail!("The gallery is not running (state {:?})", self.scheduler.state());
        }
        let mut processed = 0;
        while processed < frames {
            match self.scheduler.pump() {
                Some(_) => processed += 1,
                None if self.scheduler.state() == SchedulerState::Active => {
                    std::thread::sleep(IDLE_POLL_INTERVAL)
                }
                None => {
                    log::info!("Session ended after {processed} of {frames} frames.");
                    break;
                }
            }
        }
        Ok(self.scheduler.stats())
    }

    /// Advances the carousel on the next frame, as a select gesture would.
    pub fn select(&self) {
        // The scheduler owns the receiver, so this cannot fail while `self` is alive.
        let _ = self.scheduler.input_sender().send(XrInputEvent::Select);
    }

    /// Blocks until the textures of the current batch have been decoded, or `timeout` elapses.
    ///
    /// They are bound on the next frame. Returns `false` on timeout, with the
    /// remaining loads still in flight.
    pub fn wait_for_textures(&mut self, timeout: Duration) -> bool {
        let settled = self.scheduler.wait_for_loads(timeout);
        if !settled {
            log::warn!(
                "{} texture loads still pending after {timeout:?}.",
                self.scheduler.scene().pending_loads()
            );
        }
        settled
    }

    /// Ends the session and releases the scene.
    pub fn stop(&mut self) {
        self.scheduler.end();
    }

    /// Lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Frame counters.
    pub fn stats(&self) -> FrameStats {
        self.scheduler.stats()
    }

    /// The validated configuration.
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// The underlying scheduler.
    pub fn scheduler(&self) -> &ArFrameScheduler {
        &self.scheduler
    }
}
