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

// Orrery sandbox
// Drives the gallery on the headless renderer with a simulated AR session.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use orrery_sdk::prelude::*;

const TEXTURE_WARMUP: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Wrapping,
    Truncating,
}

impl From<Policy> for CarouselPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Wrapping => CarouselPolicy::Wrapping,
            Policy::Truncating => CarouselPolicy::Truncating,
        }
    }
}

/// Rotating AR image gallery, run headless.
#[derive(Parser, Debug)]
#[command(name = "sandbox", version, about)]
struct Args {
    /// Directory containing the gallery images.
    #[arg(value_name = "DIR")]
    images: PathBuf,

    /// Gallery configuration file. Defaults apply when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Overrides the configured batch size.
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Overrides the configured carousel policy.
    #[arg(short, long, value_enum)]
    policy: Option<Policy>,

    /// Number of frames to run.
    #[arg(short, long, default_value_t = 300)]
    frames: u64,

    /// Simulate a select gesture every N frames (0 disables).
    #[arg(long, default_value_t = 90, value_name = "N")]
    select_every: u64,
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GalleryConfig::default(),
    };
    if let Some(batch_size) = args.batch_size {
        config.gallery.batch_size = batch_size;
    }
    if let Some(policy) = args.policy {
        config.gallery.policy = policy.into();
    }

    let images = scan_directory(&args.images)
        .with_context(|| format!("Failed to list images in {}", args.images.display()))?;
    if images.is_empty() {
        log::warn!("No images found in {}.", args.images.display());
    }

    let (mut gallery, renderer, xr) = Gallery::simulated(config, images, &args.images)?;
    xr.select_every((args.select_every > 0).then_some(args.select_every));

    gallery.start()?;
    if !gallery.wait_for_textures(TEXTURE_WARMUP) {
        log::warn!("Starting before every texture was decoded; placeholders will show.");
    }
    let stats = gallery.run_frames(args.frames)?;
    gallery.stop();

    log::info!(
        "Rendered {} frames ({} skipped, {} failed), {} selects handled.",
        stats.frames_rendered,
        stats.frames_skipped,
        stats.frames_failed,
        stats.selects_handled
    );
    if let Some(last) = renderer.last_stats() {
        log::info!(
            "Last frame: {} panels drawn, {} textured, {} in view.",
            last.panels_drawn,
            last.textured_panels,
            last.panels_in_view
        );
    }
    Ok(())
}
