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

use image::{Rgba, RgbaImage};
use orrery_core::asset::ImageLoadError;
use orrery_infra::{HeadlessRenderer, SimulatedXrRuntime};
use orrery_sdk::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

fn photo_dir(count: usize) -> anyhow::Result<tempfile::TempDir> {
    let dir = tempdir()?;
    for i in 0..count {
        RgbaImage::from_pixel(8, 8, Rgba([i as u8 * 20, 100, 50, 255]))
            .save(dir.path().join(format!("photo-{i:02}.png")))?;
    }
    Ok(dir)
}

#[test]
fn gallery_runs_from_a_config_file() -> anyhow::Result<()> {
    let photos = photo_dir(5)?;
    let config_path = photos.path().join("gallery.toml");
    std::fs::write(
        &config_path,
        "[gallery]\nbatch_size = 3\n\n[texture]\nwidth = 32\nheight = 32\nworkers = 2\n",
    )?;

    let config = load_config(&config_path)?;
    let images = scan_directory(photos.path())?;
    assert_eq!(images.len(), 5);

    let (mut gallery, renderer, _xr) = Gallery::simulated(config, images, photos.path())?;
    gallery.start()?;
    assert!(gallery.wait_for_textures(Duration::from_secs(10)));
    let stats = gallery.run_frames(4)?;
    assert_eq!(stats.frames_rendered, 4);
    assert_eq!(renderer.attached().len(), 3);
    assert_eq!(renderer.last_stats().map(|s| s.textured_panels), Some(3));

    gallery.select();
    gallery.run_frames(1)?;
    assert_eq!(gallery.stats().selects_handled, 1);
    let labels: Vec<_> = gallery
        .scheduler()
        .scene()
        .live()
        .iter()
        .map(|p| p.source_image.as_str().to_string())
        .collect();
    assert!(labels.contains(&"photo-03.png".to_string()));
    assert!(labels.contains(&"photo-00.png".to_string()));

    gallery.stop();
    assert_eq!(gallery.state(), SchedulerState::Ended);
    assert!(gallery.run_frames(1).is_err());
    Ok(())
}

#[test]
fn run_frames_stops_when_the_session_ends() -> anyhow::Result<()> {
    let photos = photo_dir(2)?;
    let images = scan_directory(photos.path())?;
    let (mut gallery, _renderer, xr) =
        Gallery::simulated(GalleryConfig::default(), images, photos.path())?;
    gallery.start()?;
    gallery.run_frames(2)?;

    xr.end_session();
    let stats = gallery.run_frames(100)?;
    assert_eq!(stats.frames_rendered, 2);
    assert_eq!(gallery.state(), SchedulerState::Ended);
    Ok(())
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let mut config = GalleryConfig::default();
    config.layout.radius = -1.0;
    assert!(Gallery::simulated(config, Vec::new(), ".").is_err());
}

struct SlowSource(Duration);

impl ImageSource for SlowSource {
    fn fetch(&self, image: &ImageRef) -> Result<Vec<u8>, ImageLoadError> {
        std::thread::sleep(self.0);
        Err(ImageLoadError::Fetch {
            image: image.clone(),
            reason: "too slow".to_string(),
        })
    }
}

#[test]
fn texture_wait_reports_a_timeout() -> anyhow::Result<()> {
    let images = vec![ImageRef::new("a.png"), ImageRef::new("b.png")];
    let mut gallery = Gallery::new(
        GalleryConfig::default(),
        images,
        Arc::new(SlowSource(Duration::from_millis(500))),
        Box::new(HeadlessRenderer::new()),
        Box::new(SimulatedXrRuntime::new()),
    )?;
    gallery.start()?;

    assert!(!gallery.wait_for_textures(Duration::from_millis(10)));
    assert!(gallery.wait_for_textures(Duration::from_secs(10)));
    Ok(())
}
