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

#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use orrery_agents::{ArFrameScheduler, SceneObjectManager, SceneSettings};
use orrery_core::asset::ImageRef;
use orrery_core::config::{CarouselPolicy, GalleryConfig};
use orrery_data::gallery::CarouselState;
use orrery_infra::{
    HeadlessProbe, HeadlessRenderer, SimulatedXrController, SimulatedXrRuntime, UriImageSource,
};
use orrery_lanes::TextureLoader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Writes a small PNG per name; names containing "broken" get garbage bytes instead.
pub fn write_images(dir: &Path, names: &[&str]) -> anyhow::Result<Vec<ImageRef>> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| -> anyhow::Result<ImageRef> {
            let path = dir.join(name);
            if name.contains("broken") {
                std::fs::write(&path, b"not an image")?;
            } else {
                RgbaImage::from_pixel(6, 4, Rgba([(i * 40) as u8, 0, 200, 255])).save(&path)?;
            }
            Ok(ImageRef::new(*name))
        })
        .collect()
}

pub fn test_config(batch_size: usize, policy: CarouselPolicy) -> GalleryConfig {
    let mut config = GalleryConfig::default();
    config.gallery.batch_size = batch_size;
    config.gallery.policy = policy;
    config.texture.width = 16;
    config.texture.height = 16;
    config.texture.workers = 2;
    config
}

pub fn scene_manager(dir: &Path, config: &GalleryConfig) -> SceneObjectManager {
    let loader = TextureLoader::new(
        Arc::new(UriImageSource::new(dir)),
        config.texture.workers,
    );
    SceneObjectManager::new(loader, SceneSettings::from_config(config))
}

pub struct Rig {
    pub scheduler: ArFrameScheduler,
    pub renderer: HeadlessProbe,
    pub xr: SimulatedXrController,
}

pub fn rig(dir: &Path, images: Vec<ImageRef>, config: &GalleryConfig) -> Rig {
    let renderer = HeadlessRenderer::new();
    let runtime = SimulatedXrRuntime::new();
    let probe = renderer.probe();
    let xr = runtime.controller();
    let carousel = CarouselState::new(images, config.gallery.batch_size, config.gallery.policy);
    let scheduler = ArFrameScheduler::new(
        Box::new(renderer),
        Box::new(runtime),
        carousel,
        scene_manager(dir, config),
    );
    Rig {
        scheduler,
        renderer: probe,
        xr,
    }
}

/// Angle of a point on the horizontal plane, in degrees within `[0, 360)`.
pub fn ring_angle(x: f32, z: f32) -> f32 {
    z.atan2(x).to_degrees().rem_euclid(360.0)
}
