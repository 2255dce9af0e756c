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

use image::imageops::FilterType;
use orrery_core::asset::{CpuTexture, TextureFormat};

/// An error raised while decoding image bytes.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The bytes are not an image in a supported format.
    #[error("unsupported or corrupt image data: {0}")]
    Image(#[from] image::ImageError),
    /// The image decoded to zero pixels.
    #[error("image has no pixels ({width}x{height})")]
    Empty {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },
}

/// Decodes encoded image bytes and scales them to a fixed texture size.
///
/// The scale is a non-uniform stretch to exactly the target size; aspect ratio
/// is not preserved. The output is always RGBA8 in sRGB space.
#[derive(Debug, Clone, Copy)]
pub struct TextureDecodeLane {
    filter: FilterType,
}

impl TextureDecodeLane {
    /// Creates a lane using bilinear filtering.
    pub fn new() -> Self {
        Self {
            filter: FilterType::Triangle,
        }
    }

    /// Decodes `bytes` into a `width` x `height` texture.
    pub fn decode(
        &self,
        bytes: &[u8],
        width: u32,
        height: u32,
    ) -> Result<CpuTexture, DecodeError> {
        let img = image::load_from_memory(bytes)?;
        if img.width() == 0 || img.height() == 0 {
            return Err(DecodeError::Empty {
                width: img.width(),
                height: img.height(),
            });
        }

        let rgba = if img.width() == width && img.height() == height {
            img.to_rgba8()
        } else {
            img.resize_exact(width, height, self.filter).to_rgba8()
        };
        let (width, height) = rgba.dimensions();

        Ok(CpuTexture {
            pixels: rgba.into_raw(),
            width,
            height,
            format: TextureFormat::Rgba8UnormSrgb,
        })
    }
}

impl Default for TextureDecodeLane {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode test png");
        bytes
    }

    #[test]
    fn decode_stretches_to_exact_target() {
        let lane = TextureDecodeLane::new();
        let texture = lane
            .decode(&png(40, 10, [10, 20, 30, 255]), 16, 32)
            .expect("valid png");
        assert_eq!((texture.width, texture.height), (16, 32));
        assert_eq!(texture.format, TextureFormat::Rgba8UnormSrgb);
        assert!(texture.is_consistent());
        assert_eq!(&texture.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn decode_keeps_pixels_when_size_matches() {
        let texture = TextureDecodeLane::new()
            .decode(&png(8, 8, [255, 0, 0, 128]), 8, 8)
            .expect("valid png");
        assert!(texture.pixels.chunks(4).all(|p| p == [255, 0, 0, 128]));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = TextureDecodeLane::new()
            .decode(b"definitely not an image", 8, 8)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Image(_)));
    }
}
