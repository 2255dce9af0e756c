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

/// The pixel layout of a [`CpuTexture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8 bits per channel RGBA, colour values in sRGB space.
    Rgba8UnormSrgb,
    /// 8 bits per channel RGBA, linear colour values.
    Rgba8Unorm,
}

impl TextureFormat {
    /// Number of bytes a single texel occupies.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            TextureFormat::Rgba8UnormSrgb | TextureFormat::Rgba8Unorm => 4,
        }
    }
}

/// A decoded image living in CPU memory, ready to be uploaded to the GPU.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTexture {
    /// Tightly packed pixel rows, top row first.
    pub pixels: Vec<u8>,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// The layout of `pixels`.
    pub format: TextureFormat,
}

impl CpuTexture {
    /// The number of bytes `pixels` must hold for the declared size and format.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }

    /// Returns `true` if the pixel buffer matches the declared dimensions.
    pub fn is_consistent(&self) -> bool {
        self.width > 0 && self.height > 0 && self.pixels.len() == self.expected_len()
    }
}
