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

//! Building the gallery's image list.

use orrery_core::asset::ImageRef;
use std::path::Path;

/// File extensions [`scan_directory`] picks up, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Lists the images directly inside `dir`, sorted by file name.
///
/// Names that are not valid UTF-8 cannot be expressed as an [`ImageRef`] and
/// are skipped with a warning.
///
/// The returned references are file names, to be resolved by a
/// [`UriImageSource`](orrery_infra::UriImageSource) rooted at `dir`.
pub fn scan_directory(dir: impl AsRef<Path>) -> std::io::Result<Vec<ImageRef>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            });
        if !is_image {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::warn!("Skipping image with a non UTF-8 name: {raw:?}"),
        }
    }
    names.sort();
    Ok(names.into_iter().map(ImageRef::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_image_files_are_listed_in_name_order() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        for name in ["b.JPG", "a.png", "notes.txt", "c.webp"] {
            std::fs::write(dir.path().join(name), b"")?;
        }
        std::fs::create_dir(dir.path().join("d.png"))?;

        let images = scan_directory(dir.path())?;
        let names: Vec<_> = images.iter().map(ImageRef::as_str).collect();
        assert_eq!(names, vec!["a.png", "b.JPG", "c.webp"]);
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_are_skipped() -> std::io::Result<()> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("ok.png"), b"")?;
        std::fs::write(dir.path().join(OsStr::from_bytes(b"bad-\xff.png")), b"")?;

        let images = scan_directory(dir.path())?;
        let names: Vec<_> = images.iter().map(ImageRef::as_str).collect();
        assert_eq!(names, vec!["ok.png"]);
        Ok(())
    }
}
