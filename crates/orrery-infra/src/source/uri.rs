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

use base64::Engine;
use orrery_core::asset::{ImageLoadError, ImageRef, ImageSource};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Why a locator could not be resolved to bytes.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Reading a local file failed.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// The resolved path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A `data:` URI without a `,` separator or without a base64 payload.
    #[error("malformed data URI: {0}")]
    MalformedDataUri(&'static str),
    /// The base64 payload of a `data:` URI is invalid.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The HTTP request could not be performed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("HTTP status {status} for {url}")]
    Status {
        /// The requested URL.
        url: String,
        /// The status code.
        status: u16,
    },
    /// The locator uses a scheme this source does not handle.
    #[error("unsupported URI scheme '{0}'")]
    UnsupportedScheme(String),
}

/// Resolves image locators by their form:
///
/// - `data:<mime>;base64,<payload>`: decoded in place;
/// - `http://...` and `https://...`: fetched with a blocking HTTP client;
/// - `file://<path>` and plain paths: read from disk, relative paths against
///   the source's root directory.
#[derive(Debug)]
pub struct UriImageSource {
    root: PathBuf,
    client: OnceLock<reqwest::blocking::Client>,
}

impl UriImageSource {
    /// Creates a source resolving relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            client: OnceLock::new(),
        }
    }

    /// The directory relative paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `locator` to the raw bytes it designates.
    pub fn resolve(&self, locator: &str) -> Result<Vec<u8>, SourceError> {
        if let Some(rest) = locator.strip_prefix("data:") {
            return decode_data_uri(rest);
        }
        if locator.starts_with("http://") || locator.starts_with("https://") {
            return self.fetch_remote(locator);
        }
        if let Some(path) = locator.strip_prefix("file://") {
            return self.read_file(Path::new(path));
        }
        if let Some((scheme, _)) = locator.split_once("://") {
            return Err(SourceError::UnsupportedScheme(scheme.to_string()));
        }
        self.read_file(Path::new(locator))
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, SourceError> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        std::fs::read(&path).map_err(|source| SourceError::Io { path, source })
    }

    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let client = self.client.get_or_init(reqwest::blocking::Client::new);
        let response = client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

fn decode_data_uri(rest: &str) -> Result<Vec<u8>, SourceError> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or(SourceError::MalformedDataUri("missing ',' separator"))?;
    if !header.split(';').any(|param| param == "base64") {
        return Err(SourceError::MalformedDataUri("only base64 payloads are supported"));
    }
    Ok(base64::engine::general_purpose::STANDARD.decode(payload.trim())?)
}

impl ImageSource for UriImageSource {
    fn fetch(&self, image: &ImageRef) -> Result<Vec<u8>, ImageLoadError> {
        self.resolve(image.as_str())
            .map_err(|e| ImageLoadError::Fetch {
                image: image.clone(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn relative_paths_resolve_against_root() -> anyhow::Result<()> {
        let dir = tempdir()?;
        std::fs::create_dir(dir.path().join("photos"))?;
        std::fs::write(dir.path().join("photos/a.png"), b"abc")?;

        let source = UriImageSource::new(dir.path());
        assert_eq!(source.resolve("photos/a.png")?, b"abc");
        let absolute = dir.path().join("photos/a.png");
        assert_eq!(source.resolve(&absolute.to_string_lossy())?, b"abc");
        Ok(())
    }

    #[test]
    fn missing_file_is_a_fetch_error() {
        let dir = tempdir().unwrap();
        let source = UriImageSource::new(dir.path());
        let err = source.fetch(&ImageRef::new("nope.png")).unwrap_err();
        assert!(matches!(err, ImageLoadError::Fetch { .. }));
    }

    #[test]
    fn base64_data_uri_is_decoded() {
        let source = UriImageSource::new(".");
        assert_eq!(
            source.resolve("data:image/png;base64,aGVsbG8=").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn malformed_data_uris_are_rejected() {
        let source = UriImageSource::new(".");
        assert!(matches!(
            source.resolve("data:image/png;base64"),
            Err(SourceError::MalformedDataUri(_))
        ));
        assert!(matches!(
            source.resolve("data:text/plain,hello"),
            Err(SourceError::MalformedDataUri(_))
        ));
        assert!(matches!(
            source.resolve("data:image/png;base64,@@@"),
            Err(SourceError::Base64(_))
        ));
    }

    #[test]
    fn unknown_schemes_are_rejected() {
        let source = UriImageSource::new(".");
        assert!(matches!(
            source.resolve("ftp://example.com/a.png"),
            Err(SourceError::UnsupportedScheme(s)) if s == "ftp"
        ));
    }
}
