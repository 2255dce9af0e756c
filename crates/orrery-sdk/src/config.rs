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

//! Loading [`GalleryConfig`] from TOML.
//!
//! ```toml
//! [gallery]
//! batch_size = 8
//! policy = "truncating"
//!
//! [layout]
//! radius = 2.0
//! ```
//!
//! Omitted sections and keys keep their defaults.

use orrery_core::config::{ConfigValidationError, GalleryConfig};
use std::path::{Path, PathBuf};

/// An error raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        /// The config path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error(transparent)]
    Invalid(#[from] ConfigValidationError),
}

/// Reads and validates a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<GalleryConfig, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text)?;
    log::debug!("Loaded gallery config from {}.", path.display());
    Ok(config)
}

/// Parses and validates a configuration document.
pub fn parse_config(text: &str) -> Result<GalleryConfig, ConfigError> {
    let config: GalleryConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::config::CarouselPolicy;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(parse_config("").unwrap(), GalleryConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse_config(
            r#"
            [gallery]
            policy = "truncating"

            [texture]
            workers = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.gallery.policy, CarouselPolicy::Truncating);
        assert_eq!(config.gallery.batch_size, 10);
        assert_eq!(config.texture.workers, 2);
        assert_eq!(config.texture.width, 512);
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        assert!(matches!(
            parse_config("[gallery]\npolicy = \"shuffle\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = parse_config("[gallery]\nbatch_size = 0\n").unwrap_err();
        assert!(matches!(&err, ConfigError::Invalid(e) if e.key == "gallery.batch_size"));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = load_config("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
