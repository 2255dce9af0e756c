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

use super::{ReferenceSpaceType, SessionFeature, SessionMode};
use std::fmt;

/// An error that prevents an XR session from becoming active.
///
/// This is fatal to activation: the caller receives it and the gallery does not start.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUnavailableError {
    /// The output surface or rendering context could not be acquired.
    SurfaceUnavailable(String),
    /// The runtime does not support the requested session mode.
    UnsupportedMode(SessionMode),
    /// A required feature is not supported.
    FeatureUnsupported(SessionFeature),
    /// The session refused to create the requested reference space.
    ReferenceSpaceUnavailable(ReferenceSpaceType),
    /// A session is already active for this scheduler.
    AlreadyActive,
    /// The scheduler's session has ended. Ended is terminal.
    Ended,
}

impl fmt::Display for SessionUnavailableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionUnavailableError::SurfaceUnavailable(msg) => {
                write!(f, "Output surface unavailable: {msg}")
            }
            SessionUnavailableError::UnsupportedMode(mode) => {
                write!(f, "Session mode {mode:?} is not supported")
            }
            SessionUnavailableError::FeatureUnsupported(feature) => {
                write!(f, "Required feature '{}' is not supported", feature.as_str())
            }
            SessionUnavailableError::ReferenceSpaceUnavailable(kind) => {
                write!(f, "Reference space {kind:?} is unavailable")
            }
            SessionUnavailableError::AlreadyActive => {
                write!(f, "A session is already active")
            }
            SessionUnavailableError::Ended => {
                write!(f, "The session has ended and cannot be restarted")
            }
        }
    }
}

impl std::error::Error for SessionUnavailableError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_error_uses_runtime_descriptor() {
        let err = SessionUnavailableError::FeatureUnsupported(SessionFeature::HitTest);
        assert_eq!(err.to_string(), "Required feature 'hit-test' is not supported");
    }
}
