// Copyright 2024 WHERE TRUE Technologies.
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

use std::{error::Error, fmt::Display};

use tilevar_config::ConfigError;

/// Possible errors for the JSON document layer.
#[derive(Debug)]
pub enum TileVarJsonError {
    /// IO error reading a document.
    IO(std::io::Error),

    /// The document is not valid JSON or does not match the expected shape.
    Json(serde_json::Error),

    /// The document is structurally valid JSON but semantically malformed.
    Document(String),

    /// The loaded configuration violates a core invariant.
    Config(ConfigError),

    /// An encoded configuration carries a format version this build does not
    /// understand.
    UnsupportedVersion {
        /// The version found in the envelope.
        found: u32,
        /// The version this build supports.
        supported: u32,
    },
}

impl Display for TileVarJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileVarJsonError::IO(error) => write!(f, "IO error: {}", error),
            TileVarJsonError::Json(error) => write!(f, "JSON error: {}", error),
            TileVarJsonError::Document(msg) => write!(f, "malformed document: {}", msg),
            TileVarJsonError::Config(error) => write!(f, "configuration error: {}", error),
            TileVarJsonError::UnsupportedVersion { found, supported } => {
                write!(
                    f,
                    "unsupported format version {} (supported: {})",
                    found, supported
                )
            }
        }
    }
}

impl Error for TileVarJsonError {}

impl From<std::io::Error> for TileVarJsonError {
    fn from(error: std::io::Error) -> Self {
        TileVarJsonError::IO(error)
    }
}

impl From<serde_json::Error> for TileVarJsonError {
    fn from(error: serde_json::Error) -> Self {
        TileVarJsonError::Json(error)
    }
}

impl From<ConfigError> for TileVarJsonError {
    fn from(error: ConfigError) -> Self {
        TileVarJsonError::Config(error)
    }
}

/// Result alias for the JSON document layer.
pub type TileVarJsonResult<T> = Result<T, TileVarJsonError>;
