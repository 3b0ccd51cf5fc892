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

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// One physical storage target: a TileDB workspace plus an array name within it.
///
/// The `(workspace, array_name)` pair identifies the target. Two partitions may
/// share a target only if their derived column ranges are disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileDbConfig {
    workspace: String,
    array_name: String,
}

impl TileDbConfig {
    /// Create a builder for a `TileDbConfig`.
    pub fn builder() -> TileDbConfigBuilder {
        TileDbConfigBuilder::new()
    }

    /// The filesystem or object-store root of the workspace.
    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    /// The name of the target array within the workspace.
    pub fn array_name(&self) -> &str {
        &self.array_name
    }

    pub(crate) fn validate(&self) -> ConfigResult<()> {
        if self.workspace.is_empty() {
            return Err(ConfigError::EmptyField("workspace"));
        }

        if self.array_name.is_empty() {
            return Err(ConfigError::EmptyField("array_name"));
        }

        Ok(())
    }
}

/// A builder for [`TileDbConfig`].
///
/// `build()` consumes the builder, so a built config can no longer be mutated
/// through it. Clone the builder first if the same accumulated state needs to
/// be built more than once.
#[derive(Debug, Clone, Default)]
pub struct TileDbConfigBuilder {
    workspace: Option<String>,
    array_name: Option<String>,
}

impl TileDbConfigBuilder {
    /// Create a new builder with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the workspace path. Overwrites any previously set value.
    pub fn workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    /// Set the array name. Overwrites any previously set value.
    pub fn array_name(mut self, array_name: impl Into<String>) -> Self {
        self.array_name = Some(array_name.into());
        self
    }

    /// Build the immutable `TileDbConfig`.
    ///
    /// Fails if either required string is unset or empty.
    pub fn build(self) -> ConfigResult<TileDbConfig> {
        let workspace = self
            .workspace
            .ok_or(ConfigError::MissingField("workspace"))?;

        let array_name = self
            .array_name
            .ok_or(ConfigError::MissingField("array_name"))?;

        let config = TileDbConfig {
            workspace,
            array_name,
        };
        config.validate()?;

        Ok(config)
    }
}
