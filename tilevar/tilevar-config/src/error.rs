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

/// Possible errors when building or validating an import configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field was never set.
    MissingField(&'static str),

    /// A required string field was set to an empty string.
    EmptyField(&'static str),

    /// A numeric field was set outside its valid range.
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A column partition failed validation.
    Partition {
        /// Index of the offending partition.
        index: usize,
        /// The underlying field error.
        source: Box<ConfigError>,
    },

    /// Two column partitions share the same begin coordinate.
    DuplicatePartitionBegin {
        /// Index of the later of the two partitions.
        index: usize,
        /// The repeated begin coordinate.
        begin: u64,
    },

    /// A column partition's begin is not greater than its predecessor's.
    PartitionOrdering {
        /// Index of the out-of-order partition.
        index: usize,
        /// Its begin coordinate.
        begin: u64,
        /// The preceding partition's begin coordinate.
        previous: u64,
    },

    /// Two partitions resolve to the same storage target.
    SharedStorageTarget {
        /// Index of the first partition using the target.
        first: usize,
        /// Index of the second partition using the target.
        second: usize,
        /// The shared workspace path.
        workspace: String,
        /// The shared array name.
        array_name: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingField(field) => write!(f, "missing required field: {}", field),
            ConfigError::EmptyField(field) => write!(f, "field must be non-empty: {}", field),
            ConfigError::InvalidValue { field, message } => {
                write!(f, "invalid value for {}: {}", field, message)
            }
            ConfigError::Partition { index, source } => {
                write!(f, "column partition {}: {}", index, source)
            }
            ConfigError::DuplicatePartitionBegin { index, begin } => {
                write!(
                    f,
                    "column partition {} repeats begin coordinate {}",
                    index, begin
                )
            }
            ConfigError::PartitionOrdering {
                index,
                begin,
                previous,
            } => {
                write!(
                    f,
                    "column partition {} has begin {} but the previous partition begins at {}",
                    index, begin, previous
                )
            }
            ConfigError::SharedStorageTarget {
                first,
                second,
                workspace,
                array_name,
            } => {
                write!(
                    f,
                    "partitions {} and {} both target array '{}' in workspace '{}'",
                    first, second, array_name, workspace
                )
            }
        }
    }
}

impl Error for ConfigError {}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
