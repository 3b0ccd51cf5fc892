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

#![warn(missing_docs)]

//! The validated configuration model for TileVar bulk imports.
//!
//! An [`ImportConfiguration`] describes one import run: how a set of input
//! VCF files is split across genomic coordinate ranges and which TileDB array
//! each range is written to, plus the global flags the import engine honors.
//! Values are accumulated through builders, validated once at `build()`, and
//! immutable afterwards.
//!
//! The [`plan`] module resolves a configuration into the half-open column
//! ranges and storage targets the engine iterates.

mod error;

pub use error::ConfigError;
pub use error::ConfigResult;

mod tiledb_config;
pub use tiledb_config::{TileDbConfig, TileDbConfigBuilder};

mod partition;
pub use partition::{Partition, PartitionBuilder};

mod import_config;
pub use import_config::{ImportConfiguration, ImportConfigurationBuilder};

/// Resolution of a configuration into per-partition work units.
pub mod plan;
