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

//! Resolution of an [`ImportConfiguration`] into the per-partition work an
//! import engine executes: half-open column ranges derived from partition
//! adjacency, paired with source file and storage target.

use std::collections::HashMap;
use std::fmt::Display;

use crate::error::{ConfigError, ConfigResult};
use crate::import_config::ImportConfiguration;
use crate::tiledb_config::TileDbConfig;

/// The half-open column range `[begin, end)` covered by one partition.
///
/// `end` is `None` for the last partition, which extends to the end of the
/// coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionBounds {
    /// Inclusive start coordinate.
    pub begin: u64,

    /// Exclusive end coordinate, the next partition's begin.
    pub end: Option<u64>,
}

impl PartitionBounds {
    /// Whether `coord` falls within these bounds.
    pub fn contains(&self, coord: u64) -> bool {
        coord >= self.begin && self.end.map_or(true, |end| coord < end)
    }
}

impl Display for PartitionBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end {
            Some(end) => write!(f, "[{}, {})", self.begin, end),
            None => write!(f, "[{}, ..)", self.begin),
        }
    }
}

/// Derive each partition's bounds from the begin of its successor.
///
/// Only meaningful for column-based configurations, where the builder has
/// already guaranteed strictly increasing begins.
pub fn partition_bounds(config: &ImportConfiguration) -> Vec<PartitionBounds> {
    let partitions = config.column_partitions();

    partitions
        .iter()
        .enumerate()
        .map(|(i, partition)| PartitionBounds {
            begin: partition.begin(),
            end: partitions.get(i + 1).map(|next| next.begin()),
        })
        .collect()
}

/// One partition's resolved unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Position of the partition in the configuration.
    pub index: usize,

    /// The column range the partition covers.
    pub bounds: PartitionBounds,

    /// The source VCF file for the range.
    pub vcf_file_name: String,

    /// The storage target that receives the range.
    pub target: TileDbConfig,
}

/// The fully resolved import plan for a column-based configuration.
///
/// Construction re-validates the configuration and additionally rejects two
/// partitions writing to the same `(workspace, array_name)` target: with
/// adjacency-derived ranges a shared target makes per-partition operations
/// like `delete_and_create_tiledb_array` ambiguous.
#[derive(Debug, Clone)]
pub struct ImportPlan {
    entries: Vec<PlanEntry>,
}

impl ImportPlan {
    /// Resolve `config` into a plan.
    pub fn new(config: &ImportConfiguration) -> ConfigResult<Self> {
        config.validate()?;

        if config.row_based_partitioning() {
            return Err(ConfigError::InvalidValue {
                field: "row_based_partitioning",
                message: "column range derivation requires column-based partitioning".to_string(),
            });
        }

        let mut targets: HashMap<&TileDbConfig, usize> = HashMap::new();

        for (index, partition) in config.column_partitions().iter().enumerate() {
            if let Some(&first) = targets.get(partition.tiledb_config()) {
                return Err(ConfigError::SharedStorageTarget {
                    first,
                    second: index,
                    workspace: partition.tiledb_config().workspace().to_string(),
                    array_name: partition.tiledb_config().array_name().to_string(),
                });
            }

            targets.insert(partition.tiledb_config(), index);
        }

        let entries = partition_bounds(config)
            .into_iter()
            .zip(config.column_partitions())
            .enumerate()
            .map(|(index, (bounds, partition))| PlanEntry {
                index,
                bounds,
                vcf_file_name: partition.vcf_file_name().to_string(),
                target: partition.tiledb_config().clone(),
            })
            .collect();

        Ok(Self { entries })
    }

    /// The plan's entries, in partition order.
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// The number of entries in the plan.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
