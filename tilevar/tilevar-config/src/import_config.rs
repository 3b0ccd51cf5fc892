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

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::partition::Partition;

/// The immutable aggregate describing one bulk import run: global flags plus
/// an ordered sequence of column partitions.
///
/// Every optional scalar carries an independent presence bit, modeled as an
/// `Option`: an unset flag is observably different from a flag set to its
/// default. Partition order is semantically significant, adjacent begins
/// derive the half-open column ranges consumed by the import engine.
///
/// Once built the value is never mutated, so it is safe for unsynchronized
/// concurrent reads. Reconfiguration means building a new instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportConfiguration {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    column_partitions: Vec<Partition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    delete_and_create_tiledb_array: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    do_ping_pong_buffering: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    produce_tiledb_array: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    produce_combined_vcf: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    num_parallel_vcf_files: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    size_per_column_partition: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    row_based_partitioning: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    callset_mapping_file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    discard_vcf_index: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    offload_vcf_output_processing: Option<bool>,
}

impl ImportConfiguration {
    /// Create a builder for an `ImportConfiguration`.
    pub fn builder() -> ImportConfigurationBuilder {
        ImportConfigurationBuilder::new()
    }

    /// The ordered column partitions.
    pub fn column_partitions(&self) -> &[Partition] {
        &self.column_partitions
    }

    /// The number of column partitions.
    pub fn column_partitions_count(&self) -> usize {
        self.column_partitions.len()
    }

    /// The partition at `index`, if any.
    pub fn column_partition(&self, index: usize) -> Option<&Partition> {
        self.column_partitions.get(index)
    }

    /// Whether `delete_and_create_tiledb_array` was explicitly set.
    pub fn has_delete_and_create_tiledb_array(&self) -> bool {
        self.delete_and_create_tiledb_array.is_some()
    }

    /// Whether each target array is destroyed and recreated before writing.
    /// Defaults to false.
    pub fn delete_and_create_tiledb_array(&self) -> bool {
        self.delete_and_create_tiledb_array.unwrap_or(false)
    }

    /// Whether `do_ping_pong_buffering` was explicitly set.
    pub fn has_do_ping_pong_buffering(&self) -> bool {
        self.do_ping_pong_buffering.is_some()
    }

    /// Whether ingestion uses double-buffered I/O. Defaults to false.
    pub fn do_ping_pong_buffering(&self) -> bool {
        self.do_ping_pong_buffering.unwrap_or(false)
    }

    /// Whether `produce_tiledb_array` was explicitly set.
    pub fn has_produce_tiledb_array(&self) -> bool {
        self.produce_tiledb_array.is_some()
    }

    /// Whether the import writes arrays at all; false means a dry/validation
    /// run. Defaults to false.
    pub fn produce_tiledb_array(&self) -> bool {
        self.produce_tiledb_array.unwrap_or(false)
    }

    /// Whether `produce_combined_vcf` was explicitly set.
    pub fn has_produce_combined_vcf(&self) -> bool {
        self.produce_combined_vcf.is_some()
    }

    /// Whether the import also produces a merged VCF. Defaults to false.
    pub fn produce_combined_vcf(&self) -> bool {
        self.produce_combined_vcf.unwrap_or(false)
    }

    /// Whether `num_parallel_vcf_files` was explicitly set.
    pub fn has_num_parallel_vcf_files(&self) -> bool {
        self.num_parallel_vcf_files.is_some()
    }

    /// The degree of parallelism across input files, if set. Validated to be
    /// at least 1. Carried for the import engine, never acted on here.
    pub fn num_parallel_vcf_files(&self) -> Option<usize> {
        self.num_parallel_vcf_files
    }

    /// Whether `size_per_column_partition` was explicitly set.
    pub fn has_size_per_column_partition(&self) -> bool {
        self.size_per_column_partition.is_some()
    }

    /// The target size per partition used for buffer sizing, if set.
    pub fn size_per_column_partition(&self) -> Option<u64> {
        self.size_per_column_partition
    }

    /// Whether `row_based_partitioning` was explicitly set.
    pub fn has_row_based_partitioning(&self) -> bool {
        self.row_based_partitioning.is_some()
    }

    /// Whether partition begins are row indices instead of genomic
    /// coordinates. Defaults to false.
    pub fn row_based_partitioning(&self) -> bool {
        self.row_based_partitioning.unwrap_or(false)
    }

    /// Whether `callset_mapping_file` was explicitly set.
    pub fn has_callset_mapping_file(&self) -> bool {
        self.callset_mapping_file.is_some()
    }

    /// The path to the callset name mapping file, if set.
    pub fn callset_mapping_file(&self) -> Option<&str> {
        self.callset_mapping_file.as_deref()
    }

    /// Whether `discard_vcf_index` was explicitly set.
    pub fn has_discard_vcf_index(&self) -> bool {
        self.discard_vcf_index.is_some()
    }

    /// Whether VCF index files are discarded. Defaults to false.
    pub fn discard_vcf_index(&self) -> bool {
        self.discard_vcf_index.unwrap_or(false)
    }

    /// Whether `offload_vcf_output_processing` was explicitly set.
    pub fn has_offload_vcf_output_processing(&self) -> bool {
        self.offload_vcf_output_processing.is_some()
    }

    /// Whether VCF output processing is offloaded. Defaults to false.
    pub fn offload_vcf_output_processing(&self) -> bool {
        self.offload_vcf_output_processing.unwrap_or(false)
    }

    /// Check every invariant the builder enforces.
    ///
    /// Configurations produced by the builder already satisfy these, this is
    /// for values that arrived by other means, e.g. a decoded document.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(n) = self.num_parallel_vcf_files {
            if n < 1 {
                return Err(ConfigError::InvalidValue {
                    field: "num_parallel_vcf_files",
                    message: format!("must be at least 1, got {}", n),
                });
            }
        }

        if let Some(size) = self.size_per_column_partition {
            if size == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "size_per_column_partition",
                    message: "must be greater than 0".to_string(),
                });
            }
        }

        if let Some(callset_mapping_file) = &self.callset_mapping_file {
            if callset_mapping_file.is_empty() {
                return Err(ConfigError::EmptyField("callset_mapping_file"));
            }
        }

        for (index, partition) in self.column_partitions.iter().enumerate() {
            partition.validate().map_err(|e| ConfigError::Partition {
                index,
                source: Box::new(e),
            })?;
        }

        self.validate_partition_ordering()
    }

    /// Column-based partitions must be strictly increasing in `begin` because
    /// the exclusive end of each range is derived from its successor. Row
    /// partitions carry no adjacency semantics, only duplicate begins are
    /// rejected there.
    fn validate_partition_ordering(&self) -> ConfigResult<()> {
        if self.row_based_partitioning() {
            let mut seen = HashSet::with_capacity(self.column_partitions.len());

            for (index, partition) in self.column_partitions.iter().enumerate() {
                if !seen.insert(partition.begin()) {
                    return Err(ConfigError::DuplicatePartitionBegin {
                        index,
                        begin: partition.begin(),
                    });
                }
            }

            return Ok(());
        }

        for (index, pair) in self.column_partitions.windows(2).enumerate() {
            let previous = pair[0].begin();
            let begin = pair[1].begin();

            if begin == previous {
                return Err(ConfigError::DuplicatePartitionBegin {
                    index: index + 1,
                    begin,
                });
            }

            if begin < previous {
                return Err(ConfigError::PartitionOrdering {
                    index: index + 1,
                    begin,
                    previous,
                });
            }
        }

        Ok(())
    }
}

/// A builder for [`ImportConfiguration`].
///
/// Setters may be called in any order and overwrite previous values; partition
/// appends accumulate instead. `build()` consumes the builder and validates
/// every invariant, clone the builder to build the same state twice.
#[derive(Debug, Clone, Default)]
pub struct ImportConfigurationBuilder {
    staged: ImportConfiguration,
}

impl ImportConfigurationBuilder {
    /// Create a new builder with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether target arrays are destroyed and recreated before writing.
    pub fn delete_and_create_tiledb_array(mut self, value: bool) -> Self {
        self.staged.delete_and_create_tiledb_array = Some(value);
        self
    }

    /// Set whether ingestion uses double-buffered I/O.
    pub fn do_ping_pong_buffering(mut self, value: bool) -> Self {
        self.staged.do_ping_pong_buffering = Some(value);
        self
    }

    /// Set whether the import writes arrays.
    pub fn produce_tiledb_array(mut self, value: bool) -> Self {
        self.staged.produce_tiledb_array = Some(value);
        self
    }

    /// Set whether the import also produces a merged VCF.
    pub fn produce_combined_vcf(mut self, value: bool) -> Self {
        self.staged.produce_combined_vcf = Some(value);
        self
    }

    /// Set the degree of parallelism across input files.
    pub fn num_parallel_vcf_files(mut self, value: usize) -> Self {
        self.staged.num_parallel_vcf_files = Some(value);
        self
    }

    /// Set the target size per column partition.
    pub fn size_per_column_partition(mut self, value: u64) -> Self {
        self.staged.size_per_column_partition = Some(value);
        self
    }

    /// Set whether partition begins are row indices.
    pub fn row_based_partitioning(mut self, value: bool) -> Self {
        self.staged.row_based_partitioning = Some(value);
        self
    }

    /// Set the path to the callset name mapping file.
    pub fn callset_mapping_file(mut self, value: impl Into<String>) -> Self {
        self.staged.callset_mapping_file = Some(value.into());
        self
    }

    /// Set whether VCF index files are discarded.
    pub fn discard_vcf_index(mut self, value: bool) -> Self {
        self.staged.discard_vcf_index = Some(value);
        self
    }

    /// Set whether VCF output processing is offloaded.
    pub fn offload_vcf_output_processing(mut self, value: bool) -> Self {
        self.staged.offload_vcf_output_processing = Some(value);
        self
    }

    /// Append one column partition.
    pub fn add_column_partition(mut self, partition: Partition) -> Self {
        self.staged.column_partitions.push(partition);
        self
    }

    /// Append partitions in the caller-supplied order, after any partitions
    /// already staged.
    pub fn add_all_column_partitions(
        mut self,
        partitions: impl IntoIterator<Item = Partition>,
    ) -> Self {
        self.staged.column_partitions.extend(partitions);
        self
    }

    /// Build the immutable `ImportConfiguration`, validating every invariant.
    pub fn build(self) -> ConfigResult<ImportConfiguration> {
        self.staged.validate()?;

        Ok(self.staged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiledb_config::TileDbConfig;

    fn test_partition(begin: u64, array_name: &str) -> Partition {
        Partition::builder()
            .begin(begin)
            .vcf_file_name(format!("{}.vcf.gz", array_name))
            .tiledb_config(
                TileDbConfig::builder()
                    .workspace("/data/ws")
                    .array_name(array_name)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_unset_fields_report_absent() {
        let config = ImportConfiguration::builder().build().unwrap();

        assert!(!config.has_delete_and_create_tiledb_array());
        assert!(!config.has_do_ping_pong_buffering());
        assert!(!config.has_produce_tiledb_array());
        assert!(!config.has_produce_combined_vcf());
        assert!(!config.has_num_parallel_vcf_files());
        assert!(!config.has_size_per_column_partition());
        assert!(!config.has_row_based_partitioning());
        assert!(!config.has_callset_mapping_file());
        assert!(!config.has_discard_vcf_index());
        assert!(!config.has_offload_vcf_output_processing());

        assert!(!config.delete_and_create_tiledb_array());
        assert_eq!(config.column_partitions_count(), 0);
    }

    #[test]
    fn test_set_to_default_is_still_present() {
        let config = ImportConfiguration::builder()
            .row_based_partitioning(false)
            .build()
            .unwrap();

        assert!(config.has_row_based_partitioning());
        assert!(!config.row_based_partitioning());
    }

    #[test]
    fn test_last_write_wins() {
        let config = ImportConfiguration::builder()
            .num_parallel_vcf_files(4)
            .num_parallel_vcf_files(8)
            .build()
            .unwrap();

        assert_eq!(config.num_parallel_vcf_files(), Some(8));
    }

    #[test]
    fn test_bulk_append_preserves_order_and_appends() {
        let p0 = test_partition(0, "array0");
        let p1 = test_partition(500, "array1");
        let p2 = test_partition(1000, "array2");

        let config = ImportConfiguration::builder()
            .add_column_partition(p0.clone())
            .add_all_column_partitions(vec![p1.clone(), p2.clone()])
            .build()
            .unwrap();

        assert_eq!(config.column_partitions_count(), 3);
        assert_eq!(config.column_partition(0), Some(&p0));
        assert_eq!(config.column_partition(1), Some(&p1));
        assert_eq!(config.column_partition(2), Some(&p2));
        assert_eq!(config.column_partition(3), None);
    }

    #[test]
    fn test_build_is_idempotent_over_clones() {
        let builder = ImportConfiguration::builder()
            .produce_tiledb_array(true)
            .size_per_column_partition(10_000)
            .add_column_partition(test_partition(0, "array0"));

        let first = builder.clone().build().unwrap();
        let second = builder.build().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_parallel_vcf_files_rejected() {
        let err = ImportConfiguration::builder()
            .num_parallel_vcf_files(0)
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "num_parallel_vcf_files",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_size_per_column_partition_rejected() {
        let err = ImportConfiguration::builder()
            .size_per_column_partition(0)
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "size_per_column_partition",
                ..
            }
        ));
    }

    #[test]
    fn test_out_of_order_partitions_rejected() {
        let err = ImportConfiguration::builder()
            .add_all_column_partitions(vec![
                test_partition(1000, "array0"),
                test_partition(0, "array1"),
            ])
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::PartitionOrdering {
                index: 1,
                begin: 0,
                previous: 1000
            }
        );
    }

    #[test]
    fn test_duplicate_begin_rejected() {
        let err = ImportConfiguration::builder()
            .add_all_column_partitions(vec![
                test_partition(42, "array0"),
                test_partition(42, "array1"),
            ])
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::DuplicatePartitionBegin {
                index: 1,
                begin: 42
            }
        );
    }

    #[test]
    fn test_row_based_partitions_may_be_unordered() {
        let config = ImportConfiguration::builder()
            .row_based_partitioning(true)
            .add_all_column_partitions(vec![
                test_partition(1000, "array0"),
                test_partition(0, "array1"),
            ])
            .build()
            .unwrap();

        assert_eq!(config.column_partitions_count(), 2);
    }

    #[test]
    fn test_row_based_duplicate_begin_rejected() {
        let err = ImportConfiguration::builder()
            .row_based_partitioning(true)
            .add_all_column_partitions(vec![
                test_partition(7, "array0"),
                test_partition(7, "array1"),
            ])
            .build()
            .unwrap_err();

        assert_eq!(err, ConfigError::DuplicatePartitionBegin { index: 1, begin: 7 });
    }
}
