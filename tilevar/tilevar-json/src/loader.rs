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

use std::path::Path;

use tilevar_config::{ImportConfiguration, Partition, TileDbConfig};

use crate::document::{ImportDocument, RawPartition};
use crate::error::{TileVarJsonError, TileVarJsonResult};

/// Load an import configuration from a JSON document on disk.
pub fn from_file(path: impl AsRef<Path>) -> TileVarJsonResult<ImportConfiguration> {
    let contents = std::fs::read_to_string(path.as_ref())?;

    tracing::debug!(
        "loaded import configuration document from {}",
        path.as_ref().display()
    );

    from_str(&contents)
}

/// Load an import configuration from JSON document text.
pub fn from_str(contents: &str) -> TileVarJsonResult<ImportConfiguration> {
    let document: ImportDocument = serde_json::from_str(contents)?;

    configuration_from_document(document)
}

fn configuration_from_document(
    document: ImportDocument,
) -> TileVarJsonResult<ImportConfiguration> {
    let raw_partitions = raw_partitions_in_document_order(&document)?;

    let mut partitions = Vec::with_capacity(raw_partitions.len());

    for (position, raw) in raw_partitions.iter().enumerate() {
        partitions.push(resolve_partition(&document, position, raw)?);
    }

    // Historic documents relied on the loader sorting column partitions by
    // begin; the core builder instead requires ascending order. Normalize
    // here and make the reorder visible. Row partitions keep document order.
    if document.row_based_partitioning != Some(true) {
        let mut sorted = partitions.clone();
        sorted.sort_by_key(Partition::begin);

        if sorted != partitions {
            tracing::warn!("column partitions were not in ascending begin order, reordering");
            partitions = sorted;
        }
    }

    let mut builder = ImportConfiguration::builder().add_all_column_partitions(partitions);

    if let Some(value) = document.delete_and_create_tiledb_array {
        builder = builder.delete_and_create_tiledb_array(value);
    }

    if let Some(value) = document.do_ping_pong_buffering {
        builder = builder.do_ping_pong_buffering(value);
    }

    if let Some(value) = document.produce_tiledb_array {
        builder = builder.produce_tiledb_array(value);
    }

    if let Some(value) = document.produce_combined_vcf {
        builder = builder.produce_combined_vcf(value);
    }

    if let Some(value) = document.num_parallel_vcf_files {
        builder = builder.num_parallel_vcf_files(value);
    }

    if let Some(value) = document.size_per_column_partition {
        builder = builder.size_per_column_partition(value);
    }

    if let Some(value) = document.row_based_partitioning {
        builder = builder.row_based_partitioning(value);
    }

    if let Some(value) = document.callset_mapping_file {
        builder = builder.callset_mapping_file(value);
    }

    if let Some(value) = document.discard_vcf_index {
        builder = builder.discard_vcf_index(value);
    }

    if let Some(value) = document.offload_vcf_output_processing {
        builder = builder.offload_vcf_output_processing(value);
    }

    Ok(builder.build()?)
}

/// The `column_partitions` object is keyed by index strings; iterate entries
/// by their numeric key so `"10"` sorts after `"2"`.
fn raw_partitions_in_document_order(
    document: &ImportDocument,
) -> TileVarJsonResult<Vec<RawPartition>> {
    let Some(dict) = &document.column_partitions else {
        return Ok(Vec::new());
    };

    let mut indexed = Vec::with_capacity(dict.len());

    for (key, raw) in dict {
        let index: usize = key.parse().map_err(|_| {
            TileVarJsonError::Document(format!(
                "column_partitions key '{}' is not a partition index",
                key
            ))
        })?;

        indexed.push((index, raw.clone()));
    }

    indexed.sort_by_key(|(index, _)| *index);

    Ok(indexed.into_iter().map(|(_, raw)| raw).collect())
}

/// Resolve one partition's storage target: a partition-level `workspace` or
/// `array` wins over the document-level value, which may itself be a single
/// shared string or one string per partition.
fn resolve_partition(
    document: &ImportDocument,
    position: usize,
    raw: &RawPartition,
) -> TileVarJsonResult<Partition> {
    let workspace = raw
        .workspace
        .as_deref()
        .or_else(|| document.workspace.as_ref().and_then(|w| w.get(position)))
        .ok_or_else(|| {
            TileVarJsonError::Document(format!(
                "no workspace defined for column partition {}",
                position
            ))
        })?;

    let array_name = raw
        .array
        .as_deref()
        .or_else(|| document.array.as_ref().and_then(|a| a.get(position)))
        .ok_or_else(|| {
            TileVarJsonError::Document(format!(
                "no array defined for column partition {}",
                position
            ))
        })?;

    let tiledb_config = TileDbConfig::builder()
        .workspace(workspace)
        .array_name(array_name)
        .build()?;

    let partition = Partition::builder()
        .begin(raw.begin)
        .vcf_file_name(raw.vcf_file_name.clone())
        .tiledb_config(tiledb_config)
        .build()?;

    Ok(partition)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_document() {
        let config = from_str(
            r#"{
                "workspace": "/data/ws",
                "array": ["array0", "array1"],
                "produce_tiledb_array": true,
                "num_parallel_vcf_files": 2,
                "column_partitions": {
                    "0": { "begin": 0, "vcf_file_name": "a.vcf.gz" },
                    "1": { "begin": 1000000, "vcf_file_name": "b.vcf.gz" }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.column_partitions_count(), 2);
        assert!(config.produce_tiledb_array());
        assert_eq!(config.num_parallel_vcf_files(), Some(2));
        assert!(!config.has_do_ping_pong_buffering());

        let p0 = config.column_partition(0).unwrap();
        assert_eq!(p0.begin(), 0);
        assert_eq!(p0.tiledb_config().workspace(), "/data/ws");
        assert_eq!(p0.tiledb_config().array_name(), "array0");

        let p1 = config.column_partition(1).unwrap();
        assert_eq!(p1.tiledb_config().array_name(), "array1");
    }

    #[test]
    fn test_partition_level_override_wins() {
        let config = from_str(
            r#"{
                "workspace": "/data/ws",
                "array": "shared",
                "column_partitions": {
                    "0": { "begin": 0, "vcf_file_name": "a.vcf.gz" },
                    "1": {
                        "begin": 500,
                        "vcf_file_name": "b.vcf.gz",
                        "workspace": "/other/ws",
                        "array": "override"
                    }
                }
            }"#,
        )
        .unwrap();

        let p1 = config.column_partition(1).unwrap();
        assert_eq!(p1.tiledb_config().workspace(), "/other/ws");
        assert_eq!(p1.tiledb_config().array_name(), "override");
    }

    #[test]
    fn test_unordered_partitions_are_sorted() {
        let config = from_str(
            r#"{
                "workspace": "/data/ws",
                "array": ["array0", "array1"],
                "column_partitions": {
                    "0": { "begin": 1000000, "vcf_file_name": "late.vcf.gz" },
                    "1": { "begin": 0, "vcf_file_name": "early.vcf.gz" }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.column_partition(0).unwrap().begin(), 0);
        assert_eq!(
            config.column_partition(0).unwrap().vcf_file_name(),
            "early.vcf.gz"
        );
        assert_eq!(config.column_partition(1).unwrap().begin(), 1_000_000);
    }

    #[test]
    fn test_duplicate_begin_rejected() {
        let err = from_str(
            r#"{
                "workspace": "/data/ws",
                "array": ["array0", "array1"],
                "column_partitions": {
                    "0": { "begin": 7, "vcf_file_name": "a.vcf.gz" },
                    "1": { "begin": 7, "vcf_file_name": "b.vcf.gz" }
                }
            }"#,
        )
        .unwrap_err();

        assert!(matches!(err, TileVarJsonError::Config(_)));
    }

    #[test]
    fn test_missing_array_for_partition() {
        let err = from_str(
            r#"{
                "workspace": "/data/ws",
                "array": ["array0"],
                "column_partitions": {
                    "0": { "begin": 0, "vcf_file_name": "a.vcf.gz" },
                    "1": { "begin": 500, "vcf_file_name": "b.vcf.gz" }
                }
            }"#,
        )
        .unwrap_err();

        assert!(matches!(err, TileVarJsonError::Document(_)));
    }

    #[test]
    fn test_numeric_key_ordering() {
        // Lexicographic key order would put "10" before "2".
        let mut doc = String::from(
            r#"{"workspace": "/data/ws", "array": "shared_unused", "column_partitions": {"#,
        );
        for i in 0..11 {
            if i > 0 {
                doc.push(',');
            }
            doc.push_str(&format!(
                r#""{}": {{ "begin": {}, "vcf_file_name": "f{}.vcf.gz", "array": "array{}" }}"#,
                i,
                i * 100,
                i,
                i
            ));
        }
        doc.push_str("}}");

        let config = from_str(&doc).unwrap();

        assert_eq!(config.column_partitions_count(), 11);
        assert_eq!(config.column_partition(10).unwrap().begin(), 1000);
        assert_eq!(
            config.column_partition(10).unwrap().tiledb_config().array_name(),
            "array10"
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "workspace": "/data/ws",
                "array": "array0",
                "column_partitions": {{
                    "0": {{ "begin": 0, "vcf_file_name": "a.vcf.gz" }}
                }}
            }}"#
        )
        .unwrap();

        let config = from_file(file.path()).unwrap();

        assert_eq!(config.column_partitions_count(), 1);
    }

    #[test]
    fn test_invalid_json() {
        let err = from_str("not json").unwrap_err();

        assert!(matches!(err, TileVarJsonError::Json(_)));
    }
}
