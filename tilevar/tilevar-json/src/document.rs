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

use std::collections::BTreeMap;

use serde::Deserialize;

/// A field that historic documents write either as a single string shared by
/// every partition or as one string per partition.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Resolve the value for partition `index`, if the field covers it.
    pub(crate) fn get(&self, index: usize) -> Option<&str> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.get(index).map(String::as_str),
        }
    }
}

/// One entry of the `column_partitions` dictionary.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawPartition {
    pub(crate) begin: u64,

    pub(crate) vcf_file_name: String,

    /// Overrides the document-level workspace for this partition.
    #[serde(default)]
    pub(crate) workspace: Option<String>,

    /// Overrides the document-level array for this partition.
    #[serde(default)]
    pub(crate) array: Option<String>,
}

/// The raw shape of an import configuration document.
///
/// `column_partitions` is an object keyed by partition index strings,
/// `{ "0": { "begin": 0, ... }, "1": { ... } }`, the shape the original
/// tooling emitted. Unknown top-level fields are ignored, documents often
/// carry query-side fields the import path does not consume.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ImportDocument {
    #[serde(default)]
    pub(crate) workspace: Option<OneOrMany>,

    #[serde(default)]
    pub(crate) array: Option<OneOrMany>,

    #[serde(default)]
    pub(crate) column_partitions: Option<BTreeMap<String, RawPartition>>,

    #[serde(default)]
    pub(crate) delete_and_create_tiledb_array: Option<bool>,

    #[serde(default)]
    pub(crate) do_ping_pong_buffering: Option<bool>,

    #[serde(default)]
    pub(crate) produce_tiledb_array: Option<bool>,

    #[serde(default)]
    pub(crate) produce_combined_vcf: Option<bool>,

    #[serde(default)]
    pub(crate) num_parallel_vcf_files: Option<usize>,

    #[serde(default)]
    pub(crate) size_per_column_partition: Option<u64>,

    #[serde(default)]
    pub(crate) row_based_partitioning: Option<bool>,

    #[serde(default)]
    pub(crate) callset_mapping_file: Option<String>,

    #[serde(default)]
    pub(crate) discard_vcf_index: Option<bool>,

    #[serde(default)]
    pub(crate) offload_vcf_output_processing: Option<bool>,
}
