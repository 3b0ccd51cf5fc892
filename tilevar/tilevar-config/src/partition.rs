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
use crate::tiledb_config::TileDbConfig;

/// One unit of column-range work: a start coordinate, the VCF file that
/// contributes data to the range, and the storage target for the range.
///
/// A partition's exclusive end is never stored, it is derived from the begin
/// of the next partition in the configuration's ordering (see the `plan`
/// module). The last partition is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    begin: u64,
    vcf_file_name: String,
    tiledb_config: TileDbConfig,
}

impl Partition {
    /// Create a builder for a `Partition`.
    pub fn builder() -> PartitionBuilder {
        PartitionBuilder::new()
    }

    /// The inclusive start coordinate of this partition's column range.
    ///
    /// When the owning configuration sets `row_based_partitioning`, this is a
    /// row index instead of a genomic coordinate.
    pub fn begin(&self) -> u64 {
        self.begin
    }

    /// The path of the source VCF file for this partition.
    pub fn vcf_file_name(&self) -> &str {
        &self.vcf_file_name
    }

    /// The storage target that receives this partition's data.
    pub fn tiledb_config(&self) -> &TileDbConfig {
        &self.tiledb_config
    }

    pub(crate) fn validate(&self) -> ConfigResult<()> {
        if self.vcf_file_name.is_empty() {
            return Err(ConfigError::EmptyField("vcf_file_name"));
        }

        self.tiledb_config.validate()
    }
}

/// A builder for [`Partition`].
#[derive(Debug, Clone, Default)]
pub struct PartitionBuilder {
    begin: Option<u64>,
    vcf_file_name: Option<String>,
    tiledb_config: Option<TileDbConfig>,
}

impl PartitionBuilder {
    /// Create a new builder with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inclusive start coordinate.
    ///
    /// There is no implicit default: zero is a valid coordinate, so a
    /// partition whose begin was never set fails to build.
    pub fn begin(mut self, begin: u64) -> Self {
        self.begin = Some(begin);
        self
    }

    /// Set the source VCF file name.
    pub fn vcf_file_name(mut self, vcf_file_name: impl Into<String>) -> Self {
        self.vcf_file_name = Some(vcf_file_name.into());
        self
    }

    /// Set the storage target.
    pub fn tiledb_config(mut self, tiledb_config: TileDbConfig) -> Self {
        self.tiledb_config = Some(tiledb_config);
        self
    }

    /// Build the immutable `Partition`.
    pub fn build(self) -> ConfigResult<Partition> {
        let begin = self.begin.ok_or(ConfigError::MissingField("begin"))?;

        let vcf_file_name = self
            .vcf_file_name
            .ok_or(ConfigError::MissingField("vcf_file_name"))?;

        let tiledb_config = self
            .tiledb_config
            .ok_or(ConfigError::MissingField("tiledb_config"))?;

        let partition = Partition {
            begin,
            vcf_file_name,
            tiledb_config,
        };
        partition.validate()?;

        Ok(partition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_target(array_name: &str) -> TileDbConfig {
        TileDbConfig::builder()
            .workspace("/data/ws")
            .array_name(array_name)
            .build()
            .unwrap()
    }

    #[test]
    fn test_build() {
        let partition = Partition::builder()
            .begin(1_000_000)
            .vcf_file_name("sample.vcf.gz")
            .tiledb_config(test_target("chr1"))
            .build()
            .unwrap();

        assert_eq!(partition.begin(), 1_000_000);
        assert_eq!(partition.vcf_file_name(), "sample.vcf.gz");
        assert_eq!(partition.tiledb_config().array_name(), "chr1");
    }

    #[test]
    fn test_begin_zero_is_valid() {
        let partition = Partition::builder()
            .begin(0)
            .vcf_file_name("sample.vcf.gz")
            .tiledb_config(test_target("chr1"))
            .build()
            .unwrap();

        assert_eq!(partition.begin(), 0);
    }

    #[test]
    fn test_unset_begin_fails() {
        let err = Partition::builder()
            .vcf_file_name("sample.vcf.gz")
            .tiledb_config(test_target("chr1"))
            .build()
            .unwrap_err();

        assert_eq!(err, ConfigError::MissingField("begin"));
    }

    #[test]
    fn test_empty_vcf_file_name_fails() {
        let err = Partition::builder()
            .begin(0)
            .vcf_file_name("")
            .tiledb_config(test_target("chr1"))
            .build()
            .unwrap_err();

        assert_eq!(err, ConfigError::EmptyField("vcf_file_name"));
    }

    #[test]
    fn test_unset_tiledb_config_fails() {
        let err = Partition::builder()
            .begin(0)
            .vcf_file_name("sample.vcf.gz")
            .build()
            .unwrap_err();

        assert_eq!(err, ConfigError::MissingField("tiledb_config"));
    }
}
