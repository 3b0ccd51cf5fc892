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

//! Versioned wire form for a built [`ImportConfiguration`].
//!
//! The encoding is a JSON envelope carrying a format version and the
//! configuration itself. Unset optional fields are omitted from the output,
//! so presence bits survive a round trip: `decode(encode(c)) == c` for every
//! valid `c`, field for field, in partition order.

use serde::{Deserialize, Serialize};

use tilevar_config::ImportConfiguration;

use crate::error::{TileVarJsonError, TileVarJsonResult};

/// The envelope version this build reads and writes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope {
    format_version: u32,
    import_configuration: ImportConfiguration,
}

/// Encode a configuration into its versioned wire form.
pub fn encode(config: &ImportConfiguration) -> TileVarJsonResult<Vec<u8>> {
    let envelope = Envelope {
        format_version: FORMAT_VERSION,
        import_configuration: config.clone(),
    };

    Ok(serde_json::to_vec(&envelope)?)
}

/// Decode a configuration from its versioned wire form.
///
/// Rejects unknown versions, then re-runs core validation so a decoded value
/// upholds the same invariants as a built one.
pub fn decode(bytes: &[u8]) -> TileVarJsonResult<ImportConfiguration> {
    let envelope: Envelope = serde_json::from_slice(bytes)?;

    if envelope.format_version != FORMAT_VERSION {
        return Err(TileVarJsonError::UnsupportedVersion {
            found: envelope.format_version,
            supported: FORMAT_VERSION,
        });
    }

    envelope.import_configuration.validate()?;

    Ok(envelope.import_configuration)
}
