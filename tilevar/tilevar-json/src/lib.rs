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

//! JSON documents for TileVar import configurations.
//!
//! Two surfaces: [`loader`] reads the historic document shape (shared or
//! per-partition `workspace`/`array` fields, a `column_partitions` dictionary
//! keyed by index) and produces a validated
//! [`ImportConfiguration`](tilevar_config::ImportConfiguration); [`codec`] is
//! the versioned wire form that round-trips a built configuration losslessly,
//! presence bits included.

mod error;

pub use error::TileVarJsonError;
pub use error::TileVarJsonResult;

mod document;

/// Loading import configurations from JSON documents.
pub mod loader;

/// Versioned encode/decode for built configurations.
pub mod codec;
