// Copyright 2023 Greptime Team
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

//! Projects a fixed, ordered set of columns out of a parquet file into a new parquet file.

pub mod error;
pub mod file_format;
pub mod options;
pub mod projector;
pub mod table;
#[cfg(test)]
pub(crate) mod test_util;

pub use projector::{ProjectionSummary, Projector};
pub use table::{ColumnSelection, Table, DEFAULT_COLUMNS};
