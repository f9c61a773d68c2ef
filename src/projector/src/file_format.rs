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

pub mod parquet;

pub use self::parquet::{read_table, write_table};

/// Default number of rows decoded into each record batch.
pub const DEFAULT_READ_BATCH_SIZE: usize = 8192;
/// Default maximum number of rows in a written row group.
pub const DEFAULT_ROW_GROUP_SIZE: usize = 100 * 1024;
