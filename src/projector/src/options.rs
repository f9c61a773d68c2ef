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

use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use strum::{Display, EnumString};

use crate::error::{InvalidOptionsSnafu, Result};
use crate::file_format::{DEFAULT_READ_BATCH_SIZE, DEFAULT_ROW_GROUP_SIZE};
use crate::table::{ColumnSelection, DEFAULT_COLUMNS};

pub const DEFAULT_INPUT_PATH: &str = "chunk.parquet";
pub const DEFAULT_OUTPUT_PATH: &str = "chunk2.parquet";

/// Compression codec of the output file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CompressionType {
    Uncompressed,
    #[default]
    Snappy,
    Zstd,
}

impl From<CompressionType> for Compression {
    fn from(value: CompressionType) -> Self {
        match value {
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Zstd => Compression::ZSTD(ZstdLevel::default()),
        }
    }
}

/// Parquet write options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Compression codec for every column.
    pub compression: CompressionType,
    /// Max number of rows in a row group.
    pub row_group_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::default(),
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }
}

impl WriteOptions {
    pub fn writer_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression.into())
            .set_max_row_group_size(self.row_group_size)
            .build()
    }
}

/// Options of a projection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorOptions {
    /// Path of the parquet file to read.
    pub input: String,
    /// Path of the parquet file to write. Overwritten if it exists.
    pub output: String,
    /// Columns to keep, in output order.
    pub columns: Vec<String>,
    /// Rows decoded into each record batch while loading.
    pub read_batch_size: usize,
    /// Loads and projects without writing the output.
    pub dry_run: bool,
    pub write: WriteOptions,
}

impl Default for ProjectorOptions {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT_PATH.to_string(),
            output: DEFAULT_OUTPUT_PATH.to_string(),
            columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            read_batch_size: DEFAULT_READ_BATCH_SIZE,
            dry_run: false,
            write: WriteOptions::default(),
        }
    }
}

impl ProjectorOptions {
    /// Checks the options and builds the column selection.
    pub fn validate(&self) -> Result<ColumnSelection> {
        ensure!(
            !self.input.is_empty(),
            InvalidOptionsSnafu {
                msg: "input path must not be empty",
            }
        );
        ensure!(
            !self.output.is_empty(),
            InvalidOptionsSnafu {
                msg: "output path must not be empty",
            }
        );
        ensure!(
            self.read_batch_size > 0,
            InvalidOptionsSnafu {
                msg: "read_batch_size must be positive",
            }
        );
        ensure!(
            self.write.row_group_size > 0,
            InvalidOptionsSnafu {
                msg: "write.row_group_size must be positive",
            }
        );

        ColumnSelection::try_new(self.columns.iter().map(String::as_str))
    }
}
