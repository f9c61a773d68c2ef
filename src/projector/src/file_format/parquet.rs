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

use std::fs::File;
use std::path::Path;

use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use common_telemetry::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::errors::ParquetError;
use snafu::{ensure, ResultExt};

use crate::error::{
    CreateOutputSnafu, DecodeRecordBatchSnafu, InputNotFileSnafu, OpenInputSnafu,
    ReadInputSnafu, ReadParquetSnafu, Result, SyncOutputSnafu, WriteParquetSnafu,
};
use crate::options::WriteOptions;
use crate::table::Table;

/// Reads the whole parquet file at `path` into memory.
pub fn read_table(path: &Path, batch_size: usize) -> Result<Table> {
    let path_str = path.display().to_string();
    let file = File::open(path).context(OpenInputSnafu { path: &path_str })?;
    let is_file = file
        .metadata()
        .context(OpenInputSnafu { path: &path_str })?
        .is_file();
    ensure!(is_file, InputNotFileSnafu { path: &path_str });

    let builder = match ParquetRecordBatchReaderBuilder::try_new(file) {
        Ok(builder) => builder,
        Err(e) if is_io_error(&e) => return Err(e).context(ReadInputSnafu { path: &path_str }),
        Err(e) => return Err(e).context(ReadParquetSnafu { path: &path_str }),
    };
    let metadata = builder.metadata();
    debug!(
        "Opened parquet file {}, rows: {}, row groups: {}",
        path_str,
        metadata.file_metadata().num_rows(),
        metadata.num_row_groups()
    );

    let schema = builder.schema().clone();
    let reader = builder
        .with_batch_size(batch_size)
        .build()
        .context(ReadParquetSnafu { path: &path_str })?;
    let batches = reader
        .collect::<std::result::Result<Vec<RecordBatch>, ArrowError>>()
        .context(DecodeRecordBatchSnafu { path: &path_str })?;

    Ok(Table::new(schema, batches))
}

/// Returns true if `error` was raised by the underlying reader rather than by decoding.
fn is_io_error(error: &ParquetError) -> bool {
    matches!(error, ParquetError::External(source) if source.is::<std::io::Error>())
}

/// Writes `table` to `path`, truncating any existing file.
///
/// Returns the size of the written file in bytes.
pub fn write_table(table: &Table, path: &Path, opts: &WriteOptions) -> Result<u64> {
    let path_str = path.display().to_string();
    let file = File::create(path).context(CreateOutputSnafu { path: &path_str })?;

    let mut writer = ArrowWriter::try_new(
        file,
        table.schema().clone(),
        Some(opts.writer_properties()),
    )
    .context(WriteParquetSnafu { path: &path_str })?;
    for batch in table.batches() {
        writer
            .write(batch)
            .context(WriteParquetSnafu { path: &path_str })?;
    }
    // Flushes pending row groups and writes the footer.
    let file = writer
        .into_inner()
        .context(WriteParquetSnafu { path: &path_str })?;

    file.sync_all().context(SyncOutputSnafu { path: &path_str })?;
    let written = file
        .metadata()
        .context(SyncOutputSnafu { path: &path_str })?
        .len();

    debug!(
        "Wrote parquet file {}, rows: {}, bytes: {}",
        path_str,
        table.num_rows(),
        written
    );
    Ok(written)
}
