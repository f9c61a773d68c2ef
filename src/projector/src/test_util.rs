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
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::compute::concat_batches;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;

use crate::table::Table;

/// Schema of a chunk file: the three projected columns plus one extra column.
pub fn chunk_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("doc_id", DataType::Int64, false),
        Field::new("contents", DataType::Utf8, true),
        Field::new("path", DataType::Utf8, true),
        Field::new("extra", DataType::Int64, true),
    ]))
}

/// `[{doc_id:1, contents:"a", path:"/x", extra:9}, {doc_id:2, contents:"b", path:"/y", extra:8}]`
pub fn chunk_batch() -> RecordBatch {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(vec![1, 2])),
        Arc::new(StringArray::from(vec!["a", "b"])),
        Arc::new(StringArray::from(vec!["/x", "/y"])),
        Arc::new(Int64Array::from(vec![9, 8])),
    ];
    RecordBatch::try_new(chunk_schema(), columns).unwrap()
}

pub fn chunk_table() -> Table {
    Table::new(chunk_schema(), vec![chunk_batch()])
}

/// A chunk batch with `rows` rows whose values are derived from the row index.
pub fn numbered_chunk_batch(rows: usize) -> RecordBatch {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(0..rows as i64)),
        Arc::new(StringArray::from_iter_values(
            (0..rows).map(|i| format!("contents-{i}")),
        )),
        Arc::new(StringArray::from_iter_values(
            (0..rows).map(|i| format!("/docs/{}.md", i % 7)),
        )),
        Arc::new(Int64Array::from_iter_values((0..rows as i64).rev())),
    ];
    RecordBatch::try_new(chunk_schema(), columns).unwrap()
}

/// Writes `batches` into a parquet file at `path` with default writer properties.
pub fn write_parquet(path: &Path, schema: SchemaRef, batches: &[RecordBatch]) {
    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    for batch in batches {
        writer.write(batch).unwrap();
    }
    writer.close().unwrap();
}

/// Reads the whole parquet file at `path` into a single batch.
pub fn read_parquet(path: &Path) -> RecordBatch {
    let file = File::open(path).unwrap();
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
    let schema = builder.schema().clone();
    let batches = builder
        .build()
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    concat_batches(&schema, &batches).unwrap()
}
