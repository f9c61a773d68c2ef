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

mod tests {
    use std::fs::File;
    use std::path::Path;
    use std::process::{Command, Output};
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Int64Array, StringArray};
    use arrow::compute::concat_batches;
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use parquet::arrow::ArrowWriter;

    fn run_projector(dir: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_chunk-projector"))
            .current_dir(dir)
            .args(args)
            .env("RUST_LOG", "info")
            .output()
            .unwrap()
    }

    fn write_chunk(path: &Path, with_path_column: bool) {
        let mut fields = vec![
            Field::new("doc_id", DataType::Int64, false),
            Field::new("contents", DataType::Utf8, true),
        ];
        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![1, 2])),
            Arc::new(StringArray::from(vec!["a", "b"])),
        ];
        if with_path_column {
            fields.push(Field::new("path", DataType::Utf8, true));
            columns.push(Arc::new(StringArray::from(vec!["/x", "/y"])));
        }
        fields.push(Field::new("extra", DataType::Int64, true));
        columns.push(Arc::new(Int64Array::from(vec![9, 8])));

        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        let mut writer = ArrowWriter::try_new(File::create(path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    fn read_chunk(path: &Path) -> RecordBatch {
        let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path).unwrap()).unwrap();
        let schema = builder.schema().clone();
        let batches = builder
            .build()
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        concat_batches(&schema, &batches).unwrap()
    }

    #[test]
    fn test_project_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_chunk(&dir.path().join("chunk.parquet"), true);

        let output = run_projector(dir.path(), &[]);
        assert!(output.status.success(), "{output:?}");

        let batch = read_chunk(&dir.path().join("chunk2.parquet"));
        let schema = batch.schema();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(vec!["doc_id", "contents", "path"], names);

        let doc_ids = batch
            .column(0)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        let contents = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        let paths = batch
            .column(2)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(vec![1, 2], doc_ids.values().to_vec());
        assert_eq!(vec![Some("a"), Some("b")], contents.iter().collect::<Vec<_>>());
        assert_eq!(vec![Some("/x"), Some("/y")], paths.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_rerun_produces_identical_file() {
        let dir = tempfile::tempdir().unwrap();
        write_chunk(&dir.path().join("chunk.parquet"), true);

        assert!(run_projector(dir.path(), &[]).status.success());
        let first = std::fs::read(dir.path().join("chunk2.parquet")).unwrap();
        assert!(run_projector(dir.path(), &[]).status.success());
        let second = std::fs::read(dir.path().join("chunk2.parquet")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();

        let output = run_projector(dir.path(), &[]);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("chunk.parquet"));
        assert!(!dir.path().join("chunk2.parquet").exists());
    }

    #[test]
    fn test_missing_path_column() {
        let dir = tempfile::tempdir().unwrap();
        write_chunk(&dir.path().join("chunk.parquet"), false);

        let output = run_projector(dir.path(), &[]);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Column path not found"));
        assert!(!dir.path().join("chunk2.parquet").exists());
    }

    #[test]
    fn test_custom_paths_and_columns() {
        let dir = tempfile::tempdir().unwrap();
        write_chunk(&dir.path().join("in.parquet"), true);

        let output = run_projector(
            dir.path(),
            &[
                "--input",
                "in.parquet",
                "--output",
                "out.parquet",
                "--columns",
                "extra,doc_id",
            ],
        );
        assert!(output.status.success(), "{output:?}");

        let batch = read_chunk(&dir.path().join("out.parquet"));
        assert_eq!(2, batch.num_columns());
        assert_eq!("extra", batch.schema().field(0).name());
        assert_eq!("doc_id", batch.schema().field(1).name());
        assert!(!dir.path().join("chunk2.parquet").exists());
    }
}
