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

use std::any::Any;

use arrow::error::ArrowError;
use common_error::ext::ErrorExt;
use common_error::status_code::StatusCode;
use parquet::errors::ParquetError;
use snafu::{Location, Snafu};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to open input file: {}", path))]
    OpenInput {
        path: String,
        #[snafu(source)]
        error: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Input is not a regular file: {}", path))]
    InputNotFile {
        path: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Failed to read input file: {}", path))]
    ReadInput {
        path: String,
        #[snafu(source)]
        error: ParquetError,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Failed to read parquet file: {}", path))]
    ReadParquet {
        path: String,
        #[snafu(source)]
        error: ParquetError,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Failed to decode record batch from parquet file: {}", path))]
    DecodeRecordBatch {
        path: String,
        #[snafu(source)]
        error: ArrowError,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display(
        "Column {} not found in table, available columns: {:?}",
        column,
        available
    ))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Failed to project record batch"))]
    ProjectBatch {
        #[snafu(source)]
        error: ArrowError,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid column selection: {}", msg))]
    InvalidSelection {
        msg: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid projector options: {}", msg))]
    InvalidOptions {
        msg: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Failed to create output file: {}", path))]
    CreateOutput {
        path: String,
        #[snafu(source)]
        error: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Failed to write parquet file: {}", path))]
    WriteParquet {
        path: String,
        #[snafu(source)]
        error: ParquetError,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Failed to sync output file: {}", path))]
    SyncOutput {
        path: String,
        #[snafu(source)]
        error: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl ErrorExt for Error {
    fn status_code(&self) -> StatusCode {
        use Error::*;
        match self {
            OpenInput { .. }
            | InputNotFile { .. }
            | ReadInput { .. }
            | CreateOutput { .. }
            | WriteParquet { .. }
            | SyncOutput { .. } => StatusCode::StorageUnavailable,

            ReadParquet { .. } | DecodeRecordBatch { .. } => StatusCode::InvalidFormat,

            ColumnNotFound { .. } => StatusCode::TableColumnNotFound,

            ProjectBatch { .. } => StatusCode::Internal,

            InvalidSelection { .. } | InvalidOptions { .. } => StatusCode::InvalidArguments,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use snafu::{IntoError, ResultExt};

    use super::*;

    #[test]
    fn test_project_batch_is_internal() {
        let err = Err::<(), _>(ArrowError::SchemaError("index out of bounds".to_string()))
            .context(ProjectBatchSnafu)
            .unwrap_err();
        assert_eq!(StatusCode::Internal, err.status_code());
        assert!(err.status_code().should_log_error());
    }

    #[test]
    fn test_read_failures_status_code() {
        let io_err = ParquetError::from(std::io::Error::other("device error"));
        let err = ReadInputSnafu { path: "chunk.parquet" }.into_error(io_err);
        assert_eq!(StatusCode::StorageUnavailable, err.status_code());

        let err = InputNotFileSnafu { path: "chunks" }.build();
        assert_eq!(StatusCode::StorageUnavailable, err.status_code());

        let err = ReadParquetSnafu { path: "chunk.parquet" }
            .into_error(ParquetError::General("invalid magic".to_string()));
        assert_eq!(StatusCode::InvalidFormat, err.status_code());
    }
}
