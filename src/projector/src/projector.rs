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

//! Load, project and store a chunk file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use common_telemetry::{info, warn};

use crate::error::Result;
use crate::file_format;
use crate::options::{ProjectorOptions, WriteOptions};
use crate::table::{ColumnSelection, Table};

/// Outcome of [`Projector::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionSummary {
    /// Rows in the input file, equal to the rows written.
    pub num_rows: usize,
    /// Number of columns in the input file.
    pub input_columns: usize,
    /// Columns of the output, in order.
    pub output_columns: Vec<String>,
    /// Size of the output file. `None` on a dry run.
    pub bytes_written: Option<u64>,
}

/// Reads an input parquet file, keeps the selected columns and writes them to an output
/// parquet file.
#[derive(Debug)]
pub struct Projector {
    input: PathBuf,
    output: PathBuf,
    selection: ColumnSelection,
    read_batch_size: usize,
    write_opts: WriteOptions,
    dry_run: bool,
}

impl Projector {
    /// Creates a projector from validated `opts`.
    pub fn try_new(opts: ProjectorOptions) -> Result<Self> {
        let selection = opts.validate()?;
        Ok(Self {
            input: PathBuf::from(opts.input),
            output: PathBuf::from(opts.output),
            selection,
            read_batch_size: opts.read_batch_size,
            write_opts: opts.write,
            dry_run: opts.dry_run,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn selection(&self) -> &ColumnSelection {
        &self.selection
    }

    /// Reads the whole input file.
    pub fn load(&self) -> Result<Table> {
        file_format::read_table(&self.input, self.read_batch_size)
    }

    /// Keeps the selected columns of `table`.
    pub fn project(&self, table: &Table) -> Result<Table> {
        table.project(&self.selection)
    }

    /// Writes `table` to the output file and returns the bytes written.
    pub fn store(&self, table: &Table) -> Result<u64> {
        file_format::write_table(table, &self.output, &self.write_opts)
    }

    /// Runs load, project and store in order.
    ///
    /// The output file is only touched after the projection succeeds.
    pub fn run(&self) -> Result<ProjectionSummary> {
        let now = Instant::now();

        let table = self.load()?;
        info!(
            "Loaded {} rows and {} columns from {}",
            table.num_rows(),
            table.num_columns(),
            self.input.display()
        );

        let projected = self.project(&table)?;
        let summary = ProjectionSummary {
            num_rows: projected.num_rows(),
            input_columns: table.num_columns(),
            output_columns: projected
                .column_names()
                .into_iter()
                .map(String::from)
                .collect(),
            bytes_written: None,
        };
        drop(table);

        if self.dry_run {
            warn!(
                "Running in dry mode: {} is not written",
                self.output.display()
            );
            return Ok(summary);
        }

        let bytes_written = self.store(&projected)?;
        info!(
            "Projected {:?} into {}, rows: {}, bytes: {}, elapsed: {:?}",
            summary.output_columns,
            self.output.display(),
            summary.num_rows,
            bytes_written,
            now.elapsed()
        );

        Ok(ProjectionSummary {
            bytes_written: Some(bytes_written),
            ..summary
        })
    }
}
