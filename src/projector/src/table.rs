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

//! In-memory table and column projection.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use snafu::{ensure, OptionExt, ResultExt};

use crate::error::{ColumnNotFoundSnafu, InvalidSelectionSnafu, ProjectBatchSnafu, Result};

/// Columns kept by default, in output order.
pub const DEFAULT_COLUMNS: [&str; 3] = ["doc_id", "contents", "path"];

/// An ordered, non-empty list of distinct column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    names: Vec<String>,
}

impl ColumnSelection {
    /// Creates a selection, rejecting empty, blank or duplicated names.
    pub fn try_new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        ensure!(
            !names.is_empty(),
            InvalidSelectionSnafu {
                msg: "at least one column is required",
            }
        );

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            ensure!(
                !name.trim().is_empty(),
                InvalidSelectionSnafu {
                    msg: "column name must not be empty",
                }
            );
            ensure!(
                seen.insert(name.as_str()),
                InvalidSelectionSnafu {
                    msg: format!("column {name} is selected more than once"),
                }
            );
        }

        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self {
            names: DEFAULT_COLUMNS.iter().map(|name| name.to_string()).collect(),
        }
    }
}

/// Named, equal-length columns held as record batches sharing one schema.
///
/// The schema is kept separately so a table without any rows still knows its columns. It
/// is the authoritative one: batches decoded from parquet may lack the file's schema
/// metadata.
#[derive(Debug, Clone)]
pub struct Table {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Table {
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect()
    }

    /// Returns a new table holding only the selected columns, in selection order.
    ///
    /// Rows, values and schema metadata are carried over untouched. Fails on the first
    /// selected column the table does not have.
    pub fn project(&self, selection: &ColumnSelection) -> Result<Table> {
        let indices = selection
            .names()
            .iter()
            .map(|name| {
                self.schema
                    .column_with_name(name)
                    .map(|(index, _)| index)
                    .with_context(|| ColumnNotFoundSnafu {
                        column: name,
                        available: self
                            .column_names()
                            .into_iter()
                            .map(String::from)
                            .collect::<Vec<_>>(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let schema = Arc::new(self.schema.project(&indices).context(ProjectBatchSnafu)?);
        let batches = self
            .batches
            .iter()
            .map(|batch| batch.project(&indices).context(ProjectBatchSnafu))
            .collect::<Result<Vec<_>>>()?;

        Ok(Table::new(schema, batches))
    }
}
