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

use std::path::Path;

use clap::Parser;
use common_telemetry::info;
use common_telemetry::tracing_appender::non_blocking::WorkerGuard;
use projector::options::CompressionType;
use projector::{ProjectionSummary, Projector};
use snafu::{ensure, ResultExt};

use crate::error::{BuildProjectorSnafu, IllegalConfigSnafu, Result, RunProjectorSnafu};
use crate::options::{ChunkProjectorOptions, GlobalOptions};

pub mod error;
pub mod options;
mod toml_loader;

pub const APP_NAME: &str = "chunk-projector";

/// Keeps the `doc_id`, `contents` and `path` columns of a parquet chunk file.
///
/// Without arguments, reads `chunk.parquet` and writes `chunk2.parquet` in the working directory.
#[derive(Debug, Parser)]
#[command(name = APP_NAME, version)]
pub struct Command {
    #[clap(flatten)]
    pub global_options: GlobalOptions,

    /// Parquet file to read.
    #[clap(long)]
    pub input: Option<String>,

    /// Parquet file to write, overwritten if it exists.
    #[clap(long)]
    pub output: Option<String>,

    /// Comma separated columns to keep, in output order.
    #[clap(long, value_delimiter = ',', num_args = 1..)]
    pub columns: Option<Vec<String>>,

    /// Compression of the output file: uncompressed, snappy or zstd.
    #[clap(long)]
    pub compression: Option<CompressionType>,

    /// Loads and projects the input without writing the output.
    #[clap(long)]
    pub dry_run: bool,

    #[clap(short, long)]
    pub config_file: Option<String>,
}

impl Command {
    /// Resolves options from, in order of precedence, command line flags, the config
    /// file and built-in defaults.
    pub fn load_options(&self) -> Result<ChunkProjectorOptions> {
        let mut opts: ChunkProjectorOptions = if let Some(path) = &self.config_file {
            toml_loader::from_file(path)?
        } else {
            ChunkProjectorOptions::default()
        };

        if let Some(dir) = &self.global_options.log_dir {
            opts.logging.dir.clone_from(dir);
        }
        if self.global_options.log_level.is_some() {
            opts.logging.level.clone_from(&self.global_options.log_level);
        }

        let projector_opts = &mut opts.projector;
        if let Some(input) = &self.input {
            projector_opts.input.clone_from(input);
        }
        if let Some(output) = &self.output {
            projector_opts.output.clone_from(output);
        }
        if let Some(columns) = &self.columns {
            projector_opts.columns = columns.iter().map(|c| c.trim().to_string()).collect();
        }
        if let Some(compression) = self.compression {
            projector_opts.write.compression = compression;
        }
        if self.dry_run {
            projector_opts.dry_run = true;
        }

        ensure!(
            !is_same_file(&projector_opts.input, &projector_opts.output),
            IllegalConfigSnafu {
                msg: format!(
                    "input and output refer to the same file: {}",
                    projector_opts.input
                ),
            }
        );

        Ok(opts)
    }

    /// Initializes logging and creates the projector.
    pub fn build(&self, opts: ChunkProjectorOptions) -> Result<Instance> {
        let guard = common_telemetry::init_global_logging(APP_NAME, &opts.logging);
        log_versions();

        info!("Chunk projector options: {:#?}", opts.projector);
        let projector = Projector::try_new(opts.projector).context(BuildProjectorSnafu)?;

        Ok(Instance::new(projector, guard))
    }
}

pub struct Instance {
    projector: Projector,

    // Keep the logging guard to prevent the worker from being dropped.
    _guard: Vec<WorkerGuard>,
}

impl Instance {
    fn new(projector: Projector, guard: Vec<WorkerGuard>) -> Self {
        Self {
            projector,
            _guard: guard,
        }
    }

    pub fn name(&self) -> &str {
        APP_NAME
    }

    pub fn start(&self) -> Result<ProjectionSummary> {
        self.projector.run().with_context(|_| RunProjectorSnafu {
            input: self.projector.input().display().to_string(),
            output: self.projector.output().display().to_string(),
        })
    }
}

/// Compares the two paths as given and, when both exist, after resolving them.
fn is_same_file(a: &str, b: &str) -> bool {
    let (a, b) = (Path::new(a), Path::new(b));
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

pub fn log_versions() {
    info!("{} version: {}", APP_NAME, env!("CARGO_PKG_VERSION"));

    info!("command line arguments");
    for argument in std::env::args() {
        info!("argument: {}", argument);
    }
}
