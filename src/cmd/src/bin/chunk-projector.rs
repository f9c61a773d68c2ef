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

#![allow(clippy::print_stderr)]

use std::process::ExitCode;

use clap::Parser;
use cmd::Command;
use common_error::ext::ErrorExt;
use common_telemetry::{error, info, warn};

fn main() -> ExitCode {
    let cmd = Command::parse();

    let opts = match cmd.load_options() {
        Ok(opts) => opts,
        Err(e) => {
            // Logging is not initialized yet.
            eprintln!("{}", e.output_msg());
            return ExitCode::FAILURE;
        }
    };

    let instance = match cmd.build(opts) {
        Ok(instance) => instance,
        Err(e) => {
            error!("Failed to build {}: {:?}", cmd::APP_NAME, e);
            eprintln!("{}", e.output_msg());
            return ExitCode::FAILURE;
        }
    };

    match instance.start() {
        Ok(summary) => {
            info!("{} finished: {:?}", instance.name(), summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if e.status_code().should_log_error() {
                error!(
                    "{} failed, status: {}, error: {:?}",
                    instance.name(),
                    e.status_code(),
                    e
                );
            } else {
                warn!(
                    "{} failed, status: {}, error: {}",
                    instance.name(),
                    e.status_code(),
                    e.output_msg()
                );
            }
            eprintln!("{}", e.output_msg());
            ExitCode::FAILURE
        }
    }
}
