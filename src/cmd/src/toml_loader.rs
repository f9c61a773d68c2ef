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

use serde::de::DeserializeOwned;
use snafu::ResultExt;

use crate::error::{ParseConfigSnafu, ReadConfigSnafu, Result};

/// Deserializes `T` from the toml file at `path`.
pub fn from_file<T: DeserializeOwned>(path: &str) -> Result<T> {
    let content = std::fs::read_to_string(path).context(ReadConfigSnafu { path })?;
    toml::from_str(&content).context(ParseConfigSnafu { path })
}
