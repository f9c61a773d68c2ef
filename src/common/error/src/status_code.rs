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

use std::fmt;

use strum::{AsRefStr, EnumIter, EnumString, FromRepr};

/// Common status code for public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter, FromRepr)]
pub enum StatusCode {
    // ====== Begin of common status code ==============
    /// Success.
    Success = 0,

    /// Unknown error.
    Unknown = 1000,
    /// Internal error.
    Internal = 1003,
    /// Invalid arguments.
    InvalidArguments = 1004,
    // ====== End of common status code ================

    // ====== Begin of table related status code =======
    /// A column required by the caller is absent from the table.
    TableColumnNotFound = 4002,
    // ====== End of table related status code =========

    // ====== Begin of storage related status code =====
    /// File could not be opened, read, created or written.
    StorageUnavailable = 5000,
    /// File content is not valid data of the expected format.
    ///
    /// Added for undecodable input files. 5001 is left unassigned.
    InvalidFormat = 5002,
    // ====== End of storage related status code =======
}

impl StatusCode {
    /// Returns `true` if `code` is success.
    pub fn is_success(code: u32) -> bool {
        Self::Success as u32 == code
    }

    /// Returns `true` if we should print an error log for an error with
    /// this status code.
    pub fn should_log_error(&self) -> bool {
        match self {
            StatusCode::Unknown
            | StatusCode::Internal
            | StatusCode::StorageUnavailable => true,
            StatusCode::Success
            | StatusCode::InvalidArguments
            | StatusCode::TableColumnNotFound
            | StatusCode::InvalidFormat => false,
        }
    }

    pub fn from_u32(value: u32) -> Option<Self> {
        StatusCode::from_repr(value as usize)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The current debug format is suitable to display.
        write!(f, "{self:?}")
    }
}
