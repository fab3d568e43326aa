// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures outside the in-memory stores: persistence and input parsing.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine platform-specific data dir")]
    NoDataDir,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Invalid color '{0}', expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("Category '{0}' not found")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
