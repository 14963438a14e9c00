// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while evaluating keypad input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Result is outside the range the ten cells can show
    #[error("OVERFLOW.")]
    Overflow,
    #[error("div/0")]
    DivideByZero,
    /// Entry buffer could not be read as a number
    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

/// Errors from loading device configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
