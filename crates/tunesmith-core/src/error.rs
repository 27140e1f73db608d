// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tunesmith parameter optimizer.

use thiserror::Error;

/// The primary error type used across all Tunesmith crates.
///
/// The optimizer is advisory, so most bad inputs degrade to defaults rather
/// than producing an error; these variants cover configuration problems,
/// durable-storage failures, and genuinely unexpected internal faults.
#[derive(Debug, Error)]
pub enum TunesmithError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Pattern-store persistence errors (file read/write, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TunesmithError {
    /// Wrap any error as a storage failure.
    pub fn storage(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        TunesmithError::Storage {
            source: Box::new(source),
        }
    }
}
