// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tunesmith parameter optimizer.
//!
//! This crate provides the error type, the shared value types (use-case
//! categories, optimization context, parameter recommendations, historical
//! patterns), and the collaborator traits used throughout the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TunesmithError;
pub use traits::{SessionRecord, SessionSource};
pub use types::{
    ComplexityHint, HistoricalPattern, OptimizationContext, ParameterRecommendation, TimePressure,
    UseCase,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_has_all_variants() {
        let _config = TunesmithError::Config("test".into());
        let _storage = TunesmithError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _internal = TunesmithError::Internal("test".into());
    }

    #[test]
    fn storage_helper_wraps_source() {
        let err = TunesmithError::storage(std::io::Error::other("disk gone"));
        assert!(err.to_string().contains("disk gone"));
    }

    #[test]
    fn session_source_is_object_safe() {
        fn _assert(_s: &dyn SessionSource) {}
    }
}
