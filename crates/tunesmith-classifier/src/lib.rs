// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Use-case classification for the Tunesmith parameter optimizer.
//!
//! This crate provides [`UseCaseClassifier`]: a deterministic, zero-latency
//! keyword-scoring classifier that maps free-text task descriptions to one
//! of the fixed [`tunesmith_core::UseCase`] categories together with a
//! confidence score, runner-up categories, and context hints.
//!
//! Classification is heuristic pattern scoring over static tables, not a
//! learned model; ambiguity is expressed as low confidence and the `Other`
//! category, never as an error.

pub mod classifier;
mod patterns;

pub use classifier::{ClassificationResult, UseCaseClassifier};
