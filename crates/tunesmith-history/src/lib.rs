// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Historical pattern learning for Tunesmith.
//!
//! Tracks which sampling parameters actually worked per use case and model,
//! persists the rolling averages to disk on a write cadence, and can
//! bootstrap itself from past conversation sessions.

pub mod bootstrap;
pub mod storage;
pub mod store;

pub use bootstrap::bootstrap_from_sessions;
pub use storage::{JsonFileStorage, PatternStorage};
pub use store::{PatternStore, StoreSummary};
