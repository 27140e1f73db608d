// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! The optimizer core never performs network or UI work itself; external
//! collaborators are reached only through the seams defined here.

pub mod sessions;

pub use sessions::{SessionRecord, SessionSource};
