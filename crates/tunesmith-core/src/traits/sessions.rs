// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only session source consumed by the bootstrap-learning routine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TunesmithError;

/// A past conversation session as exposed by the persistence collaborator.
///
/// Only the fields the bootstrap routine needs: the agent's sampling
/// configuration, the transcript turns, and free-text notes describing what
/// the session was about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session identifier, used only for logging.
    pub id: String,
    /// Model the session ran against.
    pub model_id: String,
    /// Temperature the session's agent was configured with.
    pub temperature: f64,
    /// Nucleus sampling threshold the session's agent was configured with.
    pub nucleus_p: f64,
    /// Configured output token budget.
    pub max_tokens: u32,
    /// Ordered transcript turns (role-agnostic text).
    pub transcript: Vec<String>,
    /// Free-text notes or metadata describing the session's task.
    pub notes: String,
}

/// Listing/loading capability over past conversation sessions.
///
/// Implemented by the external persistence layer; the optimizer only ever
/// reads through this trait and never writes sessions.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// List the most recent sessions, newest first, up to `limit`.
    async fn recent_sessions(&self, limit: usize) -> Result<Vec<SessionRecord>, TunesmithError>;
}
