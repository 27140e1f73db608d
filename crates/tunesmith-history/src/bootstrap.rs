// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bootstrap learning from past conversation sessions.
//!
//! Synthesizes historical patterns from a read-only session collaborator
//! so a fresh deployment does not start with an empty store. Transcript
//! length serves as the success proxy; session notes are classified with
//! the use-case classifier. Any individual bad session is skipped.

use tracing::{info, warn};
use tunesmith_classifier::UseCaseClassifier;
use tunesmith_core::{SessionRecord, SessionSource, TunesmithError};

use crate::store::PatternStore;

/// Transcript turn count at which the success proxy saturates at 1.0.
const PROXY_SATURATION_TURNS: f64 = 20.0;

/// Sessions shorter than this carry no usable signal and are skipped.
const MIN_TRANSCRIPT_TURNS: usize = 2;

/// Scan recent sessions and record synthesized patterns into the store.
///
/// Returns the number of sessions recorded. Failures inside any individual
/// session are logged and skipped; only a failure to list sessions at all
/// is surfaced.
pub async fn bootstrap_from_sessions(
    store: &PatternStore,
    source: &dyn SessionSource,
    session_limit: usize,
) -> Result<usize, TunesmithError> {
    let sessions = source.recent_sessions(session_limit).await?;
    let classifier = UseCaseClassifier::new();

    let mut recorded = 0usize;
    for session in &sessions {
        match synthesize(store, &classifier, session).await {
            Ok(true) => recorded += 1,
            Ok(false) => {}
            Err(reason) => {
                warn!(session_id = %session.id, reason, "skipping session during bootstrap");
            }
        }
    }

    info!(
        scanned = sessions.len(),
        recorded, "bootstrap learning scan complete"
    );
    Ok(recorded)
}

/// Record one session as a pattern. `Ok(false)` means the session was
/// silently ignored (too short); `Err` carries a skip reason.
async fn synthesize(
    store: &PatternStore,
    classifier: &UseCaseClassifier,
    session: &SessionRecord,
) -> Result<bool, &'static str> {
    if session.transcript.len() < MIN_TRANSCRIPT_TURNS {
        return Ok(false);
    }
    if session.model_id.trim().is_empty() {
        return Err("empty model_id");
    }
    if !session.temperature.is_finite() || !(0.0..=2.0).contains(&session.temperature) {
        return Err("temperature out of range");
    }
    if !session.nucleus_p.is_finite() || !(0.0..=1.0).contains(&session.nucleus_p) {
        return Err("nucleus_p out of range");
    }
    if session.max_tokens == 0 {
        return Err("zero max_tokens");
    }

    let use_case = classifier.classify(&session.notes).primary;
    let success_proxy = (session.transcript.len() as f64 / PROXY_SATURATION_TURNS).min(1.0);

    store
        .record(
            use_case,
            &session.model_id,
            session.temperature,
            session.nucleus_p,
            session.max_tokens,
            success_proxy,
            0.0,
            0.0,
        )
        .await;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tunesmith_core::{HistoricalPattern, UseCase};

    struct StubSessions {
        sessions: Vec<SessionRecord>,
    }

    #[async_trait]
    impl SessionSource for StubSessions {
        async fn recent_sessions(
            &self,
            limit: usize,
        ) -> Result<Vec<SessionRecord>, TunesmithError> {
            Ok(self.sessions.iter().take(limit).cloned().collect())
        }
    }

    struct NullStorage;

    #[async_trait]
    impl crate::storage::PatternStorage for NullStorage {
        async fn load(&self) -> Result<HashMap<String, HistoricalPattern>, TunesmithError> {
            Ok(HashMap::new())
        }
        async fn save(
            &self,
            _patterns: &HashMap<String, HistoricalPattern>,
        ) -> Result<(), TunesmithError> {
            Ok(())
        }
    }

    fn session(id: &str, notes: &str, turns: usize, temperature: f64) -> SessionRecord {
        SessionRecord {
            id: id.to_string(),
            model_id: "claude-sonnet-4-20250514".to_string(),
            temperature,
            nucleus_p: 0.9,
            max_tokens: 2000,
            transcript: vec!["turn".to_string(); turns],
            notes: notes.to_string(),
        }
    }

    #[tokio::test]
    async fn synthesizes_patterns_from_sessions() {
        let store = PatternStore::empty(Arc::new(NullStorage), 1000);
        let source = StubSessions {
            sessions: vec![
                session("s1", "debug this error in the build", 10, 0.1),
                session("s2", "write a creative short story", 20, 0.9),
            ],
        };

        let recorded = bootstrap_from_sessions(&store, &source, 50).await.unwrap();
        assert_eq!(recorded, 2);

        let debug = store.get_relevant(UseCase::Debugging, "claude-sonnet-4-20250514", 10);
        assert_eq!(debug.len(), 1);
        // 10 of 20 saturation turns -> success proxy 0.5.
        assert!((debug[0].success_score - 0.5).abs() < 1e-9);

        let creative =
            store.get_relevant(UseCase::CreativeWriting, "claude-sonnet-4-20250514", 10);
        assert_eq!(creative.len(), 1);
        assert!((creative[0].success_score - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn bad_sessions_are_skipped_without_aborting() {
        let store = PatternStore::empty(Arc::new(NullStorage), 1000);
        let mut bad_temp = session("bad-temp", "analyze data", 10, f64::NAN);
        bad_temp.temperature = 99.0;
        let mut no_model = session("no-model", "analyze data", 10, 0.3);
        no_model.model_id = String::new();

        let source = StubSessions {
            sessions: vec![
                bad_temp,
                no_model,
                session("too-short", "analyze data trends", 1, 0.3),
                session("good", "analyze the research data trends", 12, 0.3),
            ],
        };

        let recorded = bootstrap_from_sessions(&store, &source, 50).await.unwrap();
        assert_eq!(recorded, 1, "only the one valid session records");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn respects_session_limit() {
        let store = PatternStore::empty(Arc::new(NullStorage), 1000);
        let source = StubSessions {
            sessions: (0..10)
                .map(|i| session(&format!("s{i}"), "discuss and chat about things", 5, 0.7))
                .collect(),
        };

        bootstrap_from_sessions(&store, &source, 3).await.unwrap();
        // All three sessions share identical parameters, so they fold into
        // one pattern with usage_count 3.
        let summary = store.summary();
        assert_eq!(summary.pattern_count, 1);
        let relevant = store.get_relevant(UseCase::Conversation, "claude-sonnet-4-20250514", 10);
        assert_eq!(relevant[0].usage_count, 3);
    }
}
