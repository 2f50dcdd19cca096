use std::collections::HashMap;

use crate::payload::PayloadChunk;
use crate::session::{ReassemblySession, SessionStatus, StoreOutcome};

/// What happens to a session once its last part arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Drop the session on completion. A later transfer may reuse the id.
    #[default]
    Clear,
    /// Keep the parts so the assembled text can be produced again, until
    /// the caller clears the session explicitly.
    Retain,
}

/// Session table for concurrent multi-part transfers, keyed by transfer id.
///
/// The first chunk seen for an id opens the session and fixes its expected
/// total; later chunks disagreeing with that total are dropped. The engine
/// is synchronous and expects one payload at a time, ordering between
/// sessions does not matter.
pub struct ReassemblyEngine {
    sessions: HashMap<String, ReassemblySession>,
    policy: CompletionPolicy,
}

impl ReassemblyEngine {
    pub fn new() -> Self {
        Self::with_policy(CompletionPolicy::Clear)
    }

    pub fn with_policy(policy: CompletionPolicy) -> Self {
        Self {
            sessions: HashMap::new(),
            policy,
        }
    }

    /// Feed one chunk in. Opens the session if the id is new, stores the
    /// part, and reports what changed. On completion under
    /// `CompletionPolicy::Clear` the session is dropped in the same call.
    pub fn ingest(&mut self, chunk: PayloadChunk) -> SessionStatus {
        let PayloadChunk {
            session_id,
            part_index,
            total_parts,
            data,
        } = chunk;

        let session = self
            .sessions
            .entry(session_id.clone())
            .or_insert_with(|| ReassemblySession::new(total_parts));

        if total_parts != session.expected_total() {
            return SessionStatus::TotalMismatch {
                declared: total_parts,
                expected: session.expected_total(),
            };
        }

        match session.store(part_index, data) {
            StoreOutcome::Duplicate => SessionStatus::DuplicateIgnored {
                part_index,
                received: session.received_count(),
                expected: session.expected_total(),
            },
            StoreOutcome::OutOfRange => SessionStatus::IndexOutOfRange {
                part_index,
                expected: session.expected_total(),
            },
            StoreOutcome::Stored if session.is_complete() => {
                let assembled = session.assemble();
                if self.policy == CompletionPolicy::Clear {
                    self.sessions.remove(&session_id);
                }
                SessionStatus::Completed { assembled }
            }
            StoreOutcome::Stored => SessionStatus::Accepted {
                received: session.received_count(),
                expected: session.expected_total(),
            },
        }
    }

    /// Assembled text of a finished session, dropping the session with it.
    /// `None` while parts are missing or the id is unknown.
    pub fn complete_and_clear(&mut self, session_id: &str) -> Option<String> {
        let session = self.sessions.get(session_id)?;
        if !session.is_complete() {
            return None;
        }

        let assembled = session.assemble();
        self.sessions.remove(session_id);
        Some(assembled)
    }

    /// Assembled text of a finished session, keeping its parts around.
    pub fn complete_and_retain(&self, session_id: &str) -> Option<String> {
        let session = self.sessions.get(session_id)?;
        session.is_complete().then(|| session.assemble())
    }

    /// Forget a session, finished or not. True if one was held.
    pub fn reset(&mut self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// `(received, expected)` part counts for an active session.
    pub fn progress(&self, session_id: &str) -> Option<(usize, u32)> {
        let session = self.sessions.get(session_id)?;
        Some((session.received_count(), session.expected_total()))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for ReassemblyEngine {
    fn default() -> Self {
        Self::new()
    }
}
