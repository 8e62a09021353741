// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory per-session state.
//!
//! Each browser session owns one `SessionState`. Handlers copy what they need
//! out, release the entry, call the model, and write back only on success,
//! so no map guard is ever held across an await.

use crate::models::{AnalysisKind, AnalysisResult, GeneratedPlan, HealthProfile};
use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};
use std::time::{Duration, Instant};

const SESSION_ID_BYTES: usize = 16;

/// Opaque session identifier.
///
/// Handlers that start a session return it as a response extension so the
/// session middleware can issue the cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The caller's live session, if the request carried a valid cookie for one.
/// Attached to every request by the session middleware.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession(pub Option<SessionId>);

impl CurrentSession {
    pub fn id(&self) -> Option<&SessionId> {
        self.0.as_ref()
    }

    /// Read from the caller's session. `None` when there is no session.
    pub fn read<R>(&self, store: &SessionStore, f: impl FnOnce(&SessionState) -> R) -> Option<R> {
        self.id().and_then(|id| store.read(id, f))
    }
}

/// Everything one session has produced so far.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Profile from the last successful plan submission
    pub profile: Option<HealthProfile>,
    pub plan: Option<GeneratedPlan>,
    pub food: Option<AnalysisResult>,
    pub room: Option<AnalysisResult>,
}

impl SessionState {
    /// Replace the profile and plan together.
    pub fn record_plan(&mut self, profile: HealthProfile, plan: GeneratedPlan) {
        self.profile = Some(profile);
        self.plan = Some(plan);
    }

    pub fn analysis(&self, kind: AnalysisKind) -> Option<&AnalysisResult> {
        match kind {
            AnalysisKind::Food => self.food.as_ref(),
            AnalysisKind::Room => self.room.as_ref(),
        }
    }

    /// Replace the result on the track matching `result.kind`; the other track is untouched.
    pub fn record_analysis(&mut self, result: AnalysisResult) {
        match result.kind {
            AnalysisKind::Food => self.food = Some(result),
            AnalysisKind::Room => self.room = Some(result),
        }
    }
}

struct SessionEntry {
    state: SessionState,
    last_seen: Instant,
}

/// Store of live sessions, owned by `AppState`.
///
/// Sessions are only created when a handler has state to record, so
/// read-only traffic never grows the map.
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    rng: SystemRandom,
    max_idle: Duration,
}

impl SessionStore {
    /// Create a store that drops sessions idle for longer than `max_idle`.
    pub fn new(max_idle: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            rng: SystemRandom::new(),
            max_idle,
        }
    }

    /// Mark a session as active. Returns false if it does not exist.
    pub fn touch(&self, id: &str) -> bool {
        match self.sessions.get_mut(id) {
            Some(mut entry) => {
                entry.last_seen = Instant::now();
                true
            }
            None => false,
        }
    }

    /// Read from a session without holding the entry beyond `f`.
    pub fn read<R>(&self, id: &SessionId, f: impl FnOnce(&SessionState) -> R) -> Option<R> {
        self.sessions.get(id.as_str()).map(|entry| f(&entry.state))
    }

    /// Apply `f` to the caller's session, starting a new one when `id` is
    /// `None` or no longer live. Returns the id the state was written to.
    pub fn update_or_create<R>(
        &self,
        id: Option<&SessionId>,
        f: impl FnOnce(&mut SessionState) -> R,
    ) -> Result<(SessionId, R), SessionError> {
        if let Some(id) = id {
            if let Some(mut entry) = self.sessions.get_mut(id.as_str()) {
                entry.last_seen = Instant::now();
                return Ok((id.clone(), f(&mut entry.state)));
            }
        }

        let mut state = SessionState::default();
        let value = f(&mut state);
        let new_id = self.insert_new(state)?;
        Ok((new_id, value))
    }

    fn insert_new(&self, state: SessionState) -> Result<SessionId, SessionError> {
        self.prune_idle();

        let mut raw = [0u8; SESSION_ID_BYTES];
        self.rng.fill(&mut raw).map_err(|_| SessionError::Random)?;
        let id = hex::encode(raw);

        self.sessions.insert(
            id.clone(),
            SessionEntry {
                state,
                last_seen: Instant::now(),
            },
        );
        tracing::debug!(sessions = self.sessions.len(), "Session created");
        Ok(SessionId(id))
    }

    /// End a session, discarding its state.
    pub fn remove(&self, id: &SessionId) -> bool {
        self.sessions.remove(id.as_str()).is_some()
    }

    /// Drop sessions idle for longer than the configured timeout. Returns how
    /// many were dropped.
    pub fn prune_idle(&self) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| entry.last_seen.elapsed() <= self.max_idle);
        let pruned = before.saturating_sub(self.sessions.len());
        if pruned > 0 {
            tracing::info!(pruned, "Pruned idle sessions");
        }
        pruned
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("System random number generator unavailable")]
    Random,
}
