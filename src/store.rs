// This file is part of the gambit library.
// Copyright (C) 2026 the gambit developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Session storage with expiry.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::{Mutex, RwLock};

use crate::session::{GameSession, SessionId};

/// How long a session may go without updates before it expires.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Error when looking up a session.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("session not found")]
    NotFound,
    #[error("session expired")]
    Expired,
}

/// Storage backend for game sessions.
///
/// Lookups hand out copies. All mutation goes through [`SessionStore::update()`],
/// which applies a fallible closure to the stored session and commits the
/// result only when the closure succeeds, so concurrent writers cannot lose
/// each other's moves and a failed mutation leaves the session untouched.
pub trait SessionStore {
    /// Creates and stores a fresh session.
    fn create(&self) -> GameSession;

    /// Looks up a copy of a session.
    fn get(&self, id: &SessionId) -> Result<GameSession, StoreError>;

    /// Atomically updates a session. The closure runs on a scratch copy
    /// under the session lock. On `Ok` the copy replaces the stored
    /// session and its expiry timer restarts, on `Err` nothing changes.
    fn update<T, E, F>(&self, id: &SessionId, mutation: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut GameSession) -> Result<T, E>;
}

/// In-memory [`SessionStore`] with a fixed time-to-live per session.
///
/// Expired sessions are dropped lazily on access and by [`MemoryStore::sweep()`].
#[derive(Debug)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<GameSession>>>>,
    ttl: Duration,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> MemoryStore {
        MemoryStore {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Drops all expired sessions and returns how many were dropped.
    ///
    /// A session whose lock is held by an in-flight update is never
    /// dropped, since the update will restart its expiry timer.
    pub fn sweep(&self) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|id, entry| match entry.try_lock() {
            Some(session) => {
                let keep = session.updated_at().elapsed() <= self.ttl;
                if !keep {
                    tracing::debug!(session = %id, "session expired, dropping");
                }
                keep
            }
            None => true,
        });
        before - sessions.len()
    }

    fn entry(&self, id: &SessionId) -> Result<Arc<Mutex<GameSession>>, StoreError> {
        let entry = self
            .sessions
            .read()
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)?;

        if entry.lock().updated_at().elapsed() <= self.ttl {
            return Ok(entry);
        }

        // Evict under the write lock, but re-check first: a concurrent
        // update may have refreshed the session in the meantime.
        let mut sessions = self.sessions.write();
        if let Some(current) = sessions.get(id) {
            if current.lock().updated_at().elapsed() <= self.ttl {
                return Ok(Arc::clone(current));
            }
            tracing::debug!(session = %id, "session expired, dropping");
            sessions.remove(id);
        }
        Err(StoreError::Expired)
    }
}

impl Default for MemoryStore {
    fn default() -> MemoryStore {
        MemoryStore::new()
    }
}

impl SessionStore for MemoryStore {
    fn create(&self) -> GameSession {
        self.sweep();
        let session = GameSession::new();
        tracing::debug!(session = %session.id(), player = %session.player_color(), "created session");
        self.sessions.write().insert(
            session.id().clone(),
            Arc::new(Mutex::new(session.clone())),
        );
        session
    }

    fn get(&self, id: &SessionId) -> Result<GameSession, StoreError> {
        Ok(self.entry(id)?.lock().clone())
    }

    fn update<T, E, F>(&self, id: &SessionId, mutation: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut GameSession) -> Result<T, E>,
    {
        let entry = self.entry(id).map_err(E::from)?;
        let mut guard = entry.lock();

        let mut scratch = guard.clone();
        let value = mutation(&mut scratch)?;
        scratch.touch(Instant::now());
        *guard = scratch;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{position::Position, session::Status};

    #[test]
    fn test_create_and_get() {
        let store = MemoryStore::new();
        let session = store.create();
        let found = store.get(session.id()).expect("session exists");
        assert_eq!(found.id(), session.id());
        assert_eq!(found.status(), Status::Active);
        assert_eq!(
            store.get(&SessionId::from("missing")).map(|_| ()),
            Err(StoreError::NotFound)
        );
    }

    #[test]
    fn test_update_commits_on_ok() {
        let store = MemoryStore::new();
        let session = store.create();
        let next = session
            .position()
            .play(&session.position().legal_moves()[0])
            .expect("legal move");

        store
            .update::<_, StoreError, _>(session.id(), |session| {
                let m = session.position().legal_moves()[0];
                let next = session.position().play_unchecked(&m);
                session.record_move(m, m.to_string(), next);
                Ok(())
            })
            .expect("update succeeds");

        let found = store.get(session.id()).expect("session exists");
        assert_eq!(found.position(), &next);
        assert!(found.updated_at() >= session.updated_at());
    }

    #[test]
    fn test_update_rolls_back_on_err() {
        let store = MemoryStore::new();
        let session = store.create();

        let result: Result<(), StoreError> = store.update(session.id(), |session| {
            let m = session.position().legal_moves()[0];
            let next = session.position().play_unchecked(&m);
            session.record_move(m, m.to_string(), next);
            Err(StoreError::NotFound)
        });
        assert_eq!(result, Err(StoreError::NotFound));

        let found = store.get(session.id()).expect("session exists");
        assert_eq!(found.position(), &Position::default());
        assert!(found.last_move().is_none());
    }

    #[test]
    fn test_expiry() {
        let store = MemoryStore::with_ttl(Duration::from_millis(20));
        let session = store.create();
        thread::sleep(Duration::from_millis(40));

        assert_eq!(
            store.get(session.id()).map(|_| ()),
            Err(StoreError::Expired)
        );
        // The expired session was evicted on access.
        assert_eq!(
            store.get(session.id()).map(|_| ()),
            Err(StoreError::NotFound)
        );
    }

    #[test]
    fn test_update_restarts_expiry() {
        let store = MemoryStore::with_ttl(Duration::from_millis(60));
        let session = store.create();
        for _ in 0..3 {
            thread::sleep(Duration::from_millis(30));
            store
                .update::<_, StoreError, _>(session.id(), |_| Ok(()))
                .expect("still alive");
        }
        assert!(store.get(session.id()).is_ok());
    }

    #[test]
    fn test_sweep() {
        let store = MemoryStore::with_ttl(Duration::from_millis(20));
        let old = store.create();
        thread::sleep(Duration::from_millis(40));
        // Creating sweeps lazily, dropping the expired session.
        let fresh = store.create();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(old.id()).map(|_| ()), Err(StoreError::NotFound));
        assert!(store.get(fresh.id()).is_ok());
        assert_eq!(store.sweep(), 0);
    }
}
