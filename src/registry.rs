use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use parking_lot::RwLock;
use rand::{thread_rng, Rng};
use std::collections::HashMap;
use std::sync::Arc;

use crate::board::PlayerColor;
use crate::error::SessionError;
use crate::protocol::SessionSnapshot;
use crate::session::Session;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
pub const SESSION_ID_LEN: usize = 6;
pub const PLAYER_ID_LEN: usize = 9;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinedSession {
    pub player_id: String,
    pub color: PlayerColor,
    pub position: String,
}

#[derive(Clone, Debug, Default)]
pub struct RegistryOptions {
    /// Re-validate submitted positions with the rules library before storing them.
    pub validate_moves: bool,
}

/// In-memory map from session id to game state, shared by all request handlers.
///
/// Every operation does its read-modify-write under one lock acquisition, so
/// concurrent requests never observe a half-applied join or move.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    options: RegistryOptions,
}

impl SessionRegistry {
    pub fn new(options: RegistryOptions) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            options,
        }
    }

    pub fn create_session(&self, position: Option<String>) -> String {
        let mut sessions = self.sessions.write();
        let id = loop {
            let candidate = random_token(SESSION_ID_LEN);
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(id.clone(), Session::new(id.clone(), position, Utc::now()));
        info!("Created session {} ({} live)", id, sessions.len());
        id
    }

    /// Seats a participant. A missing id gets a generated `player_…` token.
    pub fn join_session(
        &self,
        session_id: &str,
        player_id: Option<&str>,
    ) -> Result<JoinedSession, SessionError> {
        self.join_session_at(session_id, player_id, Utc::now())
    }

    fn join_session_at(
        &self,
        session_id: &str,
        player_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<JoinedSession, SessionError> {
        let player_id = match player_id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => generate_player_id(),
        };

        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(session_id).ok_or(SessionError::NotFound)?;
        let color = session.join(&player_id, now).map_err(|e| {
            warn!("Join of {} to session {} refused: {}", player_id, session_id, e);
            e
        })?;

        info!("Player {} joined session {} as {}", player_id, session_id, color.name());
        Ok(JoinedSession {
            player_id,
            color,
            position: session.position().to_string(),
        })
    }

    /// Stores `position` and passes the turn. Positions are trusted unless
    /// `validate_moves` is set.
    pub fn submit_move(
        &self,
        session_id: &str,
        position: String,
        player_id: Option<&str>,
    ) -> Result<String, SessionError> {
        self.submit_move_at(session_id, position, player_id, Utc::now())
    }

    fn submit_move_at(
        &self,
        session_id: &str,
        position: String,
        player_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String, SessionError> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(session_id).ok_or(SessionError::NotFound)?;

        if self.options.validate_moves {
            match session.validate_successor(&position, player_id) {
                Ok(mv) => info!("Session {}: validated move {}", session_id, mv),
                Err(e) => {
                    warn!("Session {}: rejected position '{}': {}", session_id, position, e);
                    return Err(e);
                }
            }
        }

        session.record_move(position, now);
        info!(
            "Session {}: move received, {} to play",
            session_id,
            session.turn().name()
        );
        Ok(session.position().to_string())
    }

    pub fn read_session(&self, session_id: &str) -> Result<SessionSnapshot, SessionError> {
        self.sessions
            .read()
            .get(session_id)
            .map(Session::snapshot)
            .ok_or(SessionError::NotFound)
    }

    pub fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().get(session_id).cloned()
    }

    pub fn evict_idle(&self, ttl: Duration) -> usize {
        self.evict_idle_at(Utc::now(), ttl)
    }

    /// Drops sessions with no activity since `now - ttl`. Returns how many went.
    /// A cutoff before the representable range evicts nothing.
    pub fn evict_idle_at(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let Some(cutoff) = now.checked_sub_signed(ttl) else {
            return 0;
        };
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| {
            let idle = session.is_idle_since(cutoff);
            if idle {
                debug!(
                    "Evicting session {} (last activity {})",
                    session.id(),
                    session.last_activity()
                );
            }
            !idle
        });
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

fn random_token(len: usize) -> String {
    let mut rng = thread_rng();
    (0..len)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Participant ids look like `player_k3j9x0q2m`.
pub fn generate_player_id() -> String {
    format!("player_{}", random_token(PLAYER_ID_LEN))
}
