use chess::ChessMove;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::board::{Board, PlayerColor, STARTING_FEN};
use crate::error::SessionError;
use crate::protocol::SessionSnapshot;

pub const MAX_PARTICIPANTS: usize = 2;

/// One game shared by up to two participants.
#[derive(Clone, Debug)]
pub struct Session {
    id: String,
    participants: Vec<String>,
    colors: HashMap<String, PlayerColor>,
    position: String,
    turn: PlayerColor,
    last_activity: DateTime<Utc>,
}

impl Session {
    /// An empty or missing position falls back to the standard start.
    pub fn new(id: String, position: Option<String>, now: DateTime<Utc>) -> Self {
        let position = position
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| STARTING_FEN.to_string());
        Self {
            id,
            participants: Vec::new(),
            colors: HashMap::new(),
            position,
            turn: PlayerColor::White,
            last_activity: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn color_of(&self, player_id: &str) -> Option<PlayerColor> {
        self.colors.get(player_id).copied()
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn turn(&self) -> PlayerColor {
        self.turn
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= MAX_PARTICIPANTS
    }

    /// Seats `player_id`, or returns the color it already holds.
    pub fn join(
        &mut self,
        player_id: &str,
        now: DateTime<Utc>,
    ) -> Result<PlayerColor, SessionError> {
        if let Some(color) = self.color_of(player_id) {
            self.last_activity = now;
            return Ok(color);
        }

        if self.is_full() {
            return Err(SessionError::Full);
        }

        let color = if self.participants.is_empty() {
            PlayerColor::White
        } else {
            PlayerColor::Black
        };
        self.participants.push(player_id.to_string());
        self.colors.insert(player_id.to_string(), color);
        self.last_activity = now;
        Ok(color)
    }

    /// Stores the submitted position verbatim and hands the turn over.
    pub fn record_move(&mut self, position: String, now: DateTime<Utc>) {
        self.position = position;
        self.turn = !self.turn;
        self.last_activity = now;
    }

    /// Checks that `position` follows the stored one by a single legal move
    /// made by the side whose turn it is.
    pub fn validate_successor(
        &self,
        position: &str,
        player_id: Option<&str>,
    ) -> Result<ChessMove, SessionError> {
        let current = Board::from_fen(&self.position).map_err(SessionError::InvalidPosition)?;
        let next = Board::from_fen(position).map_err(SessionError::InvalidPosition)?;

        if let Some(color) = player_id.and_then(|id| self.color_of(id)) {
            if color != current.side_to_move() {
                return Err(SessionError::NotYourTurn);
            }
        }

        current.move_reaching(&next).ok_or_else(|| {
            SessionError::IllegalMove("position is not one legal move away".to_string())
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.position.clone(),
            turn: self.turn,
            players: self.participants.len(),
        }
    }

    pub fn is_idle_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_activity < cutoff
    }
}
