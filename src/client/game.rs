use chess::Square;
use thiserror::Error;

use super::ClientError;
use crate::board::{Board, GameOutcome, PlayerColor};
use crate::protocol::SessionSnapshot;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRefusal {
    #[error("{0}")]
    InvalidInput(String),
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("illegal move")]
    Illegal,
    #[error("the game is over")]
    GameOver,
}

/// The player's view of a session. The board here is authoritative for legality;
/// the server only relays positions.
#[derive(Clone, Debug)]
pub struct LocalGame {
    session_id: String,
    player_id: String,
    color: PlayerColor,
    board: Board,
    outcome: GameOutcome,
}

impl LocalGame {
    pub fn new(
        session_id: String,
        player_id: String,
        color: PlayerColor,
        fen: &str,
    ) -> Result<Self, ClientError> {
        let board = Board::from_fen(fen).map_err(ClientError::BadPosition)?;
        Ok(Self {
            session_id,
            player_id,
            color,
            outcome: board.outcome(),
            board,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        self.board.to_fen()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_my_turn(&self) -> bool {
        self.board.side_to_move() == self.color
    }

    /// Applies the move locally, promoting to a queen when needed, and returns
    /// the new position for the server.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<String, MoveRefusal> {
        if self.outcome.is_terminal() {
            return Err(MoveRefusal::GameOver);
        }
        if !self.is_my_turn() {
            return Err(MoveRefusal::NotYourTurn);
        }
        let next = self
            .board
            .apply_auto_queen(from, to)
            .ok_or(MoveRefusal::Illegal)?;
        self.set_board(next);
        Ok(self.fen())
    }

    /// Adopts the server's position when it differs from ours. Returns whether
    /// anything changed.
    pub fn reconcile(&mut self, snapshot: &SessionSnapshot) -> Result<bool, ClientError> {
        if snapshot.board == self.fen() {
            return Ok(false);
        }
        let remote = Board::from_fen(&snapshot.board).map_err(ClientError::BadPosition)?;
        if remote.same_position(&self.board) {
            return Ok(false);
        }
        self.set_board(remote);
        Ok(true)
    }

    fn set_board(&mut self, board: Board) {
        self.board = board;
        self.outcome = board.outcome();
    }

    pub fn status_line(&self) -> String {
        match self.outcome {
            GameOutcome::Checkmate => "Checkmate!".to_string(),
            GameOutcome::Stalemate => "Game Over".to_string(),
            GameOutcome::Check if self.is_my_turn() => "Your Turn - Check!".to_string(),
            GameOutcome::Check => "Opponent's Turn - Check!".to_string(),
            GameOutcome::Ongoing if self.is_my_turn() => "Your Turn".to_string(),
            GameOutcome::Ongoing => "Opponent's Turn".to_string(),
        }
    }
}
