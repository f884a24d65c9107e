//! JSON bodies exchanged on `/api/game`. Shared by the server handlers and the
//! polling client so both sides agree on field names.

use serde::{Deserialize, Serialize};

use crate::board::PlayerColor;

pub const GAME_PATH: &str = "/api/game";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientRequest {
    Create {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        board: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Join {
        session_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Move {
        session_id: String,
        board: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player_id: Option<String>,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerResponse {
    #[serde(rename_all = "camelCase")]
    Created { session_id: String },
    #[serde(rename_all = "camelCase")]
    Joined {
        session_id: String,
        board: String,
        color: PlayerColor,
        player_id: String,
    },
    MoveReceived { board: String },
    Error { message: String },
}

/// Body of a successful `GET ?sessionId=...`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub board: String,
    pub turn: PlayerColor,
    pub players: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Deserialize, Debug)]
pub struct SessionQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReadResponse {
    Snapshot(SessionSnapshot),
    Error(ErrorBody),
}
