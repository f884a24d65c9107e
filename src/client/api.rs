use reqwest::{Client, Url};

use super::ClientError;
use crate::protocol::{ClientRequest, ReadResponse, ServerResponse, SessionSnapshot, GAME_PATH};
use crate::registry::JoinedSession;

/// Talks to `/api/game` on one server. No timeouts are configured.
#[derive(Clone, Debug)]
pub struct GameClient {
    http: Client,
    endpoint: String,
}

impl GameClient {
    pub fn new(server: &str) -> Self {
        Self {
            http: Client::new(),
            endpoint: format!("{}{}", server.trim_end_matches('/'), GAME_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: &ClientRequest) -> Result<ServerResponse, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<ServerResponse>().await?)
    }

    pub async fn create_session(&self, board: Option<String>) -> Result<String, ClientError> {
        match self.post(&ClientRequest::Create { board }).await? {
            ServerResponse::Created { session_id } => Ok(session_id),
            ServerResponse::Error { message } => Err(ClientError::Rejected(message)),
            other => Err(ClientError::Unexpected(format!("{:?}", other))),
        }
    }

    pub async fn join_session(
        &self,
        session_id: &str,
        player_id: Option<&str>,
    ) -> Result<JoinedSession, ClientError> {
        let request = ClientRequest::Join {
            session_id: session_id.to_string(),
            player_id: player_id.map(str::to_string),
        };
        match self.post(&request).await? {
            ServerResponse::Joined {
                board,
                color,
                player_id,
                ..
            } => Ok(JoinedSession {
                player_id,
                color,
                position: board,
            }),
            ServerResponse::Error { message } => Err(ClientError::Rejected(message)),
            other => Err(ClientError::Unexpected(format!("{:?}", other))),
        }
    }

    pub async fn submit_move(
        &self,
        session_id: &str,
        board: &str,
        player_id: &str,
    ) -> Result<String, ClientError> {
        let request = ClientRequest::Move {
            session_id: session_id.to_string(),
            board: board.to_string(),
            player_id: Some(player_id.to_string()),
        };
        match self.post(&request).await? {
            ServerResponse::MoveReceived { board } => Ok(board),
            ServerResponse::Error { message } => Err(ClientError::Rejected(message)),
            other => Err(ClientError::Unexpected(format!("{:?}", other))),
        }
    }

    pub async fn read_session(&self, session_id: &str) -> Result<SessionSnapshot, ClientError> {
        let url = Url::parse_with_params(&self.endpoint, &[("sessionId", session_id)])
            .map_err(|e| ClientError::Unexpected(format!("bad endpoint: {}", e)))?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        match response.json::<ReadResponse>().await? {
            ReadResponse::Snapshot(snapshot) => Ok(snapshot),
            ReadResponse::Error(body) => Err(ClientError::Rejected(body.error)),
        }
    }
}
