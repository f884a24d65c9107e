use actix_web::{web, HttpResponse};
use log::debug;

use crate::error::{ApiError, SessionError};
use crate::protocol::{ClientRequest, ErrorBody, ServerResponse, SessionQuery};
use crate::registry::SessionRegistry;

pub async fn post_game(
    registry: web::Data<SessionRegistry>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let request: ClientRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    debug!("POST {:?}", request);

    let response = match request {
        ClientRequest::Create { board } => ServerResponse::Created {
            session_id: registry.create_session(board),
        },
        ClientRequest::Join {
            session_id,
            player_id,
        } => match registry.join_session(&session_id, player_id.as_deref()) {
            Ok(joined) => ServerResponse::Joined {
                session_id,
                board: joined.position,
                color: joined.color,
                player_id: joined.player_id,
            },
            Err(e) => ServerResponse::Error {
                message: e.to_string(),
            },
        },
        ClientRequest::Move {
            session_id,
            board,
            player_id,
        } => match registry.submit_move(&session_id, board, player_id.as_deref()) {
            Ok(board) => ServerResponse::MoveReceived { board },
            Err(e) => ServerResponse::Error {
                message: e.to_string(),
            },
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

pub async fn get_game(
    registry: web::Data<SessionRegistry>,
    query: web::Query<SessionQuery>,
) -> HttpResponse {
    let snapshot = query
        .session_id
        .as_deref()
        .ok_or(SessionError::NotFound)
        .and_then(|id| registry.read_session(id));

    match snapshot {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(e) => HttpResponse::Ok().json(ErrorBody {
            error: e.to_string(),
        }),
    }
}

pub async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}
