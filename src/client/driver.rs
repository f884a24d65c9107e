use log::{info, warn};
use parking_lot::Mutex;

use super::{GameClient, LocalGame, MoveRefusal};
use crate::board::parse_squares;

/// Plays `input` (e.g. `e2e4`) on the local board, then tells the server.
///
/// The local update is kept even when the server call fails; the failure is
/// only logged. Returns the position after the move.
pub async fn play_move(
    client: &GameClient,
    game: &Mutex<LocalGame>,
    input: &str,
) -> Result<String, MoveRefusal> {
    let (from, to) = parse_squares(input).map_err(MoveRefusal::InvalidInput)?;

    let (session_id, player_id, fen) = {
        let mut game = game.lock();
        let fen = game.try_move(from, to)?;
        (
            game.session_id().to_string(),
            game.player_id().to_string(),
            fen,
        )
    };

    match client.submit_move(&session_id, &fen, &player_id).await {
        Ok(_) => info!("Move {} sent to session {}", input.trim(), session_id),
        Err(e) => warn!("Error sending move {} to session {}: {}", input.trim(), session_id, e),
    }

    Ok(fen)
}
