// Two clients against a live server: moves travel through the registry and the
// opponent's poll loop picks them up.

use actix_web::{web, App, HttpServer};
use chess_duel::client::{play_move, spawn_poll_loop, ClientError, GameClient, LocalGame};
use chess_duel::{server, PlayerColor, SessionRegistry};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

async fn start_server() -> (String, actix_web::dev::ServerHandle) {
    let registry = web::Data::new(SessionRegistry::default());
    let server = HttpServer::new(move || {
        App::new()
            .app_data(registry.clone())
            .configure(server::configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (format!("http://{}", addr), handle)
}

#[actix_web::test]
async fn test_opponent_move_arrives_by_polling() {
    let (base, handle) = start_server().await;
    let client = GameClient::new(&base);

    let session_id = client.create_session(None).await.unwrap();
    let white = client.join_session(&session_id, Some("p1")).await.unwrap();
    let black = client.join_session(&session_id, Some("p2")).await.unwrap();
    assert_eq!(white.color, PlayerColor::White);
    assert_eq!(black.color, PlayerColor::Black);

    match client.join_session(&session_id, Some("p3")).await {
        Err(ClientError::Rejected(message)) => assert_eq!(message, "Session full"),
        other => panic!("expected a full session, got {:?}", other),
    }

    let white_game = Arc::new(Mutex::new(
        LocalGame::new(session_id.clone(), white.player_id, white.color, &white.position).unwrap(),
    ));
    let black_game = Arc::new(Mutex::new(
        LocalGame::new(session_id.clone(), black.player_id, black.color, &black.position).unwrap(),
    ));

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let poll = spawn_poll_loop(
        client.clone(),
        black_game.clone(),
        Duration::from_millis(50),
        move |game| {
            let _ = tx.send(game.fen());
        },
    );

    let sent = play_move(&client, &white_game, "e2e4").await.unwrap();

    let seen = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("poll loop never saw the move")
        .unwrap();
    assert_eq!(seen, sent);
    assert!(black_game.lock().is_my_turn());

    let snapshot = client.read_session(&session_id).await.unwrap();
    assert_eq!(snapshot.turn, PlayerColor::Black);
    assert_eq!(snapshot.players, 2);

    poll.stop();
    handle.stop(true).await;
}

#[actix_web::test]
async fn test_unknown_session_reads_are_rejected() {
    let (base, handle) = start_server().await;
    let client = GameClient::new(&base);

    match client.read_session("nope00").await {
        Err(ClientError::Rejected(message)) => assert_eq!(message, "Session not found"),
        other => panic!("expected rejection, got {:?}", other),
    }
    assert!(matches!(
        client.join_session("nope00", Some("p1")).await,
        Err(ClientError::Rejected(_))
    ));

    handle.stop(true).await;
}
