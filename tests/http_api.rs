// HTTP contract of /api/game: create, join, move and read, plus the error shapes.

use actix_web::http::{header, Method, StatusCode};
use actix_web::{test, web, App};
use chess_duel::{server, RegistryOptions, SessionRegistry, STARTING_FEN};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

macro_rules! app {
    ($registry:expr) => {
        test::init_service(
            App::new()
                .wrap(server::cors())
                .app_data(web::Data::new($registry))
                .configure(server::configure),
        )
        .await
    };
}

macro_rules! post {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/game")
            .set_json($body)
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body
    }};
}

macro_rules! get {
    ($app:expr, $session_id:expr) => {{
        let req = test::TestRequest::get()
            .uri(&format!("/api/game?sessionId={}", $session_id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body
    }};
}

#[actix_web::test]
async fn test_create_join_move_read() {
    let app = app!(SessionRegistry::default());

    let created = post!(app, json!({ "type": "create" }));
    assert_eq!(created["type"], "created");
    let session_id = created["sessionId"].as_str().unwrap().to_string();
    assert_eq!(session_id.len(), 6);

    let p1 = post!(
        app,
        json!({ "type": "join", "sessionId": session_id, "playerId": "p1" })
    );
    assert_eq!(
        p1,
        json!({
            "type": "joined",
            "sessionId": session_id,
            "board": STARTING_FEN,
            "color": "w",
            "playerId": "p1"
        })
    );

    let p2 = post!(
        app,
        json!({ "type": "join", "sessionId": session_id, "playerId": "p2" })
    );
    assert_eq!(p2["color"], "b");

    let p3 = post!(
        app,
        json!({ "type": "join", "sessionId": session_id, "playerId": "p3" })
    );
    assert_eq!(p3, json!({ "type": "error", "message": "Session full" }));

    let before = get!(app, session_id);
    assert_eq!(
        before,
        json!({ "board": STARTING_FEN, "turn": "w", "players": 2 })
    );

    let next = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
    let moved = post!(
        app,
        json!({ "type": "move", "sessionId": session_id, "board": next, "playerId": "p1" })
    );
    assert_eq!(moved, json!({ "type": "move-received", "board": next }));

    let after = get!(app, session_id);
    assert_eq!(after["turn"], "b");
    assert_eq!(after["board"], next);
}

#[actix_web::test]
async fn test_create_with_board() {
    let app = app!(SessionRegistry::default());
    let board = "8/8/8/8/8/8/8/k6K w - - 0 1";
    let created = post!(app, json!({ "type": "create", "board": board }));
    let session_id = created["sessionId"].as_str().unwrap().to_string();
    assert_eq!(get!(app, session_id)["board"], board);
}

#[actix_web::test]
async fn test_rejoin_returns_same_color() {
    let app = app!(SessionRegistry::default());
    let created = post!(app, json!({ "type": "create" }));
    let session_id = created["sessionId"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let joined = post!(
            app,
            json!({ "type": "join", "sessionId": session_id, "playerId": "p1" })
        );
        assert_eq!(joined["color"], "w");
    }
    assert_eq!(get!(app, session_id)["players"], 1);
}

#[actix_web::test]
async fn test_unknown_session_is_an_error_payload() {
    let app = app!(SessionRegistry::default());

    let joined = post!(
        app,
        json!({ "type": "join", "sessionId": "zzzzzz", "playerId": "p1" })
    );
    assert_eq!(
        joined,
        json!({ "type": "error", "message": "Session not found" })
    );

    let moved = post!(
        app,
        json!({ "type": "move", "sessionId": "zzzzzz", "board": STARTING_FEN })
    );
    assert_eq!(
        moved,
        json!({ "type": "error", "message": "Session not found" })
    );

    assert_eq!(
        get!(app, "zzzzzz"),
        json!({ "error": "Session not found" })
    );

    let req = test::TestRequest::get().uri("/api/game").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "error": "Session not found" }));
}

#[actix_web::test]
async fn test_other_methods_are_405() {
    let app = app!(SessionRegistry::default());
    for method in [Method::PUT, Method::DELETE, Method::PATCH] {
        let req = test::TestRequest::default()
            .method(method)
            .uri("/api/game")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }
}

#[actix_web::test]
async fn test_malformed_post_is_400() {
    let app = app!(SessionRegistry::default());
    let req = test::TestRequest::post()
        .uri("/api/game")
        .set_json(json!({ "type": "resign" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_cors_is_open() {
    let app = app!(SessionRegistry::default());
    let req = test::TestRequest::get()
        .uri("/api/game?sessionId=zzzzzz")
        .insert_header((header::ORIGIN, "http://example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[actix_web::test]
async fn test_validation_rejects_forged_position() {
    let app = app!(SessionRegistry::new(RegistryOptions {
        validate_moves: true
    }));
    let created = post!(app, json!({ "type": "create" }));
    let session_id = created["sessionId"].as_str().unwrap().to_string();
    post!(
        app,
        json!({ "type": "join", "sessionId": session_id, "playerId": "p1" })
    );

    let forged = "4k3/8/8/8/8/8/8/4K2Q b - - 0 1";
    let moved = post!(
        app,
        json!({ "type": "move", "sessionId": session_id, "board": forged, "playerId": "p1" })
    );
    assert_eq!(moved["type"], "error");
    assert_eq!(get!(app, session_id)["turn"], "w");
}
