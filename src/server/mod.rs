//! HTTP surface: one resource at `/api/game`, CORS fully open.

pub mod handlers;

use actix_cors::Cors;
use actix_web::web;
use chrono::Duration;
use log::info;

use crate::protocol::GAME_PATH;
use crate::registry::SessionRegistry;

/// Registers the game resource. GET and POST are served, anything else is 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(GAME_PATH)
            .route(web::post().to(handlers::post_game))
            .route(web::get().to(handlers::get_game))
            .default_service(web::to(handlers::method_not_allowed)),
    );
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
}

/// Periodically drops idle sessions. Runs until the server shuts down.
pub async fn sweep_idle_sessions(
    registry: web::Data<SessionRegistry>,
    ttl: Duration,
    every: std::time::Duration,
) {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        let evicted = registry.evict_idle(ttl);
        if evicted > 0 {
            info!(
                "Evicted {} idle session(s), {} still live",
                evicted,
                registry.len()
            );
        }
    }
}
