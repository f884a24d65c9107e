use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use chess_duel::{server, ServerArgs, SessionRegistry};
use clap::Parser;
use log::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = ServerArgs::parse();
    let registry = web::Data::new(SessionRegistry::new(args.registry_options()));

    match args.session_ttl() {
        Some(ttl) => {
            let registry_sweep = registry.clone();
            let every = args.sweep_interval();
            actix_web::rt::spawn(async move {
                server::sweep_idle_sessions(registry_sweep, ttl, every).await;
            });
            info!(
                "Idle sessions expire after {}s (sweep every {}s)",
                args.session_ttl_secs,
                every.as_secs()
            );
        }
        None => info!("Session eviction disabled"),
    }

    if args.validate_moves {
        info!("Server-side move validation enabled");
    }

    info!("Starting server on {}:{}", args.host, args.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(server::cors())
            .app_data(registry.clone())
            .configure(server::configure)
    })
    .bind((args.host.clone(), args.port))?
    .run()
    .await?;

    Ok(())
}
