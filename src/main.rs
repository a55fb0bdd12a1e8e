use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use trip_plan_api::{config::AppConfig, middleware::cors::cors_headers, routes, state::AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config =
        AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let (host, port) = (config.host.clone(), config.port);
    let cors_origin = config.cors_origin.clone();

    let state = AppState::from_config(config).map_err(io::Error::other)?;
    let state = web::Data::new(state);

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_headers(cors_origin.as_deref()))
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::config)
    })
    .bind((host, port))?
    .run()
    .await
}
