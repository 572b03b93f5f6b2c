use std::io;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};

use filedesk::api::{self, cors_headers, json_config, query_config};
use filedesk::app_state::AppState;
use filedesk::config::AppConfig;

/// log4rs from the configured YAML file, env_logger when that file is unusable
fn init_logging(config_file: &str) {
    if let Err(e) = log4rs::init_file(config_file, Default::default()) {
        env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
        warn!("Could not load log config {}: {}. Logging to stderr.", config_file, e);
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Logging is configured from the file alone; everything after it is logged.
    let config_path = AppConfig::config_path();
    let mut config = AppConfig::load_file(&config_path)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    init_logging(&config.logging.config_file);
    AppConfig::log_source(&config_path);
    config.apply_env_overrides();

    let state = AppState::from_config(config.clone());
    let server_config = config.server.clone();
    info!(
        "Starting server on {}:{} in {} mode",
        server_config.host,
        server_config.port,
        state.mode()
    );

    let data = web::Data::new(state);
    let max_json_payload = server_config.max_json_payload;

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(json_config(max_json_payload))
            .app_data(query_config())
            .wrap(cors_headers())
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .workers(server_config.workers)
    .bind((server_config.host.as_str(), server_config.port))?
    .run()
    .await
}
