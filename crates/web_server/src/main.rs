//! Main entry point for the Vaccine Tracker server.
//! This crate wires the poll loop together and serves the liveness probe.

use actix_web::{App, HttpResponse, HttpServer, middleware::Logger, web};

use crate::config::Config;
use crate::scan_manager::ScanManager;

/// Environment configuration for the tracker
mod config;

/// Background scan system wiring
mod scan_manager;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting vaccine tracker...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut scan_manager = ScanManager::new();
    if let Err(e) = scan_manager.start(&config) {
        log::error!("❌ Failed to start scan system: {}", e);
        std::process::exit(1);
    }

    log::info!("🌐 Liveness probe will be available at: http://0.0.0.0:8080/health");

    HttpServer::new(|| {
        App::new().wrap(Logger::default()).route(
            "/health",
            web::get().to(|| async { HttpResponse::Ok().finish() }),
        )
    })
    .bind("0.0.0.0:8080")?
    .run()
    .await
}
