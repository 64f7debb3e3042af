mod api;
mod config;
mod database;
mod models;
mod services;
mod store;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::{Config, StoreBackend};
use store::{MemoryStore, Store};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("🚀 Starting Recipe Service...");

    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::MongoDb => {
            log::info!("📊 Database: {}", config.database_url);
            let db = database::MongoDB::new(&config.database_url)
                .await
                .map_err(|e| {
                    log::error!("❌ Failed to connect to MongoDB: {}", e);
                    io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string())
                })?;
            log::info!("✅ MongoDB connected successfully");
            Arc::new(db)
        }
        StoreBackend::Memory => {
            log::warn!("⚠️  Using in-memory store, data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };
    let store_data = web::Data::from(store);

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    let openapi = api::swagger::ApiDoc::openapi();
    let cors_origins = config.cors_origins.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .wrap(build_cors(&cors_origins))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(3600);

    if origins.is_empty() {
        return cors.allow_any_origin();
    }

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
