use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::store::Store;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub store: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Data store is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<dyn Store>) -> HttpResponse {
    let (status, mut response) = match store.ping().await {
        Ok(()) => ("healthy", HttpResponse::Ok()),
        Err(e) => {
            log::error!("❌ Health check failed: {}", e);
            ("unhealthy", HttpResponse::ServiceUnavailable())
        }
    };

    response.json(HealthResponse {
        status: status.to_string(),
        service: "recipe-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store.backend().to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
