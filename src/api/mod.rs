pub mod health;
pub mod recipes;
pub mod swagger;
pub mod users;

use actix_web::{error::InternalError, web, HttpResponse, ResponseError};
use std::fmt::{Debug, Display};

use crate::utils::AppError;

/// Registers every route plus extractor error handlers.
/// `/recipes/report` must stay ahead of `/recipes/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| rejected(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| rejected(err)))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/users")
                .route("", web::post().to(users::create_user))
                .route("", web::get().to(users::list_users))
                .route("/{id}", web::get().to(users::get_user))
                .route("/{id}", web::put().to(users::update_user))
                .route("/{id}", web::delete().to(users::delete_user)),
        )
        .service(
            web::scope("/recipes")
                .route("", web::get().to(recipes::list_recipes))
                .route("", web::post().to(recipes::create_recipe))
                .route("/report", web::get().to(recipes::recipe_report))
                .route("/{id}", web::get().to(recipes::get_recipe))
                .route("/{id}", web::put().to(recipes::update_recipe))
                .route("/{id}", web::delete().to(recipes::delete_recipe)),
        );
}

/// Logs a failed request and renders the error body.
pub(crate) fn failure(route: &str, e: AppError) -> HttpResponse {
    if e.status_code().is_server_error() {
        log::error!("❌ {} failed: {}", route, e);
    } else {
        log::warn!("⚠️  {} rejected: {}", route, e);
    }
    e.error_response()
}

// Malformed JSON bodies and query strings get the same error shape as the services
fn rejected<E: Debug + Display + 'static>(err: E) -> actix_web::Error {
    let response = AppError::ValidationFailure(err.to_string()).error_response();
    InternalError::from_response(err, response).into()
}
