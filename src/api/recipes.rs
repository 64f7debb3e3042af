use actix_web::{web, HttpResponse};

use super::failure;
use crate::{
    models::{RecipeRequest, RecipeResponse, ReportQuery, ReportResponse},
    services::{recipe_service, report_service},
    store::Store,
};

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "Recipes",
    responses(
        (status = 200, description = "All recipes", body = [RecipeResponse]),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_recipes(store: web::Data<dyn Store>) -> HttpResponse {
    match recipe_service::list_recipes(store.get_ref()).await {
        Ok(recipes) => HttpResponse::Ok().json(
            recipes.into_iter().map(RecipeResponse::from).collect::<Vec<_>>(),
        ),
        Err(e) => failure("GET /recipes", e),
    }
}

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "Recipes",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe found", body = RecipeResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn get_recipe(store: web::Data<dyn Store>, path: web::Path<String>) -> HttpResponse {
    match recipe_service::get_recipe(store.get_ref(), &path).await {
        Ok(recipe) => HttpResponse::Ok().json(RecipeResponse::from(recipe)),
        Err(e) => failure("GET /recipes/{id}", e),
    }
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "Recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Creator does not exist or missing fields")
    )
)]
pub async fn create_recipe(
    store: web::Data<dyn Store>,
    request: web::Json<RecipeRequest>,
) -> HttpResponse {
    log::info!("📝 POST /recipes - name: {}, createdBy: {}", request.name, request.created_by);

    match recipe_service::create_recipe(store.get_ref(), request.into_inner()).await {
        Ok(recipe) => HttpResponse::Created().json(RecipeResponse::from(recipe)),
        Err(e) => failure("POST /recipes", e),
    }
}

#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "Recipes",
    params(("id" = String, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn update_recipe(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    request: web::Json<RecipeRequest>,
) -> HttpResponse {
    log::info!("✏️  PUT /recipes/{}", path);

    match recipe_service::update_recipe(store.get_ref(), &path, request.into_inner()).await {
        Ok(recipe) => HttpResponse::Ok().json(RecipeResponse::from(recipe)),
        Err(e) => failure("PUT /recipes/{id}", e),
    }
}

#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "Recipes",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 404, description = "Recipe not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn delete_recipe(store: web::Data<dyn Store>, path: web::Path<String>) -> HttpResponse {
    log::info!("🗑️  DELETE /recipes/{}", path);

    match recipe_service::delete_recipe(store.get_ref(), &path).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => failure("DELETE /recipes/{id}", e),
    }
}

#[utoipa::path(
    get,
    path = "/recipes/report",
    tag = "Recipes",
    params(ReportQuery),
    responses(
        (status = 200, description = "Matching recipes and their count", body = ReportResponse),
        (status = 400, description = "Invalid user id or pattern")
    )
)]
pub async fn recipe_report(
    store: web::Data<dyn Store>,
    query: web::Query<ReportQuery>,
) -> HttpResponse {
    log::info!("📊 GET /recipes/report - {:?}", query.0);

    match report_service::generate_report(store.get_ref(), &query).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => failure("GET /recipes/report", e),
    }
}
