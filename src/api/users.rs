use actix_web::{web, HttpResponse};

use super::failure;
use crate::{
    models::{UserRequest, UserResponse},
    services::user_service,
    store::Store,
};

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Email already registered or missing fields")
    )
)]
pub async fn create_user(
    store: web::Data<dyn Store>,
    request: web::Json<UserRequest>,
) -> HttpResponse {
    log::info!("📝 POST /users - email: {}", request.email);

    match user_service::create_user(store.get_ref(), request.into_inner()).await {
        Ok(user) => HttpResponse::Created().json(UserResponse::from(user)),
        Err(e) => failure("POST /users", e),
    }
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_users(store: web::Data<dyn Store>) -> HttpResponse {
    match user_service::list_users(store.get_ref()).await {
        Ok(users) => HttpResponse::Ok().json(
            users.into_iter().map(UserResponse::from).collect::<Vec<_>>(),
        ),
        Err(e) => failure("GET /users", e),
    }
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(store: web::Data<dyn Store>, path: web::Path<String>) -> HttpResponse {
    match user_service::get_user(store.get_ref(), &path).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(e) => failure("GET /users/{id}", e),
    }
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid request or email taken"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    request: web::Json<UserRequest>,
) -> HttpResponse {
    log::info!("✏️  PUT /users/{}", path);

    match user_service::update_user(store.get_ref(), &path, request.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(e) => failure("PUT /users/{id}", e),
    }
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User and their recipes deleted"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn delete_user(store: web::Data<dyn Store>, path: web::Path<String>) -> HttpResponse {
    log::info!("🗑️  DELETE /users/{}", path);

    match user_service::delete_user(store.get_ref(), &path).await {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => failure("DELETE /users/{id}", e),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::api;
    use crate::store::{MemoryStore, Store};

    fn store_data() -> web::Data<dyn Store> {
        web::Data::from(Arc::new(MemoryStore::new()) as Arc<dyn Store>)
    }

    #[actix_web::test]
    async fn test_register_and_fetch_user() {
        let app = test::init_service(App::new().app_data(store_data()).configure(api::configure)).await;

        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "name": "Ana", "email": "ana@example.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let id = created["_id"].as_str().unwrap().to_string();

        let first: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri(&format!("/users/{}", id)).to_request(),
        )
        .await;
        let second: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri(&format!("/users/{}", id)).to_request(),
        )
        .await;
        assert_eq!(first, created);
        assert_eq!(first, second);
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_bad_request() {
        let app = test::init_service(App::new().app_data(store_data()).configure(api::configure)).await;
        let body = json!({ "name": "Ana", "email": "ana@example.com" });

        let req = test::TestRequest::post().uri("/users").set_json(&body).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::post().uri("/users").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"], "User already exists with this email");
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let app = test::init_service(App::new().app_data(store_data()).configure(api::configure)).await;

        let req = test::TestRequest::post()
            .uri("/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["success"], false);
    }

    #[actix_web::test]
    async fn test_delete_unknown_user_is_not_found() {
        let app = test::init_service(App::new().app_data(store_data()).configure(api::configure)).await;

        let req = test::TestRequest::delete()
            .uri("/users/64b7f0c2a1b2c3d4e5f60718")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
