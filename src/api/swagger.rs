use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe Service API",
        version = "1.0.0",
        description = "REST API for users and their recipes.\n\n**Features:**\n- User registration with unique email\n- Recipe CRUD, each recipe linked to its creating user\n- Deleting a user removes their recipes\n- Filtered recipe report"
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        // Recipes
        crate::api::recipes::list_recipes,
        crate::api::recipes::get_recipe,
        crate::api::recipes::create_recipe,
        crate::api::recipes::update_recipe,
        crate::api::recipes::delete_recipe,
        crate::api::recipes::recipe_report,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::UserRequest,
            crate::models::UserResponse,
            crate::models::RecipeRequest,
            crate::models::RecipeResponse,
            crate::models::ReportResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service and data store status."),
        (name = "Users", description = "User registration and management. Deleting a user also deletes their recipes."),
        (name = "Recipes", description = "Recipe management and the filtered recipe report."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/users", "/users/{id}", "/recipes", "/recipes/{id}", "/recipes/report"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
