// ==================== RECIPE LIFECYCLE ====================
// A recipe may only be created for an existing user. The creator is not
// re-validated on update.

use mongodb::bson::{self, oid::ObjectId};

use crate::{
    models::{Recipe, RecipeRequest},
    store::Store,
    utils::{parse_object_id, AppError},
};

pub async fn create_recipe(store: &dyn Store, request: RecipeRequest) -> Result<Recipe, AppError> {
    let changes = request.into_changes()?;

    let mut tx = store.begin().await?;

    if tx.find_user(&changes.created_by).await?.is_none() {
        tx.abort().await?;
        return Err(AppError::InvalidReference);
    }

    let recipe = Recipe {
        id: ObjectId::new(),
        name: changes.name,
        ingredients: changes.ingredients,
        instructions: changes.instructions,
        created_by: changes.created_by,
        created_at: bson::DateTime::now(),
    };
    tx.insert_recipe(&recipe).await?;
    tx.commit().await?;

    log::info!("✅ Recipe {} created by {}", recipe.id, recipe.created_by);
    Ok(recipe)
}

pub async fn list_recipes(store: &dyn Store) -> Result<Vec<Recipe>, AppError> {
    store.list_recipes().await
}

pub async fn get_recipe(store: &dyn Store, id: &str) -> Result<Recipe, AppError> {
    let id = parse_object_id(id)?;
    store
        .find_recipe(&id)
        .await?
        .ok_or(AppError::NotFound("Recipe"))
}

pub async fn update_recipe(store: &dyn Store, id: &str, request: RecipeRequest) -> Result<Recipe, AppError> {
    let id = parse_object_id(id)?;
    let changes = request.into_changes()?;

    let mut tx = store.begin().await?;

    match tx.update_recipe(&id, &changes).await? {
        Some(recipe) => {
            tx.commit().await?;
            log::info!("✅ Recipe {} updated", recipe.id);
            Ok(recipe)
        }
        None => {
            tx.abort().await?;
            Err(AppError::NotFound("Recipe"))
        }
    }
}

/// Not-found is decided by the delete call's own result.
pub async fn delete_recipe(store: &dyn Store, id: &str) -> Result<(), AppError> {
    let id = parse_object_id(id)?;

    let mut tx = store.begin().await?;

    if !tx.delete_recipe(&id).await? {
        tx.abort().await?;
        return Err(AppError::NotFound("Recipe"));
    }
    tx.commit().await?;

    log::info!("🗑️  Recipe {} deleted", id);
    Ok(())
}
