// ==================== USER LIFECYCLE ====================
// Email uniqueness is checked inside the same transaction as the insert.
// Deleting a user removes their recipes in the same transaction.

use mongodb::bson::oid::ObjectId;

use crate::{
    models::{User, UserRequest},
    store::Store,
    utils::{parse_object_id, AppError},
};

pub async fn create_user(store: &dyn Store, request: UserRequest) -> Result<User, AppError> {
    request.validate()?;

    let mut tx = store.begin().await?;

    if tx.find_user_by_email(&request.email).await?.is_some() {
        tx.abort().await?;
        return Err(AppError::DuplicateEmail);
    }

    let user = User {
        id: ObjectId::new(),
        name: request.name,
        email: request.email,
    };
    tx.insert_user(&user).await?;
    tx.commit().await?;

    log::info!("✅ User {} created ({})", user.id, user.email);
    Ok(user)
}

pub async fn list_users(store: &dyn Store) -> Result<Vec<User>, AppError> {
    store.list_users().await
}

pub async fn get_user(store: &dyn Store, id: &str) -> Result<User, AppError> {
    let id = parse_object_id(id)?;
    store
        .find_user(&id)
        .await?
        .ok_or(AppError::NotFound("User"))
}

/// Replaces name and email. Email is not re-checked here; only the store's
/// unique constraint can reject it.
pub async fn update_user(store: &dyn Store, id: &str, request: UserRequest) -> Result<User, AppError> {
    let id = parse_object_id(id)?;
    request.validate()?;

    let mut tx = store.begin().await?;

    match tx.update_user(&id, &request.name, &request.email).await? {
        Some(user) => {
            tx.commit().await?;
            log::info!("✅ User {} updated", user.id);
            Ok(user)
        }
        None => {
            tx.abort().await?;
            Err(AppError::NotFound("User"))
        }
    }
}

/// Deletes the user and all recipes they created. Returns the number of recipes removed.
pub async fn delete_user(store: &dyn Store, id: &str) -> Result<u64, AppError> {
    let id = parse_object_id(id)?;

    let mut tx = store.begin().await?;

    if tx.find_user(&id).await?.is_none() {
        tx.abort().await?;
        return Err(AppError::NotFound("User"));
    }

    tx.delete_user(&id).await?;
    let removed = tx.delete_recipes_by_creator(&id).await?;
    tx.commit().await?;

    log::info!("🗑️  User {} deleted with {} recipe(s)", id, removed);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_recipe, seed_user};
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        seed_user(&store, "Ana", "ana@example.com").await;

        let second = create_user(
            &store,
            UserRequest { name: "Other Ana".into(), email: "ana@example.com".into() },
        )
        .await;

        assert!(matches!(second, Err(AppError::DuplicateEmail)));
        assert_eq!(list_users(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let store = MemoryStore::new();
        let result = create_user(&store, UserRequest { name: String::new(), email: "x@example.com".into() }).await;

        assert!(matches!(result, Err(AppError::ValidationFailure(_))));
        assert!(list_users(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_user() {
        let store = MemoryStore::new();
        let ana = seed_user(&store, "Ana", "ana@example.com").await;

        assert_eq!(get_user(&store, &ana.id.to_hex()).await.unwrap(), ana);
        assert!(matches!(
            get_user(&store, &ObjectId::new().to_hex()).await,
            Err(AppError::NotFound("User"))
        ));
        assert!(matches!(
            get_user(&store, "not-an-id").await,
            Err(AppError::InvalidIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn test_update_user() {
        let store = MemoryStore::new();
        let ana = seed_user(&store, "Ana", "ana@example.com").await;

        let updated = update_user(
            &store,
            &ana.id.to_hex(),
            UserRequest { name: "Ana Maria".into(), email: "anamaria@example.com".into() },
        )
        .await
        .unwrap();

        assert_eq!(updated.id, ana.id);
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(get_user(&store, &ana.id.to_hex()).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let store = MemoryStore::new();
        let result = update_user(
            &store,
            &ObjectId::new().to_hex(),
            UserRequest { name: "Ghost".into(), email: "ghost@example.com".into() },
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound("User"))));
    }

    #[tokio::test]
    async fn test_update_into_taken_email_hits_store_constraint() {
        let store = MemoryStore::new();
        seed_user(&store, "Ana", "ana@example.com").await;
        let bob = seed_user(&store, "Bob", "bob@example.com").await;

        let result = update_user(
            &store,
            &bob.id.to_hex(),
            UserRequest { name: "Bob".into(), email: "ana@example.com".into() },
        )
        .await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
        assert_eq!(get_user(&store, &bob.id.to_hex()).await.unwrap().email, "bob@example.com");
    }

    #[tokio::test]
    async fn test_delete_cascades_to_recipes() {
        let store = MemoryStore::new();
        let ana = seed_user(&store, "Ana", "ana@example.com").await;
        let bob = seed_user(&store, "Bob", "bob@example.com").await;
        seed_recipe(&store, "Pancakes", "eggs,milk", ana.id).await;
        seed_recipe(&store, "Omelette", "eggs", ana.id).await;
        let kept = seed_recipe(&store, "Toast", "bread", bob.id).await;

        assert_eq!(delete_user(&store, &ana.id.to_hex()).await.unwrap(), 2);

        assert!(store.find_user(&ana.id).await.unwrap().is_none());
        assert_eq!(store.list_recipes().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let store = MemoryStore::new();
        assert!(matches!(
            delete_user(&store, &ObjectId::new().to_hex()).await,
            Err(AppError::NotFound("User"))
        ));
    }
}
