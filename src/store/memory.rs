use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{Store, Transaction};
use crate::models::{Recipe, RecipeChanges, RecipeFilter, User};
use crate::utils::AppError;

#[derive(Debug, Clone, Default)]
struct Collections {
    users: Vec<User>,
    recipes: Vec<Recipe>,
}

/// Process-local store with the same contract as the MongoDB backend.
///
/// Transactions hold the collection lock until they finish, so they run one
/// at a time and reads never see staged changes.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn begin(&self) -> Result<Box<dyn Transaction>, AppError> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, staged }))
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.state.lock().await.users.clone())
    }

    async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, AppError> {
        Ok(self.state.lock().await.recipes.clone())
    }

    async fn find_recipe(&self, id: &ObjectId) -> Result<Option<Recipe>, AppError> {
        let state = self.state.lock().await;
        Ok(state.recipes.iter().find(|r| r.id == *id).cloned())
    }

    async fn aggregate_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .recipes
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}

/// Works on a copy of the collections; commit swaps the copy in.
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<Collections>,
    staged: Collections,
}

impl MemoryTransaction {
    fn email_taken(&self, email: &str, except: Option<&ObjectId>) -> bool {
        self.staged
            .users
            .iter()
            .any(|u| u.email == email && Some(&u.id) != except)
    }
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn find_user(&mut self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.staged.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.staged.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&mut self, user: &User) -> Result<(), AppError> {
        if self.email_taken(&user.email, None) {
            return Err(AppError::DuplicateEmail);
        }
        self.staged.users.push(user.clone());
        Ok(())
    }

    async fn update_user(
        &mut self,
        id: &ObjectId,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        if !self.staged.users.iter().any(|u| u.id == *id) {
            return Ok(None);
        }
        if self.email_taken(email, Some(id)) {
            return Err(AppError::DuplicateEmail);
        }
        let user = self
            .staged
            .users
            .iter_mut()
            .find(|u| u.id == *id)
            .map(|u| {
                u.name = name.to_string();
                u.email = email.to_string();
                u.clone()
            });
        Ok(user)
    }

    async fn delete_user(&mut self, id: &ObjectId) -> Result<bool, AppError> {
        let before = self.staged.users.len();
        self.staged.users.retain(|u| u.id != *id);
        Ok(self.staged.users.len() < before)
    }

    async fn insert_recipe(&mut self, recipe: &Recipe) -> Result<(), AppError> {
        self.staged.recipes.push(recipe.clone());
        Ok(())
    }

    async fn update_recipe(
        &mut self,
        id: &ObjectId,
        changes: &RecipeChanges,
    ) -> Result<Option<Recipe>, AppError> {
        let recipe = self
            .staged
            .recipes
            .iter_mut()
            .find(|r| r.id == *id)
            .map(|r| {
                r.name = changes.name.clone();
                r.ingredients = changes.ingredients.clone();
                r.instructions = changes.instructions.clone();
                r.created_by = changes.created_by;
                r.clone()
            });
        Ok(recipe)
    }

    async fn delete_recipe(&mut self, id: &ObjectId) -> Result<bool, AppError> {
        let before = self.staged.recipes.len();
        self.staged.recipes.retain(|r| r.id != *id);
        Ok(self.staged.recipes.len() < before)
    }

    async fn delete_recipes_by_creator(&mut self, user_id: &ObjectId) -> Result<u64, AppError> {
        let before = self.staged.recipes.len();
        self.staged.recipes.retain(|r| r.created_by != *user_id);
        Ok((before - self.staged.recipes.len()) as u64)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }

    async fn abort(self: Box<Self>) -> Result<(), AppError> {
        Ok(())
    }
}
