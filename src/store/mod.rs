//! Data store contract used by the service layer.
//!
//! Multi-document writes go through a [`Transaction`] obtained from
//! [`Store::begin`]. Changes become visible only on [`Transaction::commit`];
//! dropping a transaction without committing discards them.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{Recipe, RecipeChanges, RecipeFilter, User};
use crate::utils::AppError;

#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name reported by the health endpoint
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> Result<(), AppError>;

    async fn begin(&self) -> Result<Box<dyn Transaction>, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, AppError>;

    async fn list_recipes(&self) -> Result<Vec<Recipe>, AppError>;

    async fn find_recipe(&self, id: &ObjectId) -> Result<Option<Recipe>, AppError>;

    /// Runs the filter pipeline over the recipes collection.
    async fn aggregate_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, AppError>;
}

#[async_trait]
pub trait Transaction: Send {
    async fn find_user(&mut self, id: &ObjectId) -> Result<Option<User>, AppError>;

    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>, AppError>;

    /// Fails with `DuplicateEmail` if the store's unique constraint on email is violated.
    async fn insert_user(&mut self, user: &User) -> Result<(), AppError>;

    /// Returns the updated user, or `None` if no user has this id.
    async fn update_user(
        &mut self,
        id: &ObjectId,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, AppError>;

    async fn delete_user(&mut self, id: &ObjectId) -> Result<bool, AppError>;

    async fn insert_recipe(&mut self, recipe: &Recipe) -> Result<(), AppError>;

    async fn update_recipe(
        &mut self,
        id: &ObjectId,
        changes: &RecipeChanges,
    ) -> Result<Option<Recipe>, AppError>;

    async fn delete_recipe(&mut self, id: &ObjectId) -> Result<bool, AppError>;

    /// Removes every recipe whose `createdBy` is `user_id`, returning the count.
    async fn delete_recipes_by_creator(&mut self, user_id: &ObjectId) -> Result<u64, AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;

    async fn abort(self: Box<Self>) -> Result<(), AppError>;
}
