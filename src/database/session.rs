use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{ClientSession, Collection};

use crate::models::{Recipe, RecipeChanges, User};
use crate::store::Transaction;
use crate::utils::AppError;

/// A MongoDB client session with a started transaction.
///
/// The driver aborts an in-progress transaction when the session is dropped,
/// so an early return through `?` never leaves writes applied.
pub struct MongoTransaction {
    session: ClientSession,
    users: Collection<User>,
    recipes: Collection<Recipe>,
}

impl MongoTransaction {
    pub fn new(session: ClientSession, users: Collection<User>, recipes: Collection<Recipe>) -> Self {
        Self { session, users, recipes }
    }
}

#[async_trait]
impl Transaction for MongoTransaction {
    async fn find_user(&mut self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .find_one(doc! { "_id": *id })
            .session(&mut self.session)
            .await?)
    }

    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .find_one(doc! { "email": email })
            .session(&mut self.session)
            .await?)
    }

    async fn insert_user(&mut self, user: &User) -> Result<(), AppError> {
        self.users.insert_one(user).session(&mut self.session).await?;
        Ok(())
    }

    async fn update_user(
        &mut self,
        id: &ObjectId,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": { "name": name, "email": email } },
            )
            .return_document(ReturnDocument::After)
            .session(&mut self.session)
            .await?)
    }

    async fn delete_user(&mut self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .users
            .delete_one(doc! { "_id": *id })
            .session(&mut self.session)
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn insert_recipe(&mut self, recipe: &Recipe) -> Result<(), AppError> {
        self.recipes.insert_one(recipe).session(&mut self.session).await?;
        Ok(())
    }

    async fn update_recipe(
        &mut self,
        id: &ObjectId,
        changes: &RecipeChanges,
    ) -> Result<Option<Recipe>, AppError> {
        Ok(self
            .recipes
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": {
                    "name": changes.name.as_str(),
                    "ingredients": changes.ingredients.clone(),
                    "instructions": changes.instructions.as_str(),
                    "createdBy": changes.created_by,
                } },
            )
            .return_document(ReturnDocument::After)
            .session(&mut self.session)
            .await?)
    }

    async fn delete_recipe(&mut self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .recipes
            .delete_one(doc! { "_id": *id })
            .session(&mut self.session)
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_recipes_by_creator(&mut self, user_id: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .recipes
            .delete_many(doc! { "createdBy": *user_id })
            .session(&mut self.session)
            .await?;
        Ok(result.deleted_count)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let mut session = self.session;
        session.commit_transaction().await?;
        Ok(())
    }

    async fn abort(self: Box<Self>) -> Result<(), AppError> {
        let mut session = self.session;
        session.abort_transaction().await?;
        Ok(())
    }
}
