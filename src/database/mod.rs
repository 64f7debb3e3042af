mod session;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

use crate::models::{Recipe, RecipeFilter, User};
use crate::store::{Store, Transaction};
use session::MongoTransaction;
use crate::utils::AppError;

pub const USERS: &str = "users";
pub const RECIPES: &str = "recipes";

const DEFAULT_DATABASE: &str = "recipes";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        // Database name comes from the URI path, e.g. mongodb://host:27017/recipes
        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;
        log::info!("📦 Using database: {}", db_name);

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the service relies on
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        log::info!("🔧 Creating database indexes...");

        // Unique email backs the pre-check done when creating users
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match self.collection::<Document>(USERS).create_index(email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create unique index on users(email): {}", e),
        }

        // Cascade delete and report filter look recipes up by creator
        let creator_index = IndexModel::builder()
            .keys(doc! { "createdBy": 1 })
            .build();

        match self.collection::<Document>(RECIPES).create_index(creator_index).await {
            Ok(_) => log::info!("   ✅ Index created: recipes(createdBy)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn users(&self) -> Collection<User> {
        self.collection(USERS)
    }

    pub fn recipes(&self) -> Collection<Recipe> {
        self.collection(RECIPES)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Store for MongoDB {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn begin(&self) -> Result<Box<dyn Transaction>, AppError> {
        let mut session = self.client().start_session().await?;
        session.start_transaction().await?;
        Ok(Box::new(MongoTransaction::new(session, self.users(), self.recipes())))
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.users().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "_id": *id }).await?)
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, AppError> {
        let cursor = self.recipes().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_recipe(&self, id: &ObjectId) -> Result<Option<Recipe>, AppError> {
        Ok(self.recipes().find_one(doc! { "_id": *id }).await?)
    }

    async fn aggregate_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, AppError> {
        let cursor = self.recipes().aggregate(filter.pipeline()).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        documents
            .into_iter()
            .map(|d| bson::from_document::<Recipe>(d).map_err(AppError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{recipe_service, user_service};
    use crate::models::{RecipeRequest, UserRequest};

    // Transactions need a replica set, e.g. `mongod --replSet rs0`
    async fn connect() -> MongoDB {
        dotenv::dotenv().ok();
        let uri = std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/recipes_test?replicaSet=rs0".to_string());
        MongoDB::new(&uri).await.unwrap()
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        let db = connect().await;
        assert!(db.ping().await.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires a MongoDB replica set
    async fn test_cascade_delete_against_mongodb() {
        let db = connect().await;
        let email = format!("{}@example.com", ObjectId::new().to_hex());

        let user = user_service::create_user(
            &db,
            UserRequest { name: "Cascade".into(), email: email.clone() },
        )
        .await
        .unwrap();
        recipe_service::create_recipe(
            &db,
            RecipeRequest {
                name: "Toast".into(),
                ingredients: "bread,butter".into(),
                instructions: "Toast the bread".into(),
                created_by: user.id.to_hex(),
            },
        )
        .await
        .unwrap();

        user_service::delete_user(&db, &user.id.to_hex()).await.unwrap();

        let left = db
            .recipes()
            .count_documents(doc! { "createdBy": user.id })
            .await
            .unwrap();
        assert_eq!(left, 0);
    }
}
