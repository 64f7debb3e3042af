use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use super::require;
use crate::utils::{parse_object_id, AppError};

/// Recipe document as stored in the `recipes` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    /// Back reference to the creating user (lookup only)
    pub created_by: ObjectId,
    pub created_at: bson::DateTime,
}

/// Mutable fields of a recipe, already parsed
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeChanges {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub created_by: ObjectId,
}

/// Body of POST /recipes and PUT /recipes/{id}
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[serde(default)]
    pub name: String,
    /// Comma-separated ingredient list, e.g. "eggs,milk,flour"
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub created_by: String,
}

impl RecipeRequest {
    /// Checks required fields and parses the request into stored form.
    pub fn into_changes(self) -> Result<RecipeChanges, AppError> {
        require("name", &self.name)?;
        require("instructions", &self.instructions)?;
        require("createdBy", &self.created_by)?;
        let created_by = parse_object_id(&self.created_by)?;

        Ok(RecipeChanges {
            ingredients: split_ingredients(&self.ingredients),
            name: self.name,
            instructions: self.instructions,
            created_by,
        })
    }
}

/// Splits on every comma. Entries are kept verbatim: no trimming, no dropping of empties.
pub fn split_ingredients(csv: &str) -> Vec<String> {
    csv.split(',').map(str::to_owned).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub created_by: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(r: Recipe) -> Self {
        RecipeResponse {
            id: r.id.to_hex(),
            name: r.name,
            ingredients: r.ingredients,
            instructions: r.instructions,
            created_by: r.created_by.to_hex(),
            created_at: DateTime::from_timestamp_millis(r.created_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}
