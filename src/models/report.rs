use mongodb::bson::{doc, oid::ObjectId, Document};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Recipe, RecipeResponse};

/// Query string of GET /recipes/report
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Restrict to recipes created by this user id
    pub created_by: Option<String>,
    /// Case-insensitive pattern matched against the recipe name
    pub name: Option<String>,
    /// Case-insensitive pattern matched against any ingredient
    pub ingredients: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub total_recipes: usize,
    pub recipes: Vec<RecipeResponse>,
}

/// Case-insensitive pattern, kept in source form for the aggregation pipeline
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: String, regex: Regex) -> Self {
        Pattern { source, regex }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    fn to_bson(&self) -> Document {
        doc! { "$regex": self.source.as_str(), "$options": "i" }
    }
}

/// One `$match` stage of the report pipeline
#[derive(Debug, Clone)]
pub enum MatchStage {
    All,
    CreatedBy(ObjectId),
    Name(Pattern),
    Ingredients(Pattern),
}

impl MatchStage {
    pub fn to_document(&self) -> Document {
        match self {
            MatchStage::All => doc! { "$match": {} },
            MatchStage::CreatedBy(id) => doc! { "$match": { "createdBy": *id } },
            MatchStage::Name(p) => doc! { "$match": { "name": p.to_bson() } },
            MatchStage::Ingredients(p) => doc! { "$match": { "ingredients": p.to_bson() } },
        }
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            MatchStage::All => true,
            MatchStage::CreatedBy(id) => recipe.created_by == *id,
            MatchStage::Name(p) => p.is_match(&recipe.name),
            // a regex on an array field matches when any element matches
            MatchStage::Ingredients(p) => recipe.ingredients.iter().any(|i| p.is_match(i)),
        }
    }
}

/// Ordered filter pipeline; stages are combined with logical AND.
#[derive(Debug, Clone)]
pub struct RecipeFilter {
    stages: Vec<MatchStage>,
}

impl RecipeFilter {
    /// An empty stage list becomes a single match-everything stage.
    pub fn new(stages: Vec<MatchStage>) -> Self {
        if stages.is_empty() {
            RecipeFilter { stages: vec![MatchStage::All] }
        } else {
            RecipeFilter { stages }
        }
    }

    pub fn stages(&self) -> &[MatchStage] {
        &self.stages
    }

    pub fn pipeline(&self) -> Vec<Document> {
        self.stages.iter().map(MatchStage::to_document).collect()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.stages.iter().all(|stage| stage.matches(recipe))
    }
}
