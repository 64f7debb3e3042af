// ==================== RECIPE REPORT ====================
// Builds the `$match` pipeline from the optional query criteria and runs it.

use regex::RegexBuilder;

use crate::{
    models::{MatchStage, Pattern, RecipeFilter, RecipeResponse, ReportQuery, ReportResponse},
    store::Store,
    utils::{parse_object_id, AppError},
};

/// Stage order: createdBy, name, ingredients. Blank `createdBy` and empty
/// patterns are ignored; no criteria at all matches every recipe.
pub fn build_filter(query: &ReportQuery) -> Result<RecipeFilter, AppError> {
    let mut stages = Vec::new();

    if let Some(created_by) = query.created_by.as_deref() {
        if !created_by.trim().is_empty() {
            stages.push(MatchStage::CreatedBy(parse_object_id(created_by)?));
        }
    }

    if let Some(name) = non_empty(&query.name) {
        stages.push(MatchStage::Name(pattern("name", name)?));
    }

    if let Some(ingredients) = non_empty(&query.ingredients) {
        stages.push(MatchStage::Ingredients(pattern("ingredients", ingredients)?));
    }

    Ok(RecipeFilter::new(stages))
}

pub async fn generate_report(store: &dyn Store, query: &ReportQuery) -> Result<ReportResponse, AppError> {
    let filter = build_filter(query)?;
    let recipes = store.aggregate_recipes(&filter).await?;

    log::debug!("📊 Report matched {} recipe(s) with {} stage(s)", recipes.len(), filter.stages().len());

    Ok(ReportResponse {
        total_recipes: recipes.len(),
        recipes: recipes.into_iter().map(RecipeResponse::from).collect(),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn pattern(field: &str, source: &str) -> Result<Pattern, AppError> {
    let regex = RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .map_err(|e| AppError::ValidationFailure(format!("Invalid {} pattern: {}", field, e)))?;
    Ok(Pattern::new(source.to_string(), regex))
}
