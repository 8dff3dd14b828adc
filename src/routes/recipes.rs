use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    error::Result,
    models::{ParseTextRequest, RecipeQuery, RecipeResponse},
    services::recipes::{fetch_recipe, parse_pasted},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/recipe", get(fetch))
        .route("/fetchRecipe", get(fetch))
        .route("/api/recipes/parse", post(parse))
        .route("/health", get(health))
}

async fn fetch(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<RecipeResponse>> {
    let record = fetch_recipe(&state.fetcher, &state.extractor, query.url.as_deref()).await?;
    Ok(Json(record.into()))
}

async fn parse(Json(req): Json<ParseTextRequest>) -> Result<Json<RecipeResponse>> {
    let record = parse_pasted(req.text.as_deref())?;
    Ok(Json(record.into()))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
