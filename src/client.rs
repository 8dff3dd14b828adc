//! Caller side of the recipe service: a typed client and the caller-owned
//! recipe collection it feeds.

use serde_json::Value;

use crate::{
    error::ApiError,
    models::{ErrorResponse, RecipeResponse},
    recipe::{MethodText, RawRecipe, RecipeRecord},
    services::{normalizer::normalize, recipes::parse_pasted},
};

pub const RECIPE_PATH: &str = "/api/recipe";

/// Messages are shown to the end user as-is.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Missing recipe url")]
    MissingUrl,

    #[error("Missing recipe text")]
    MissingText,

    #[error("{0}")]
    Server(String),

    #[error("Could not reach recipe service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid service url")]
    InvalidServiceUrl,
}

#[derive(Clone)]
pub struct RecipeClient {
    http: reqwest::Client,
    endpoint: url::Url,
}

impl RecipeClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let endpoint = url::Url::parse(base_url)
            .and_then(|base| base.join(RECIPE_PATH))
            .map_err(|_| ClientError::InvalidServiceUrl)?;

        Ok(Self { http, endpoint })
    }

    pub async fn fetch_recipe(&self, url: &str) -> Result<RecipeRecord, ClientError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ClientError::MissingUrl);
        }

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("url", url)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("Server error: {body}"));
            return Err(ClientError::Server(message));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|_| ClientError::Server(format!("Server error: {body}")))?;
        if let Some(error) = value.get("error").and_then(Value::as_str) {
            return Err(ClientError::Server(error.to_string()));
        }

        let recipe: RecipeResponse = serde_json::from_value(value)
            .map_err(|e| ClientError::Server(format!("Server error: {e}")))?;

        Ok(normalize(RawRecipe {
            title: Some(recipe.title),
            ingredients: Some(recipe.ingredients),
            method: MethodText::Lines(recipe.method),
            source_url: Some(url.to_string()),
        }))
    }
}

/// Recipes collected by one caller, in the order they were added.
#[derive(Debug, Default)]
pub struct RecipeBook {
    recipes: Vec<RecipeRecord>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipes(&self) -> &[RecipeRecord] {
        &self.recipes
    }

    pub fn push(&mut self, recipe: RecipeRecord) -> &RecipeRecord {
        self.recipes.push(recipe);
        &self.recipes[self.recipes.len() - 1]
    }

    pub async fn add_from_url(
        &mut self,
        client: &RecipeClient,
        url: &str,
    ) -> Result<&RecipeRecord, ClientError> {
        let recipe = client.fetch_recipe(url).await?;
        Ok(self.push(recipe))
    }

    pub fn add_pasted(&mut self, text: &str) -> Result<&RecipeRecord, ClientError> {
        let recipe = parse_pasted(Some(text)).map_err(|e| match e {
            ApiError::MissingText => ClientError::MissingText,
            other => ClientError::Server(other.to_string()),
        })?;
        Ok(self.push(recipe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> RecipeClient {
        RecipeClient::new(reqwest::Client::new(), &server.base_url()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_recipe_sets_source_url() {
        let server = MockServer::start_async().await;
        let endpoint = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(RECIPE_PATH)
                    .query_param("url", "https://example.com/pie");
                then.status(200).json_body(serde_json::json!({
                    "title": "Apple Pie",
                    "ingredients": ["Apples", "Pastry"],
                    "method": ["Fill", "Bake"]
                }));
            })
            .await;

        let recipe = client(&server)
            .fetch_recipe("https://example.com/pie")
            .await
            .unwrap();

        endpoint.assert_async().await;
        assert_eq!(recipe.title(), "Apple Pie");
        assert_eq!(recipe.method(), ["Fill", "Bake"]);
        assert_eq!(recipe.source_url(), Some("https://example.com/pie"));
    }

    #[tokio::test]
    async fn test_server_error_message_surfaces() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(RECIPE_PATH);
                then.status(500).json_body(serde_json::json!({
                    "error": "Could not parse a recipe from this page"
                }));
            })
            .await;

        let err = client(&server)
            .fetch_recipe("https://example.com/blog")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Could not parse a recipe from this page");
    }

    #[tokio::test]
    async fn test_error_field_on_success_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(RECIPE_PATH);
                then.status(200)
                    .json_body(serde_json::json!({ "error": "upstream said no" }));
            })
            .await;

        let err = client(&server)
            .fetch_recipe("https://example.com/x")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "upstream said no");
    }

    #[tokio::test]
    async fn test_blank_url_sends_nothing() {
        let server = MockServer::start_async().await;
        let endpoint = server
            .mock_async(|when, then| {
                when.method(GET).path(RECIPE_PATH);
                then.status(200);
            })
            .await;

        let err = client(&server).fetch_recipe("  ").await.unwrap_err();

        assert!(matches!(err, ClientError::MissingUrl));
        endpoint.assert_hits_async(0).await;
    }

    #[test]
    fn test_book_appends_pasted_recipes() {
        let mut book = RecipeBook::new();
        book.add_pasted("Lemon Cake\nIngredients:\nFlour\nSugar\nMethod:\nMix\nBake")
            .unwrap();
        book.add_pasted("Toast").unwrap();

        assert!(matches!(book.add_pasted(""), Err(ClientError::MissingText)));
        let titles: Vec<_> = book.recipes().iter().map(RecipeRecord::title).collect();
        assert_eq!(titles, ["Lemon Cake", "Toast"]);
    }
}
