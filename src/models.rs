use serde::{Deserialize, Serialize};

use crate::recipe::RecipeRecord;

#[derive(Debug, Deserialize)]
pub struct RecipeQuery {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseTextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Wire shape of a recipe, without the origin URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub title: String,
    pub ingredients: Vec<String>,
    pub method: Vec<String>,
}

impl From<RecipeRecord> for RecipeResponse {
    fn from(record: RecipeRecord) -> Self {
        Self {
            title: record.title().to_string(),
            ingredients: record.ingredients().to_vec(),
            method: record.method().to_vec(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub authenticated: bool,
}
