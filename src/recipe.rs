use serde::{Deserialize, Serialize};

pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

/// Method as produced by an extraction strategy, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodText {
    /// Already split into ordered steps.
    Lines(Vec<String>),
    /// One unstructured block, one step per line.
    Block(String),
}

impl Default for MethodText {
    fn default() -> Self {
        MethodText::Lines(Vec::new())
    }
}

impl MethodText {
    pub fn is_empty(&self) -> bool {
        match self {
            MethodText::Lines(lines) => lines.is_empty(),
            MethodText::Block(text) => text.trim().is_empty(),
        }
    }
}

/// Best-effort recipe shape handed from a strategy to the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecipe {
    pub title: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub method: MethodText,
    pub source_url: Option<String>,
}

impl RawRecipe {
    /// A strategy result counts only if it found a title or at least one ingredient.
    pub fn has_content(&self) -> bool {
        let has_title = self
            .title
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        let has_ingredients = self
            .ingredients
            .as_ref()
            .is_some_and(|items| !items.is_empty());

        has_title || has_ingredients
    }
}

/// Normalized recipe owned by the caller. Built by the normalizer only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    title: String,
    ingredients: Vec<String>,
    method: Vec<String>,
    #[serde(default, rename = "sourceUrl", skip_serializing_if = "Option::is_none")]
    source_url: Option<String>,
}

impl RecipeRecord {
    pub(crate) fn new(
        title: String,
        ingredients: Vec<String>,
        method: Vec<String>,
        source_url: Option<String>,
    ) -> Self {
        Self {
            title,
            ingredients,
            method,
            source_url,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn method(&self) -> &[String] {
        &self.method
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }
}
