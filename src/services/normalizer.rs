use crate::recipe::{MethodText, RawRecipe, RecipeRecord, UNTITLED_RECIPE};

/// Turn whatever a strategy produced into the caller-facing record.
pub fn normalize(raw: RawRecipe) -> RecipeRecord {
    let title = raw
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED_RECIPE.to_string());

    RecipeRecord::new(
        title,
        raw.ingredients.unwrap_or_default(),
        normalize_method(raw.method),
        raw.source_url,
    )
}

pub fn normalize_method(method: MethodText) -> Vec<String> {
    match method {
        MethodText::Lines(lines) => lines,
        MethodText::Block(text) => split_lines(&text),
    }
}

/// Split on `\n` / `\r\n`, trimming each line and dropping blanks.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
