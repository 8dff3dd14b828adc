use crate::{
    error::{ApiError, Result},
    recipe::RecipeRecord,
    services::{
        extractor::{parse_text, Extractor},
        fetcher::{parse_target, Fetcher},
        normalizer::normalize,
    },
};

/// Fetch a page, extract the first recipe a strategy finds and normalize it.
pub async fn fetch_recipe(
    fetcher: &Fetcher,
    extractor: &Extractor,
    url: Option<&str>,
) -> Result<RecipeRecord> {
    let url = url.ok_or(ApiError::MissingUrl)?;
    let target = parse_target(url)?;

    let html = fetcher.fetch(target.as_str()).await.map_err(|e| {
        tracing::warn!(url = %target, err = %e, "recipe page fetch failed");
        ApiError::from(e)
    })?;

    let extraction = extractor.extract(&html)?;
    let mut raw = extraction.recipe;
    raw.source_url = Some(target.to_string());

    Ok(normalize(raw))
}

/// Manual paste path: plain-text parsing only, no network.
pub fn parse_pasted(text: Option<&str>) -> Result<RecipeRecord> {
    let text = text
        .filter(|t| !t.trim().is_empty())
        .ok_or(ApiError::MissingText)?;

    Ok(normalize(parse_text(text)))
}
