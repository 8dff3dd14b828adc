//! schema.org Recipe metadata, from JSON-LD blocks or microdata attributes.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use super::{element_text, Strategy, StrategyError};
use crate::recipe::{MethodText, RawRecipe};

static JSONLD: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid JSON-LD selector")
});
static ITEMSCOPE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[itemscope][itemtype]").expect("valid itemscope selector"));
static ITEM_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[itemprop="name"]"#).expect("valid name selector"));
static ITEM_INGREDIENT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[itemprop="recipeIngredient"], [itemprop="ingredients"]"#)
        .expect("valid ingredient selector")
});
static ITEM_INSTRUCTIONS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[itemprop="recipeInstructions"]"#).expect("valid instructions selector")
});
static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("valid li selector"));

pub struct StructuredDataStrategy;

impl Strategy for StructuredDataStrategy {
    fn extract(&self, document: &Html) -> Result<Option<RawRecipe>, StrategyError> {
        let mut malformed = None;

        for script in document.select(&JSONLD) {
            let raw = script.text().collect::<String>();
            let json: Value = match serde_json::from_str(&sanitize_json(&raw)) {
                Ok(v) => v,
                Err(e) => {
                    malformed = Some(e.to_string());
                    continue;
                }
            };

            if let Some(recipe) = find_recipe(&json) {
                return Ok(Some(recipe_from_json(recipe)));
            }
        }

        if let Some(recipe) = recipe_from_microdata(document) {
            return Ok(Some(recipe));
        }

        match malformed {
            Some(reason) => Err(StrategyError::MalformedStructuredData(reason)),
            None => Ok(None),
        }
    }

    fn name(&self) -> &'static str {
        "structured-data"
    }
}

/// Escape raw control characters that some sites leave inside JSON strings.
fn sanitize_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if in_string {
            match c {
                _ if escaped => {
                    escaped = false;
                    out.push(c);
                }
                '\\' => {
                    escaped = true;
                    out.push(c);
                }
                '"' => {
                    in_string = false;
                    out.push(c);
                }
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {}
                _ => out.push(c),
            }
        } else {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
        }
    }

    out
}

fn is_recipe_type(value: &Value) -> bool {
    let matches = |s: &str| s == "Recipe" || s.ends_with("/Recipe") || s.ends_with(":Recipe");
    match value {
        Value::String(s) => matches(s),
        Value::Array(types) => types.iter().filter_map(Value::as_str).any(matches),
        _ => false,
    }
}

/// Depth-first search for the first Recipe node, through `@graph` and arrays.
/// Object keys are visited in document order (`preserve_order`).
fn find_recipe(json: &Value) -> Option<&Value> {
    match json {
        Value::Object(obj) => {
            if obj.get("@type").is_some_and(is_recipe_type) {
                return Some(json);
            }
            obj.values().find_map(find_recipe)
        }
        Value::Array(items) => items.iter().find_map(find_recipe),
        _ => None,
    }
}

fn recipe_from_json(recipe: &Value) -> RawRecipe {
    let title = recipe
        .get("name")
        .and_then(Value::as_str)
        .map(clean_text)
        .filter(|t| !t.is_empty());

    let ingredients = recipe
        .get("recipeIngredient")
        .or_else(|| recipe.get("ingredients"))
        .map(|value| match value {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(clean_text)
                .filter(|s| !s.is_empty())
                .collect(),
            Value::String(s) => s
                .lines()
                .map(clean_text)
                .filter(|s| !s.is_empty())
                .collect(),
            _ => Vec::new(),
        });

    let method = match recipe.get("recipeInstructions") {
        Some(Value::String(s)) => MethodText::Block(
            s.lines().map(clean_text).collect::<Vec<_>>().join("\n"),
        ),
        Some(value) => {
            let mut steps = Vec::new();
            collect_steps(value, &mut steps);
            MethodText::Lines(steps)
        }
        None => MethodText::default(),
    };

    RawRecipe {
        title,
        ingredients,
        method,
        source_url: None,
    }
}

/// Flatten plain strings, `HowToStep` and nested `HowToSection` lists.
fn collect_steps(value: &Value, steps: &mut Vec<String>) {
    match value {
        Value::String(s) => push_step(steps, s),
        Value::Array(items) => {
            for item in items {
                collect_steps(item, steps);
            }
        }
        Value::Object(obj) => {
            if let Some(list) = obj.get("itemListElement") {
                collect_steps(list, steps);
            } else if let Some(text) = obj.get("text").and_then(Value::as_str) {
                push_step(steps, text);
            } else if let Some(name) = obj.get("name").and_then(Value::as_str) {
                push_step(steps, name);
            }
        }
        _ => {}
    }
}

fn push_step(steps: &mut Vec<String>, text: &str) {
    let step = clean_text(text);
    if !step.is_empty() {
        steps.push(step);
    }
}

/// Decode entities and drop inline tags that JSON-LD strings often carry.
fn clean_text(text: &str) -> String {
    if !text.contains(['<', '&']) {
        return text.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    let fragment = Html::parse_fragment(text);
    fragment
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn recipe_from_microdata(document: &Html) -> Option<RawRecipe> {
    let container = document.select(&ITEMSCOPE).find(|el| {
        el.value()
            .attr("itemtype")
            .is_some_and(|t| t.contains("schema.org/Recipe"))
    })?;

    let title = container
        .select(&ITEM_NAME)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty());

    let ingredients: Vec<String> = container
        .select(&ITEM_INGREDIENT)
        .map(element_text)
        .filter(|s| !s.is_empty())
        .collect();

    let steps: Vec<String> = container
        .select(&ITEM_INSTRUCTIONS)
        .flat_map(instruction_lines)
        .collect();

    Some(RawRecipe {
        title,
        ingredients: Some(ingredients),
        method: MethodText::Lines(steps),
        source_url: None,
    })
}

fn instruction_lines(element: ElementRef<'_>) -> Vec<String> {
    let items: Vec<String> = element
        .select(&LIST_ITEM)
        .map(element_text)
        .filter(|s| !s.is_empty())
        .collect();

    if !items.is_empty() {
        return items;
    }

    let text = element_text(element);
    if text.is_empty() {
        Vec::new()
    } else {
        vec![text]
    }
}
