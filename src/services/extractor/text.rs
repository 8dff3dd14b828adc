//! Marker-based parsing of typed or pasted recipe text.
//!
//! The first line is the title, lines between `Ingredients:` and `Method:`
//! are ingredients, everything after `Method:` is the method block.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use super::{Strategy, StrategyError};
use crate::recipe::{MethodText, RawRecipe};
use crate::services::normalizer::split_lines;

static INGREDIENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)ingredients:(.*?)method:").expect("valid ingredients regex"));
static METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)method:(.*)").expect("valid method regex"));

// Fetched pages only count markers that open a line.
static LINE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(ingredients|method)\s*:").expect("valid marker regex")
});
static LINE_INGREDIENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ims)^\s*ingredients\s*:(.*?)^\s*method\s*:").expect("valid ingredients regex")
});
static LINE_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ims)^\s*method\s*:(.*)").expect("valid method regex")
});

static CONTENT_ROOTS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["article", "main", "[role='main']", "body"]
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .collect()
});

pub fn parse_text(text: &str) -> RawRecipe {
    parse_sections(text, &INGREDIENTS, &METHOD)
}

fn parse_sections(text: &str, ingredients: &Regex, method: &Regex) -> RawRecipe {
    let title = text
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string);

    let ingredients = ingredients
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| split_lines(m.as_str()));

    let method = method
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    RawRecipe {
        title,
        ingredients,
        method: MethodText::Block(method),
        source_url: None,
    }
}

pub fn has_section_markers(text: &str) -> bool {
    LINE_MARKER.is_match(text)
}

/// Last resort for fetched pages: treat the visible page text as a pasted recipe.
pub struct PageTextStrategy;

impl Strategy for PageTextStrategy {
    fn extract(&self, document: &Html) -> Result<Option<RawRecipe>, StrategyError> {
        let text = render_page_text(document);
        if !has_section_markers(&text) {
            return Ok(None);
        }

        let recipe = parse_sections(&text, &LINE_INGREDIENTS, &LINE_METHOD);
        let has_ingredients = recipe
            .ingredients
            .as_ref()
            .is_some_and(|items| !items.is_empty());
        if !has_ingredients && recipe.method.is_empty() {
            return Ok(None);
        }

        Ok(Some(recipe))
    }

    fn name(&self) -> &'static str {
        "plain-text"
    }
}

/// Visible text of the main content, one block element per line.
pub fn render_page_text(document: &Html) -> String {
    let root = CONTENT_ROOTS
        .iter()
        .find_map(|selector| document.select(selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut out = String::new();
    render_node(root, &mut out);

    out.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_node(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) => {
                let tag = el.name();
                if matches!(tag, "script" | "style" | "noscript" | "template" | "head") {
                    continue;
                }
                if tag == "br" {
                    out.push('\n');
                    continue;
                }

                let block = matches!(
                    tag,
                    "p" | "div"
                        | "li"
                        | "ul"
                        | "ol"
                        | "tr"
                        | "h1"
                        | "h2"
                        | "h3"
                        | "h4"
                        | "h5"
                        | "h6"
                        | "section"
                        | "article"
                        | "header"
                        | "footer"
                        | "pre"
                        | "blockquote"
                );

                if block {
                    out.push('\n');
                }
                if let Some(child) = ElementRef::wrap(child) {
                    render_node(child, out);
                }
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}
