use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{element_text, Strategy, StrategyError};
use crate::recipe::{MethodText, RawRecipe};

/// Class conventions of a recipe card plugin.
struct PluginMarkup {
    name: &'static str,
    ingredients: &'static str,
    instructions: &'static str,
}

const PLUGINS: &[PluginMarkup] = &[
    PluginMarkup {
        name: "wp-recipe-maker",
        ingredients: ".wprm-recipe-ingredient",
        instructions: ".wprm-recipe-instruction-text",
    },
    PluginMarkup {
        name: "tasty-recipes",
        ingredients: ".tasty-recipes-ingredients li",
        instructions: ".tasty-recipes-instructions li",
    },
    PluginMarkup {
        name: "mediavine-create",
        ingredients: ".mv-create-ingredients li",
        instructions: ".mv-create-instructions li",
    },
];

/// A [`PluginMarkup`] with its selectors parsed.
struct CompiledPlugin {
    name: &'static str,
    ingredients: Selector,
    instructions: Selector,
}

static COMPILED: LazyLock<Vec<CompiledPlugin>> = LazyLock::new(|| {
    PLUGINS
        .iter()
        .map(|plugin| CompiledPlugin {
            name: plugin.name,
            ingredients: Selector::parse(plugin.ingredients).expect("valid ingredients selector"),
            instructions: Selector::parse(plugin.instructions)
                .expect("valid instructions selector"),
        })
        .collect()
});

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("valid title selector"));

pub struct HeuristicStrategy;

impl Strategy for HeuristicStrategy {
    fn extract(&self, document: &Html) -> Result<Option<RawRecipe>, StrategyError> {
        for plugin in COMPILED.iter() {
            let ingredients = select_lines(document, &plugin.ingredients);
            let instructions = select_lines(document, &plugin.instructions);

            if ingredients.is_empty() && instructions.is_empty() {
                continue;
            }

            tracing::debug!(
                plugin = plugin.name,
                ingredients = ingredients.len(),
                steps = instructions.len(),
                "recipe plugin markup found"
            );

            let title = select_lines(document, &TITLE).into_iter().next();

            return Ok(Some(RawRecipe {
                title,
                ingredients: Some(ingredients),
                method: MethodText::Lines(instructions),
                source_url: None,
            }));
        }

        Ok(None)
    }

    fn name(&self) -> &'static str {
        "heuristic-markup"
    }
}

fn select_lines(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(element_text)
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> Option<RawRecipe> {
        HeuristicStrategy
            .extract(&Html::parse_document(html))
            .unwrap()
    }

    #[test]
    fn test_wprm_markup() {
        let html = r#"
            <html><body>
              <h1>  Sticky   Toffee Pudding </h1>
              <h1>Comments</h1>
              <ul>
                <li class="wprm-recipe-ingredient">
                  <span class="wprm-recipe-ingredient-amount">200</span>
                  <span class="wprm-recipe-ingredient-unit">g</span>
                  <span class="wprm-recipe-ingredient-name">dates</span>
                </li>
                <li class="wprm-recipe-ingredient">175g self-raising flour</li>
              </ul>
              <div class="wprm-recipe-instruction-text">Soak the dates.</div>
              <div class="wprm-recipe-instruction-text">Bake for 30 minutes.</div>
            </body></html>
        "#;

        let recipe = run(html).unwrap();

        assert_eq!(recipe.title.as_deref(), Some("Sticky Toffee Pudding"));
        assert_eq!(
            recipe.ingredients,
            Some(vec!["200 g dates".to_string(), "175g self-raising flour".to_string()])
        );
        assert_eq!(
            recipe.method,
            MethodText::Lines(vec!["Soak the dates.".into(), "Bake for 30 minutes.".into()])
        );
    }

    #[test]
    fn test_tasty_recipes_markup() {
        let html = r#"
            <h1>Banana Bread</h1>
            <div class="tasty-recipes-ingredients"><ul><li>3 bananas</li><li>1 egg</li></ul></div>
            <div class="tasty-recipes-instructions"><ol><li>Mash.</li><li>Bake.</li></ol></div>
        "#;

        let recipe = run(html).unwrap();
        assert_eq!(recipe.ingredients.as_ref().map(Vec::len), Some(2));
        assert_eq!(recipe.method, MethodText::Lines(vec!["Mash.".into(), "Bake.".into()]));
    }

    #[test]
    fn test_every_plugin_selector_compiles() {
        let names: Vec<_> = COMPILED.iter().map(|plugin| plugin.name).collect();
        assert_eq!(names.len(), PLUGINS.len());
        assert_eq!(names, ["wp-recipe-maker", "tasty-recipes", "mediavine-create"]);
    }

    #[test]
    fn test_mediavine_markup() {
        let html = r#"
            <h1>Chili</h1>
            <div class="mv-create-ingredients"><ul><li>1 onion</li><li>2 cans beans</li></ul></div>
            <div class="mv-create-instructions"><ol><li>Fry.</li><li>Simmer.</li></ol></div>
        "#;

        let recipe = run(html).unwrap();
        assert_eq!(recipe.title.as_deref(), Some("Chili"));
        assert_eq!(recipe.method, MethodText::Lines(vec!["Fry.".into(), "Simmer.".into()]));
    }

    #[test]
    fn test_heading_alone_is_not_a_recipe() {
        assert!(run("<h1>My Travel Blog</h1><p>Day one in Lisbon.</p>").is_none());
    }
}
