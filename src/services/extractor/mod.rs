pub mod heuristic;
pub mod structured;
pub mod text;

use scraper::{ElementRef, Html};

use crate::recipe::RawRecipe;

pub use heuristic::HeuristicStrategy;
pub use structured::StructuredDataStrategy;
pub use text::{parse_text, PageTextStrategy};

/// Failure inside a single strategy. Always recovered by the [`Extractor`].
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error("malformed structured data: {0}")]
    MalformedStructuredData(String),
}

#[derive(Debug, thiserror::Error)]
#[error("Could not parse a recipe from this page")]
pub struct ExtractionFailure;

/// One way of pulling a recipe out of a parsed page.
pub trait Strategy: Send + Sync {
    /// `Ok(None)` means the page has nothing this strategy understands.
    fn extract(&self, document: &Html) -> Result<Option<RawRecipe>, StrategyError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug)]
pub struct Extraction {
    pub strategy: &'static str,
    pub recipe: RawRecipe,
}

/// Runs strategies in priority order; the first non-empty result wins whole.
pub struct Extractor {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::with_strategies(vec![
            Box::new(StructuredDataStrategy),
            Box::new(HeuristicStrategy),
            Box::new(PageTextStrategy),
        ])
    }
}

impl Extractor {
    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    pub fn extract(&self, html: &str) -> Result<Extraction, ExtractionFailure> {
        let document = Html::parse_document(html);

        for strategy in &self.strategies {
            let name = strategy.name();
            match strategy.extract(&document) {
                Ok(Some(recipe)) if recipe.has_content() => {
                    tracing::info!(strategy = name, outcome = "success", "recipe extracted");
                    return Ok(Extraction {
                        strategy: name,
                        recipe,
                    });
                }
                Ok(_) => {
                    tracing::debug!(strategy = name, outcome = "skip");
                }
                Err(e) => {
                    tracing::debug!(strategy = name, outcome = "error", err = %e);
                }
            }
        }

        tracing::warn!("no extraction strategy matched");
        Err(ExtractionFailure)
    }
}

/// Element text with runs of whitespace collapsed to single spaces.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::MethodText;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    struct Fixed {
        name: &'static str,
        result: Option<RawRecipe>,
        calls: Arc<AtomicUsize>,
    }

    impl Strategy for Fixed {
        fn extract(&self, _document: &Html) -> Result<Option<RawRecipe>, StrategyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.result.clone())
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    struct Broken;

    impl Strategy for Broken {
        fn extract(&self, _document: &Html) -> Result<Option<RawRecipe>, StrategyError> {
            Err(StrategyError::MalformedStructuredData("eof".into()))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    fn titled(title: &str) -> Option<RawRecipe> {
        Some(RawRecipe {
            title: Some(title.into()),
            ..Default::default()
        })
    }

    #[test]
    fn test_first_non_empty_strategy_wins_without_merge() {
        let later_calls = Arc::new(AtomicUsize::new(0));
        let extractor = Extractor::with_strategies(vec![
            Box::new(Fixed {
                name: "empty",
                result: Some(RawRecipe {
                    method: MethodText::Block("orphan step".into()),
                    ..Default::default()
                }),
                calls: Arc::new(AtomicUsize::new(0)),
            }),
            Box::new(Fixed {
                name: "winner",
                result: titled("Pancakes"),
                calls: Arc::new(AtomicUsize::new(0)),
            }),
            Box::new(Fixed {
                name: "later",
                result: titled("Waffles"),
                calls: later_calls.clone(),
            }),
        ]);

        let extraction = extractor.extract("<html></html>").unwrap();

        assert_eq!(extraction.strategy, "winner");
        assert_eq!(extraction.recipe.title.as_deref(), Some("Pancakes"));
        assert_eq!(extraction.recipe.method, MethodText::default());
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_strategy_errors_fall_through() {
        let extractor = Extractor::with_strategies(vec![
            Box::new(Broken),
            Box::new(Fixed {
                name: "fallback",
                result: titled("Bread"),
                calls: Arc::new(AtomicUsize::new(0)),
            }),
        ]);

        let extraction = extractor.extract("").unwrap();
        assert_eq!(extraction.strategy, "fallback");
    }

    #[test]
    fn test_all_empty_is_extraction_failure() {
        let extractor = Extractor::with_strategies(vec![
            Box::new(Broken),
            Box::new(Fixed {
                name: "nothing",
                result: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }),
        ]);

        let err = extractor.extract("<p>hello</p>").unwrap_err();
        assert_eq!(err.to_string(), "Could not parse a recipe from this page");
    }

    #[test]
    fn test_default_pipeline_fails_on_plain_page() {
        let html = "<html><body><p>Welcome to my blog about travel.</p></body></html>";
        assert!(Extractor::default().extract(html).is_err());
    }

    #[test]
    fn test_default_pipeline_ignores_payment_method_footer() {
        let html = "<html><body><h1>Our week in Lisbon</h1><p>We walked everywhere.</p>\
                    <footer>Accepted payment method: cash only</footer></body></html>";
        assert!(Extractor::default().extract(html).is_err());
    }
}
