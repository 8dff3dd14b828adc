pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod recipe;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{ApiError, Result};
pub use recipe::{MethodText, RawRecipe, RecipeRecord};

use axum::{
    http::{header, Method},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use services::{extractor::Extractor, fetcher::Fetcher, session::Session};

pub struct AppState {
    pub config: Config,
    pub fetcher: Fetcher,
    pub extractor: Extractor,
    pub session: Session,
}

impl AppState {
    pub fn new(config: Config) -> reqwest::Result<Self> {
        let fetcher = Fetcher::from_config(&config)?;
        let session = Session::init(config.access_password.clone());

        Ok(Self {
            config,
            fetcher,
            extractor: Extractor::default(),
            session,
        })
    }
}

fn build_cors(origins: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = build_cors(&state.config.cors_origins);

    Router::new()
        .merge(routes::recipes::routes())
        .merge(routes::auth::routes())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            state.config.request_timeout,
        )))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
