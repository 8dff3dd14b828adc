use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::{
    models::{LoginRequest, SessionResponse},
    AppState, Result,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    state.session.login(&req.password).await?;
    Ok(Json(SessionResponse { authenticated: true }))
}

async fn logout(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    state.session.clear().await;
    Json(SessionResponse { authenticated: false })
}

async fn me(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: state.session.is_authenticated().await,
    })
}
