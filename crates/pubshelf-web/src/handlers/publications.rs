use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use std::sync::Arc;

use pubshelf_core::PublicationState;
use pubshelf_reporting::export_html;

use crate::state::AppState;

/// HTML fragment for the publications container. Failures render inline.
pub async fn fragment(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(export_html(&state.publications().await))
}

pub async fn json(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let publications = state.publications().await;
    let status = match publications {
        PublicationState::Failed { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    (status, Json(publications))
}
