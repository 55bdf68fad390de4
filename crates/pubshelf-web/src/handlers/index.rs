use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

use pubshelf_reporting::export_page;

use crate::state::AppState;

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let publications = state.publications().await;
    Html(export_page(
        &state.site_title,
        &publications,
        Some(state.posts.as_slice()),
    ))
}
