//! HTML pages rendered from the loaded dictionaries.

use axum::{
    extract::{Path, State},
    response::Html,
};

use datadict::export::{render_dashboard, render_html};

use crate::server::error::ApiError;
use crate::server::state::AppState;

const DICTIONARY_PAGE_SUFFIX: &str = "_data_dictionary.html";

/// Dashboard listing every dataset.
pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let dictionaries = state.dictionaries.read().await;
    Html(render_dashboard(dictionaries.values()))
}

pub async fn dataset_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, ApiError> {
    let dictionaries = state.dictionaries.read().await;
    dictionaries
        .get(&name)
        .map(|dict| Html(render_html(dict)))
        .ok_or_else(|| ApiError::NotFound(format!("No dictionary for dataset: {}", name)))
}

/// Serves the dashboard's `{name}_data_dictionary.html` links.
pub async fn dictionary_file(
    state: State<AppState>,
    Path(file): Path<String>,
) -> Result<Html<String>, ApiError> {
    match file.strip_suffix(DICTIONARY_PAGE_SUFFIX) {
        Some(name) => dataset_page(state, Path(name.to_string())).await,
        None => Err(ApiError::NotFound(file)),
    }
}
