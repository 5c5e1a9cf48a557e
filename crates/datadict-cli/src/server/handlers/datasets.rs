//! JSON API over the loaded dictionaries.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use datadict::DataDictionary;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// One row of the dataset listing.
#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub name: String,
    pub record_count: usize,
    pub field_count: usize,
    pub completeness: f64,
    pub quality_score: f64,
    pub quality_band: String,
    pub pii_columns: usize,
    pub generated_at: DateTime<Utc>,
}

impl From<&DataDictionary> for DatasetSummary {
    fn from(dict: &DataDictionary) -> Self {
        Self {
            name: dict.dataset_name.clone(),
            record_count: dict.overview.record_count,
            field_count: dict.overview.field_count,
            completeness: dict.data_quality.overall_completeness,
            quality_score: dict.data_quality.quality_score.score,
            quality_band: dict.data_quality.quality_score.band.label().to_string(),
            pii_columns: dict.pii_columns().count(),
            generated_at: dict.generated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub datasets: usize,
}

/// List every loaded dataset, ordered by name.
pub async fn list_datasets(State(state): State<AppState>) -> Json<Vec<DatasetSummary>> {
    let dictionaries = state.dictionaries.read().await;
    Json(dictionaries.values().map(DatasetSummary::from).collect())
}

/// Full dictionary for one dataset.
pub async fn get_dataset(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DataDictionary>, ApiError> {
    let dictionaries = state.dictionaries.read().await;
    dictionaries
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No dictionary for dataset: {}", name)))
}

/// Re-read the output directory.
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, ApiError> {
    let datasets = state.reload().await?;
    Ok(Json(ReloadResponse { datasets }))
}
