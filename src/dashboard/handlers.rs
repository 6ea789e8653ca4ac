use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Json};
use serde::Deserialize;

use crate::preview::{build_preview, find_file, list_preview_files, Preview, PreviewFile};

use super::error::PreviewError;
use super::state::AppState;
use super::templates::{EmptyTemplate, IndexTemplate, PAGE_TITLE};

/// `?file=<key>` selection; absent means the first listed file.
#[derive(Debug, Default, Deserialize)]
pub struct FileQuery {
    pub file: Option<String>,
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "kyva-preview",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// The preview page.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Html<String>, PreviewError> {
    let page = tokio::task::spawn_blocking(move || render_index(&state, query.file.as_deref())).await??;
    Ok(Html(page))
}

/// JSON list of previewable files, curated first.
pub async fn files(State(state): State<AppState>) -> Result<Json<Vec<PreviewFile>>, PreviewError> {
    let files = tokio::task::spawn_blocking(move || list_preview_files(&state.layout)).await??;
    Ok(Json(files))
}

/// JSON preview of the selected file.
pub async fn preview(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Json<Preview>, PreviewError> {
    let preview = tokio::task::spawn_blocking(move || {
        let files = list_preview_files(&state.layout)?;
        let file = select(&files, query.file.as_deref())?;
        Ok::<_, PreviewError>(build_preview(file, &state.options)?)
    })
    .await??;
    Ok(Json(preview))
}

fn render_index(state: &AppState, selected: Option<&str>) -> Result<String, PreviewError> {
    let files = list_preview_files(&state.layout)?;
    if files.is_empty() {
        let page = EmptyTemplate {
            title: PAGE_TITLE,
            data_dir: state.layout.data_dir.display().to_string(),
        };
        return Ok(page.render()?);
    }

    let file = select(&files, selected)?;
    tracing::debug!(key = %file.key, "rendering preview");
    let preview = build_preview(file, &state.options)?;
    Ok(IndexTemplate::new(&files, preview).render()?)
}

fn select<'a>(files: &'a [PreviewFile], key: Option<&str>) -> Result<&'a PreviewFile, PreviewError> {
    match key {
        Some(key) => find_file(files, key).ok_or_else(|| PreviewError::UnknownFile(key.to_string())),
        None => files.first().ok_or(PreviewError::NoData),
    }
}
