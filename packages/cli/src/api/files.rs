// ABOUTME: File endpoints proxying the content API
// ABOUTME: Forwards one GET upstream and splits documents into frontmatter and content

use axum::{
    extract::{Path, Query, State},
    Json,
};
use folio_core::UpstreamFile;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::GatewayState;
use crate::error::{ApiResult, AppError};

#[derive(Debug, Deserialize)]
pub struct FileQuery {
    pub path: String,
}

/// `GET /{site}/{section}/file.json?path=`
pub async fn get_section_file(
    Path((site, section)): Path<(String, String)>,
    Query(query): Query<FileQuery>,
    State(state): State<GatewayState>,
) -> ApiResult<Json<Value>> {
    let mut url = format!("{}/{}/{}", state.config.upstream_url, site, section);
    // An empty path addresses the section root itself
    if !query.path.is_empty() {
        url.push('/');
        url.push_str(&query.path);
    }
    fetch_file(&state, &url).await
}

/// `GET /file.json?path=`
pub async fn get_file(
    Query(query): Query<FileQuery>,
    State(state): State<GatewayState>,
) -> ApiResult<Json<Value>> {
    let url = format!("{}/{}", state.config.upstream_url, query.path);
    fetch_file(&state, &url).await
}

/// Fetch one entry from the content API and render the response body.
async fn fetch_file(state: &GatewayState, url: &str) -> ApiResult<Json<Value>> {
    info!(upstream = %url, "Proxying file request");

    let response = state.client.get(url).send().await?;
    let status = response.status();

    // Read the whole body before deciding, so error text is always resolved
    let body = response.bytes().await?;

    if !status.is_success() {
        let text = String::from_utf8_lossy(&body).into_owned();
        return Err(AppError::upstream_status(status, text));
    }

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::malformed_payload(format!("body is not JSON: {}", e)))?;
    let file = UpstreamFile::from(payload);

    debug!(upstream = %url, kind = ?file.kind(), "Upstream entry received");
    Ok(Json(file.render(&state.config.document_kinds)?))
}
