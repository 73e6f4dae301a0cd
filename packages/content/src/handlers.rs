use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use folio_core::{DIRECTORY_KIND, MARKDOWN_KIND};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

use crate::error::{ContentError, ContentResult};
use crate::listing::{kind_of, list_directory, ListEntry};
use crate::site::{self, check_relative, SiteConfig};

/// Shared state for content endpoints
#[derive(Clone)]
pub struct ContentState {
    pub sites_root: Arc<PathBuf>,
}

impl ContentState {
    pub fn new(sites_root: impl Into<PathBuf>) -> Self {
        Self {
            sites_root: Arc::new(sites_root.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SectionListing {
    pub label: String,
    pub files: Vec<ListEntry>,
}

#[derive(Debug, Serialize)]
struct Entry<T> {
    kind: String,
    data: T,
}

pub async fn list_sites(State(state): State<ContentState>) -> ContentResult<Json<Vec<ListEntry>>> {
    Ok(Json(site::list_sites(&state.sites_root).await?))
}

pub async fn get_site(
    Path(site): Path<String>,
    State(state): State<ContentState>,
) -> ContentResult<Json<SiteConfig>> {
    Ok(Json(site::load_site(&state.sites_root, &site).await?))
}

pub async fn get_section(
    Path((site, section)): Path<(String, String)>,
    State(state): State<ContentState>,
) -> ContentResult<Json<SectionListing>> {
    let config = site::load_site(&state.sites_root, &site).await?;
    let section = config.section(&section)?.clone();
    let site_dir = state.sites_root.join(check_relative(&site)?);

    let label = section.label.clone();
    let files = tokio::task::spawn_blocking(move || section.list_entries(&site_dir)).await??;

    Ok(Json(SectionListing { label, files }))
}

/// Serve one entry of a section: a listing for directories, text for
/// markdown documents, raw bytes for everything else.
pub async fn get_file(
    Path((site, section, path)): Path<(String, String, String)>,
    State(state): State<ContentState>,
) -> ContentResult<Response> {
    let config = site::load_site(&state.sites_root, &site).await?;
    let section = config.section(&section)?;
    let site_dir = state.sites_root.join(check_relative(&site)?);
    let target = section.dir(&site_dir)?.join(check_relative(&path)?);

    let metadata = match fs::metadata(&target).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ContentError::PathNotFound(path));
        }
        Err(e) => return Err(e.into()),
    };

    if metadata.is_dir() {
        debug!(path = %target.display(), "Listing directory");
        let files = tokio::task::spawn_blocking(move || list_directory(&target)).await??;
        return Ok(Json(Entry {
            kind: DIRECTORY_KIND.to_string(),
            data: files,
        })
        .into_response());
    }

    let kind = kind_of(&target).unwrap_or_default();
    if kind == MARKDOWN_KIND {
        let data = fs::read_to_string(&target).await?;
        return Ok(Json(Entry { kind, data }).into_response());
    }

    let bytes = Bytes::from(fs::read(&target).await?);
    Ok(([(header::CONTENT_TYPE, content_type(&kind).to_string())], bytes).into_response())
}

/// MIME type served for a raw file of the given `.ext` kind.
pub fn content_type(kind: &str) -> mime::Mime {
    mime_guess::from_ext(kind.trim_start_matches('.')).first_or_octet_stream()
}
