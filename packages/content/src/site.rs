// ABOUTME: Site and section configuration for the content API
// ABOUTME: Reads `config.toml` titles and `.cms/config.yaml` section definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::error::{ContentError, ContentResult};
use crate::listing::{label_entries, EntryInfo, ListEntry};

/// Site metadata file, relative to the site directory.
pub const SITE_METADATA_FILE: &str = "config.toml";

/// CMS configuration file, relative to the site directory.
pub const SITE_CONFIG_FILE: &str = ".cms/config.yaml";

/// Title block of a site's `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteMetadata {
    #[serde(default)]
    pub title: String,
}

/// The `.cms/config.yaml` of a site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub sections: BTreeMap<String, Section>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named subtree of a site whose entries match a glob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub label: String,
    pub path: String,
    #[serde(default, rename = "match")]
    pub pattern: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub templates: Vec<String>,
}

/// Reject names and paths that could leave the sites root.
pub fn check_relative(path: &str) -> ContentResult<&Path> {
    let candidate = Path::new(path);
    let escapes = candidate
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if path.is_empty() || escapes {
        return Err(ContentError::InvalidPath(path.to_string()));
    }

    Ok(candidate)
}

/// Directory of `site` under `root`, checked to exist.
pub async fn site_dir(root: &Path, site: &str) -> ContentResult<PathBuf> {
    let dir = root.join(check_relative(site)?);
    match fs::metadata(&dir).await {
        Ok(_) => Ok(dir),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ContentError::SiteNotFound(site.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Load a site's CMS configuration.
pub async fn load_site(root: &Path, site: &str) -> ContentResult<SiteConfig> {
    let dir = site_dir(root, site).await?;
    let raw = match fs::read_to_string(dir.join(SITE_CONFIG_FILE)).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ContentError::SiteNotFound(site.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_yaml::from_str(&raw)?)
}

/// List every site under `root`, named by its `config.toml` title.
pub async fn list_sites(root: &Path) -> ContentResult<Vec<ListEntry>> {
    let mut sites = Vec::new();
    let mut entries = fs::read_dir(root).await?;

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }

        let path = entry.file_name().to_string_lossy().into_owned();
        let name = match fs::read_to_string(entry.path().join(SITE_METADATA_FILE)).await {
            Ok(raw) => toml::from_str::<SiteMetadata>(&raw)?.title,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        sites.push(ListEntry {
            name: if name.is_empty() { path.clone() } else { name },
            path,
        });
    }

    sites.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(sites)
}

impl SiteConfig {
    pub fn section(&self, name: &str) -> ContentResult<&Section> {
        self.sections.get(name).ok_or(ContentError::SectionNotFound)
    }
}

impl Section {
    /// Directory holding this section's entries.
    pub fn dir(&self, site_dir: &Path) -> ContentResult<PathBuf> {
        Ok(site_dir.join(check_relative(&self.path)?))
    }

    /// Expand the section glob and list the distinct top-level entries it hits.
    ///
    /// Blocking: walks the filesystem.
    pub fn list_entries(&self, site_dir: &Path) -> ContentResult<Vec<ListEntry>> {
        let prefix = self.dir(site_dir)?;
        let pattern = format!(
            "{}/{}{}",
            glob::Pattern::escape(&prefix.to_string_lossy()),
            self.pattern,
            self.extension
        );

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for matched in glob::glob(&pattern)? {
            let matched = matched?;
            let Ok(relative) = matched.strip_prefix(&prefix) else {
                continue;
            };
            let Some(Component::Normal(top)) = relative.components().next() else {
                continue;
            };

            let top = top.to_os_string();
            if seen.insert(top.clone()) {
                entries.push(EntryInfo::from_path(&prefix.join(&top))?);
            }
        }

        Ok(label_entries(&prefix, entries))
    }
}
