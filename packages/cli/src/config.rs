use folio_config::constants::{
    FOLIO_CORS_ORIGIN, FOLIO_DOCUMENT_KINDS, FOLIO_GATEWAY_PORT, FOLIO_UPSTREAM_CONNECT_TIMEOUT_SECS,
    FOLIO_UPSTREAM_TIMEOUT_SECS, FOLIO_UPSTREAM_URL,
};
use folio_core::DocumentKinds;
use std::env;
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_GATEWAY_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:4120";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid timeout for {name}: {source}")]
    InvalidTimeout {
        name: &'static str,
        source: ParseIntError,
    },
    #[error("Timeout {0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("Invalid upstream URL: {0}")]
    InvalidUpstreamUrl(String),
    #[error("At least one document kind must be configured")]
    NoDocumentKinds,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL of the content API, without a trailing slash.
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    pub upstream_connect_timeout: Duration,
    pub document_kinds: DocumentKinds,
    pub cors_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_GATEWAY_PORT,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            upstream_connect_timeout: Duration::from_secs(DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS),
            document_kinds: DocumentKinds::default(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var(FOLIO_GATEWAY_PORT) {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_GATEWAY_PORT,
        };

        let upstream_url = normalize_upstream_url(
            &env::var(FOLIO_UPSTREAM_URL).unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
        )?;

        let upstream_timeout =
            timeout_from_env(FOLIO_UPSTREAM_TIMEOUT_SECS, DEFAULT_UPSTREAM_TIMEOUT_SECS)?;
        let upstream_connect_timeout = timeout_from_env(
            FOLIO_UPSTREAM_CONNECT_TIMEOUT_SECS,
            DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS,
        )?;

        let document_kinds = match env::var(FOLIO_DOCUMENT_KINDS) {
            Ok(raw) => parse_document_kinds(&raw)?,
            Err(_) => DocumentKinds::default(),
        };

        let cors_origin =
            env::var(FOLIO_CORS_ORIGIN).unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());

        Ok(Config {
            port,
            upstream_url,
            upstream_timeout,
            upstream_connect_timeout,
            document_kinds,
            cors_origin,
        })
    }
}

pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let port = raw.trim().parse::<u16>().map_err(ConfigError::InvalidPort)?;

    // Validate port is in valid range
    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }

    Ok(port)
}

/// Accept only absolute http(s) URLs and drop any trailing slash.
pub fn normalize_upstream_url(raw: &str) -> Result<String, ConfigError> {
    let url = url::Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidUpstreamUrl(format!("{}: {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidUpstreamUrl(raw.to_string()));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

pub fn parse_document_kinds(raw: &str) -> Result<DocumentKinds, ConfigError> {
    let kinds = DocumentKinds::new(
        raw.split(',')
            .map(str::trim)
            .filter(|kind| !kind.is_empty()),
    );

    if kinds.is_empty() {
        return Err(ConfigError::NoDocumentKinds);
    }

    Ok(kinds)
}

fn timeout_from_env(name: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    let secs = match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidTimeout { name, source })?,
        Err(_) => default_secs,
    };

    if secs == 0 {
        return Err(ConfigError::ZeroTimeout(name));
    }

    Ok(Duration::from_secs(secs))
}
