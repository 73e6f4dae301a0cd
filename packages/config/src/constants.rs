// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Folio

// Gateway
pub const FOLIO_GATEWAY_PORT: &str = "FOLIO_GATEWAY_PORT";
pub const FOLIO_CORS_ORIGIN: &str = "FOLIO_CORS_ORIGIN";

// Upstream content API
pub const FOLIO_UPSTREAM_URL: &str = "FOLIO_UPSTREAM_URL";
pub const FOLIO_UPSTREAM_TIMEOUT_SECS: &str = "FOLIO_UPSTREAM_TIMEOUT_SECS";
pub const FOLIO_UPSTREAM_CONNECT_TIMEOUT_SECS: &str = "FOLIO_UPSTREAM_CONNECT_TIMEOUT_SECS";

// Kinds whose `data` carries a frontmatter block, comma separated
pub const FOLIO_DOCUMENT_KINDS: &str = "FOLIO_DOCUMENT_KINDS";

// Content server
pub const FOLIO_CONTENT_PORT: &str = "FOLIO_CONTENT_PORT";
pub const FOLIO_SITES_ROOT: &str = "FOLIO_SITES_ROOT";
