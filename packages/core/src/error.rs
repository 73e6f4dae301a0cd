use thiserror::Error;

/// Errors raised while splitting an upstream document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("entry of kind `{kind}` has no string `data` field")]
    MissingData { kind: String },

    #[error("document has no closing `---` frontmatter delimiter")]
    MissingDelimiter,

    #[error("invalid frontmatter: {0}")]
    InvalidFrontmatter(#[from] serde_yaml::Error),

    #[error("frontmatter must be a mapping, found {0}")]
    FrontmatterNotMapping(&'static str),

    #[error("frontmatter key cannot be represented in JSON: {0}")]
    FrontmatterKey(#[source] serde_json::Error),
}

impl DocumentError {
    /// True when the upstream broke its payload contract, as opposed to
    /// serving a well-formed entry whose document text is malformed.
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, DocumentError::MissingData { .. })
    }
}
