// ABOUTME: Upstream payload model and document-kind classification
// ABOUTME: One predicate decides whether an entry carries frontmatter

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::error::DocumentError;
use crate::frontmatter::split_document;

/// Kind reported by the content API for directory listings.
pub const DIRECTORY_KIND: &str = "dir";

/// Kind reported by the content API for markdown documents.
pub const MARKDOWN_KIND: &str = ".md";

/// Classification of an upstream `kind` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A directory listing, always passed through.
    Directory,
    /// A text document whose `data` starts with a frontmatter block.
    Document,
    /// Any other file type, passed through.
    Other,
}

/// The closed set of kinds that are split into frontmatter and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentKinds {
    kinds: BTreeSet<String>,
}

impl Default for DocumentKinds {
    fn default() -> Self {
        Self::new([MARKDOWN_KIND])
    }
}

impl DocumentKinds {
    pub fn new<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kinds: kinds.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, kind: &str) -> DocumentKind {
        if kind == DIRECTORY_KIND {
            DocumentKind::Directory
        } else if self.kinds.contains(kind) {
            DocumentKind::Document
        } else {
            DocumentKind::Other
        }
    }

    pub fn is_document(&self, kind: &str) -> bool {
        self.classify(kind) == DocumentKind::Document
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// An entry returned by the content API.
///
/// The body is kept verbatim. Only payloads whose string `kind` is a
/// document kind are ever touched, and rendering only adds `frontmatter`
/// and `content` to those. Anything else, including bodies with no `kind`
/// such as site and section listings, passes through as received.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamFile {
    kind: Option<String>,
    body: Value,
}

impl From<Value> for UpstreamFile {
    fn from(body: Value) -> Self {
        let kind = body.get("kind").and_then(Value::as_str).map(str::to_string);
        Self { kind, body }
    }
}

impl UpstreamFile {
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Entries without a string `kind` are never documents.
    pub fn classify(&self, kinds: &DocumentKinds) -> DocumentKind {
        self.kind
            .as_deref()
            .map_or(DocumentKind::Other, |kind| kinds.classify(kind))
    }

    /// The raw `data` field, if present and a string.
    pub fn text(&self) -> Option<&str> {
        self.body.get("data").and_then(Value::as_str)
    }

    pub fn into_value(self) -> Value {
        self.body
    }

    /// Produce the response body for this entry.
    ///
    /// Documents get `frontmatter` and `content` merged in; every other entry
    /// is returned unchanged.
    pub fn render(self, kinds: &DocumentKinds) -> Result<Value, DocumentError> {
        if self.classify(kinds) != DocumentKind::Document {
            return Ok(self.body);
        }

        let kind = self.kind.unwrap_or_default();
        let mut fields = match self.body {
            Value::Object(fields) => fields,
            other => return Ok(other),
        };

        let Some(data) = fields.get("data").and_then(Value::as_str) else {
            return Err(DocumentError::MissingData { kind });
        };
        let document = split_document(data)?;

        fields.insert("frontmatter".to_string(), Value::Object(document.frontmatter));
        fields.insert("content".to_string(), Value::String(document.content));
        Ok(Value::Object(fields))
    }
}
