// ABOUTME: Core types and document handling for Folio
// ABOUTME: Upstream payload model, the document-kind predicate and the frontmatter splitter

pub mod error;
pub mod frontmatter;
pub mod types;

// Re-export main types
pub use types::{DocumentKind, DocumentKinds, UpstreamFile, DIRECTORY_KIND, MARKDOWN_KIND};

// Re-export frontmatter handling
pub use frontmatter::{parse_frontmatter, split_document, Document, DELIMITER};

pub use error::DocumentError;
