// ABOUTME: Frontmatter splitter for `---` delimited documents
// ABOUTME: Separates the YAML metadata block from the body text

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DocumentError;

/// Marker separating the frontmatter block from the body.
pub const DELIMITER: &str = "---";

/// A document split into its metadata and its body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub frontmatter: Map<String, Value>,
    pub content: String,
}

/// Split `data` into frontmatter and content.
///
/// The text is cut on [`DELIMITER`] into at most three segments, so any
/// `---` inside the body stays part of the body. Segment 1 is parsed as a
/// YAML mapping; segment 2 loses its first character (the newline after
/// the closing delimiter) and becomes the content.
pub fn split_document(data: &str) -> Result<Document, DocumentError> {
    let mut segments = data.splitn(3, DELIMITER);
    segments.next();

    let (Some(metadata), Some(body)) = (segments.next(), segments.next()) else {
        return Err(DocumentError::MissingDelimiter);
    };

    Ok(Document {
        frontmatter: parse_frontmatter(metadata)?,
        content: strip_first_char(body).to_string(),
    })
}

/// Parse a frontmatter block into an ordered JSON mapping.
///
/// A blank block is an empty mapping. Anything other than a mapping at the
/// top level is rejected.
pub fn parse_frontmatter(block: &str) -> Result<Map<String, Value>, DocumentError> {
    if block.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_yaml::from_str::<serde_yaml::Value>(block)? {
        // an explicit `~` or `null`
        serde_yaml::Value::Null => Ok(Map::new()),
        serde_yaml::Value::Mapping(mapping) => {
            match serde_json::to_value(mapping).map_err(DocumentError::FrontmatterKey)? {
                Value::Object(map) => Ok(map),
                _ => Err(DocumentError::FrontmatterNotMapping("a non-object value")),
            }
        }
        other => Err(DocumentError::FrontmatterNotMapping(yaml_type_name(&other))),
    }
}

fn strip_first_char(body: &str) -> &str {
    let mut chars = body.chars();
    chars.next();
    chars.as_str()
}

fn yaml_type_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
