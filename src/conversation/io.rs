use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::document::Document;

/// Reasons a document could not be loaded or saved.
///
/// Everything except [`DocumentError::Io`] and [`DocumentError::Serialize`]
/// means the input itself is malformed.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("document must be a JSON object")]
    NotAnObject,

    #[error("document has no `parts` array")]
    MissingParts,

    #[error("document fields have the wrong shape: {0}")]
    InvalidShape(#[source] serde_json::Error),

    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to access '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::InvalidJson(_) | Self::NotAnObject | Self::MissingParts | Self::InvalidShape(_)
        )
    }
}

/// Parses a conversation export. The only structural requirement is an
/// object with a `parts` array.
pub fn parse_document(raw: &str) -> Result<Document, DocumentError> {
    let parsed: Value = serde_json::from_str(raw).map_err(DocumentError::InvalidJson)?;
    let object = parsed.as_object().ok_or(DocumentError::NotAnObject)?;

    if !object.get("parts").is_some_and(Value::is_array) {
        return Err(DocumentError::MissingParts);
    }

    let document: Document = serde_json::from_value(parsed).map_err(DocumentError::InvalidShape)?;
    debug!(
        id = %document.id,
        parts = document.parts.len(),
        workflows = document.workflows().len(),
        "parsed conversation document"
    );
    Ok(document)
}

pub fn read_document(path: &Path) -> Result<Document, DocumentError> {
    let raw = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&raw)
}

/// Pretty JSON of the document itself, never of the derived graph.
pub fn export_document(document: &Document) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(document).map_err(DocumentError::Serialize)
}

pub fn write_document(path: &Path, document: &Document) -> Result<(), DocumentError> {
    let rendered = export_document(document)?;
    fs::write(path, rendered).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn export_file_name(document: &Document) -> String {
    let id = document.id.as_str().trim();
    if id.is_empty() {
        "conversation-export.json".to_owned()
    } else {
        format!("conversation-{id}.json")
    }
}
