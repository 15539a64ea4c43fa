use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ColorParseError;
use crate::document::DocumentError;
use crate::fonts::FontError;

#[derive(Debug, Error)]
pub enum DsgError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Color error: {0}")]
    Color(#[from] ColorParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl DsgError {
    pub fn config(message: impl Into<String>) -> Self {
        DsgError::Config(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            DsgError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            DsgError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Document,
                e.to_string(),
                "Check that the document is valid JSON with a `pages` array of PAGE nodes.",
            ),
            DsgError::Document(e) => {
                let remediation = match e {
                    DocumentError::DuplicateId(_) => "Give every node a unique `id`.",
                    DocumentError::MissingComponent { .. } => {
                        "Include the main component of every INSTANCE in the document."
                    }
                    DocumentError::NoPages => "Add at least one PAGE node under `pages`.",
                    _ => "Inspect the document tree; run with --verbose for details.",
                };
                ErrorPayload::new(ErrorCategory::Document, e.to_string(), remediation)
            }
            DsgError::Font(e) => ErrorPayload::new(
                ErrorCategory::Font,
                e.to_string(),
                "Add the font to [fonts].available or [fonts].directory in the config, or raise fonts.load_timeout.",
            ),
            DsgError::Color(e) => ErrorPayload::new(
                ErrorCategory::Document,
                e.to_string(),
                "Colors must be #RRGGBB hex strings.",
            ),
            DsgError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("label_family") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set report.label_family to a font family available to the host (e.g., \"Inter\").",
                    )
                } else if lower.contains("timeout") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a humantime duration for fonts.load_timeout (e.g., \"5s\" or \"250ms\").",
                    )
                } else if lower.contains("file not found") || lower.contains("no such file") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Verify the file exists; use an absolute path or run from the working directory.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and the config file (TOML).",
                    )
                }
            }
            DsgError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, DsgError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Io,
    Document,
    Font,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
