//! Domain DTOs shared by the registry, the form and the upload controller.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the request body is assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[default]
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "form-data")]
    FormData,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "json",
            ContentType::FormData => "form-data",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A preset API call as stored in `apiPayloads.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestTemplate {
    pub method: String,
    pub endpoint: String,
    #[serde(default)]
    pub body: Value,
    #[serde(default)]
    pub auth_type: String,
    #[serde(default)]
    pub content_type: ContentType,
}

/// A file picked in a file input.
#[derive(Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileSelection {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// What a browser submits for a file input with nothing selected.
    pub fn empty() -> Self {
        Self::new("", "application/octet-stream", Vec::new())
    }
}

// File contents can be large; keep Debug output to the metadata.
impl fmt::Debug for FileSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSelection")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
