//! `multipart/form-data` bodies as plain data.
//!
//! Parts keep their insertion order and field names may repeat, the same
//! way a browser `FormData` behaves. The host picks the boundary and
//! encodes the parts for the wire.

use crate::types::FileSelection;

/// Content of a single form part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File(FileSelection),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub value: PartValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<Part>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(Part {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
    }

    pub fn file(&mut self, name: impl Into<String>, file: FileSelection) {
        self.parts.push(Part {
            name: name.into(),
            value: PartValue::File(file),
        });
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// First text value stored under `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::Text(value) if part.name == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// All files stored under `name`, in insertion order.
    pub fn files(&self, name: &str) -> Vec<&FileSelection> {
        self.parts
            .iter()
            .filter(|part| part.name == name)
            .filter_map(|part| match &part.value {
                PartValue::File(file) => Some(file),
                PartValue::Text(_) => None,
            })
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|part| part.name == name)
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }
}
