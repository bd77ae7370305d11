//! Snapshot of the playground form and the content-type toggle.

use crate::attributes::AttributeList;
use crate::types::{ContentType, FileSelection};

/// Which body editor is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    /// Raw body text field.
    pub body: bool,
    /// Attribute editor and file input.
    pub form_data_fields: bool,
}

impl Visibility {
    pub fn for_content_type(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Json => Visibility {
                body: true,
                form_data_fields: false,
            },
            ContentType::FormData => Visibility {
                body: false,
                form_data_fields: true,
            },
        }
    }
}

/// Current values of every playground input. Read once per send.
#[derive(Debug, Clone)]
pub struct FormState {
    pub base_url: String,
    pub method: String,
    pub endpoint: String,
    pub auth_type: String,
    pub auth_token: String,
    pub body: String,
    pub attributes: AttributeList,
    pub files: Vec<FileSelection>,
    content_type: ContentType,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            method: "GET".to_string(),
            endpoint: String::new(),
            auth_type: String::new(),
            auth_token: String::new(),
            body: String::new(),
            attributes: AttributeList::new(),
            files: Vec::new(),
            content_type: ContentType::Json,
        }
    }
}

impl FormState {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Select a content type. Only visibility depends on it, so selecting
    /// the current type again changes nothing.
    pub fn set_content_type(&mut self, content_type: ContentType) -> Visibility {
        self.content_type = content_type;
        self.visibility()
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::for_content_type(self.content_type)
    }
}
