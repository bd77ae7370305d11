//! Preset request templates, fetched once from the server.
//!
//! # Design
//! The registry is an ordinary value the host constructs and passes to
//! whoever needs it. It starts `Unloaded`, and becomes `Loaded` after a
//! successful `parse_load`. A failed load is logged and leaves it empty;
//! nothing is retried. A single malformed entry is logged and skipped
//! without failing the load.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::error::ApiError;
use crate::form::FormState;
use crate::http::{HttpMethod, HttpRequest, Outcome};
use crate::types::RequestTemplate;

pub const PAYLOADS_PATH: &str = "/static/apiPayloads.json";

#[derive(Debug, Clone, Default)]
enum RegistryState {
    #[default]
    Unloaded,
    Loaded(HashMap<String, RequestTemplate>),
}

#[derive(Debug, Clone, Default)]
pub struct PayloadRegistry {
    state: RegistryState,
}

impl PayloadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-filled with `templates`, for hosts that already hold them.
    pub fn from_templates(templates: HashMap<String, RequestTemplate>) -> Self {
        Self {
            state: RegistryState::Loaded(templates),
        }
    }

    pub fn build_load(server: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{PAYLOADS_PATH}", server.trim_end_matches('/')),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Consume the result of `build_load`. Returns the number of templates
    /// loaded. On error the registry is left as it was.
    pub fn parse_load(&mut self, outcome: Outcome) -> Result<usize, ApiError> {
        match load_templates(outcome) {
            Ok(templates) => {
                let count = templates.len();
                debug!(count, "api payloads loaded");
                self.state = RegistryState::Loaded(templates);
                Ok(count)
            }
            Err(err) => {
                error!(error = %err, "error loading api payloads");
                Err(err)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, RegistryState::Loaded(_))
    }

    pub fn len(&self) -> usize {
        match &self.state {
            RegistryState::Unloaded => 0,
            RegistryState::Loaded(templates) => templates.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Template keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = match &self.state {
            RegistryState::Unloaded => Vec::new(),
            RegistryState::Loaded(templates) => templates.keys().map(String::as_str).collect(),
        };
        keys.sort_unstable();
        keys
    }

    pub fn lookup(&self, key: &str) -> Option<&RequestTemplate> {
        let found = match &self.state {
            RegistryState::Unloaded => None,
            RegistryState::Loaded(templates) => templates.get(key),
        };
        if found.is_none() {
            error!(key, "api payload not found");
        }
        found
    }

    /// Copy the template for `key` into `form` and re-derive visibility.
    /// On a miss the form is not touched and `false` is returned.
    pub fn apply(&self, key: &str, form: &mut FormState) -> bool {
        let Some(template) = self.lookup(key) else {
            return false;
        };
        form.method = template.method.clone();
        form.endpoint = template.endpoint.clone();
        // Serializing a `Value` cannot fail.
        form.body = serde_json::to_string_pretty(&template.body).unwrap_or_default();
        form.auth_type = template.auth_type.clone();
        form.set_content_type(template.content_type);
        true
    }
}

fn load_templates(outcome: Outcome) -> Result<HashMap<String, RequestTemplate>, ApiError> {
    let response = outcome?;
    if !response.is_success() {
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body,
        });
    }
    let entries: Map<String, Value> = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;

    let mut templates = HashMap::with_capacity(entries.len());
    for (key, entry) in entries {
        match serde_json::from_value::<RequestTemplate>(entry) {
            Ok(template) => {
                templates.insert(key, template);
            }
            Err(err) => error!(key, error = %err, "skipping malformed api payload"),
        }
    }
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, TransportError};
    use crate::types::ContentType;

    const PAYLOADS: &str = r#"{
        "driver_login": {
            "method": "POST",
            "endpoint": "/v1/driver/login",
            "body": {"phone": "9999999999"},
            "auth_type": "none",
            "content_type": "json"
        },
        "driver_docs": {
            "method": "PUT",
            "endpoint": "/v1/driver/documents?id=1",
            "body": {},
            "auth_type": "bearer",
            "content_type": "form-data"
        }
    }"#;

    fn ok(body: &str) -> Outcome {
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn loaded() -> PayloadRegistry {
        let mut registry = PayloadRegistry::new();
        registry.parse_load(ok(PAYLOADS)).unwrap();
        registry
    }

    #[test]
    fn build_load_targets_static_payloads() {
        let req = PayloadRegistry::build_load("http://localhost:8000/");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8000/static/apiPayloads.json");
        assert!(req.body.is_none());
    }

    #[test]
    fn successful_load_transitions_to_loaded() {
        let registry = loaded();
        assert!(registry.is_loaded());
        assert_eq!(registry.keys(), ["driver_docs", "driver_login"]);
    }

    #[test]
    fn non_success_status_leaves_registry_unloaded() {
        let mut registry = PayloadRegistry::new();
        let err = registry
            .parse_load(Ok(HttpResponse {
                status: 404,
                headers: Vec::new(),
                body: "not found".to_string(),
            }))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
        assert!(!registry.is_loaded());
        assert!(registry.is_empty());
    }

    #[test]
    fn transport_failure_leaves_registry_unloaded() {
        let mut registry = PayloadRegistry::new();
        let err = registry.parse_load(Err(TransportError::new("connection refused"))).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(!registry.is_loaded());
    }

    #[test]
    fn bad_json_leaves_registry_unloaded() {
        let mut registry = PayloadRegistry::new();
        let err = registry.parse_load(ok("[1, 2]")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
        assert!(!registry.is_loaded());
    }

    #[test]
    fn malformed_entry_is_skipped() {
        let mut registry = PayloadRegistry::new();
        let count = registry
            .parse_load(ok(r#"{
                "broken": {"method": "GET", "endpoint": "/x", "content_type": "raw"},
                "no_endpoint": {"method": "GET"},
                "driver_login": {"method": "POST", "endpoint": "/v1/driver/login"}
            }"#))
            .unwrap();
        assert_eq!(count, 1);
        assert!(registry.is_loaded());
        assert_eq!(registry.keys(), ["driver_login"]);
        assert!(registry.lookup("broken").is_none());
    }

    #[test]
    fn failed_reload_keeps_previous_templates() {
        let mut registry = loaded();
        let _ = registry.parse_load(Err(TransportError::new("offline")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_miss_returns_none() {
        assert!(loaded().lookup("missing").is_none());
        assert!(PayloadRegistry::new().lookup("driver_login").is_none());
    }

    #[test]
    fn apply_json_template_populates_form_and_hides_form_data_fields() {
        let registry = loaded();
        let mut form = FormState::new("http://localhost:8000");
        form.set_content_type(ContentType::FormData);

        assert!(registry.apply("driver_login", &mut form));

        assert_eq!(form.method, "POST");
        assert_eq!(form.endpoint, "/v1/driver/login");
        assert_eq!(form.body, "{\n  \"phone\": \"9999999999\"\n}");
        assert_eq!(form.auth_type, "none");
        assert_eq!(form.content_type(), ContentType::Json);
        assert!(form.visibility().body);
        assert!(!form.visibility().form_data_fields);
    }

    #[test]
    fn apply_keeps_endpoint_verbatim() {
        let registry = loaded();
        let mut form = FormState::default();
        registry.apply("driver_docs", &mut form);
        assert_eq!(form.endpoint, "/v1/driver/documents?id=1");
        assert_eq!(form.body, "{}");
        assert!(form.visibility().form_data_fields);
    }

    #[test]
    fn apply_miss_leaves_form_untouched() {
        let registry = loaded();
        let mut form = FormState::new("http://localhost:8000");
        form.method = "DELETE".to_string();
        form.endpoint = "/keep".to_string();
        form.body = "{\"keep\":true}".to_string();

        assert!(!registry.apply("missing", &mut form));

        assert_eq!(form.method, "DELETE");
        assert_eq!(form.endpoint, "/keep");
        assert_eq!(form.body, "{\"keep\":true}");
    }
}
