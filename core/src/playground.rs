//! Request builder and response renderer for the API playground.
//!
//! # Design
//! `build_request` turns a `FormState` snapshot into an `HttpRequest`, and
//! `render_response` turns whatever the host got back into the text shown
//! in the response area. `Playground` ties the two together and numbers
//! each send, so a response that arrives after a newer send was issued is
//! dropped instead of overwriting the newer result.

use serde_json::Value;
use tracing::debug;

use crate::auth::AuthScheme;
use crate::error::ApiError;
use crate::form::FormState;
use crate::http::{HttpMethod, HttpRequest, Outcome, RequestBody};
use crate::multipart::MultipartForm;
use crate::types::ContentType;

/// Field name shared by every selected file.
pub const FILE_FIELD: &str = "file";

/// Assemble the request described by `form`.
///
/// The URL is `base_url + endpoint` with no validation. A JSON body is sent
/// exactly as typed, or omitted when the text is empty.
pub fn build_request(form: &FormState) -> Result<HttpRequest, ApiError> {
    let method: HttpMethod = form.method.parse()?;
    let mut headers = Vec::new();

    let scheme = AuthScheme::for_auth_type(&form.auth_type);
    if let Some(header) = scheme.authorization(&form.auth_token) {
        headers.push(header);
    }

    let body = match form.content_type() {
        ContentType::Json => {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
            (!form.body.is_empty()).then(|| RequestBody::Text(form.body.clone()))
        }
        ContentType::FormData => {
            let mut multipart = MultipartForm::new();
            for (name, value) in form.attributes.form_fields() {
                multipart.text(name, value);
            }
            for file in &form.files {
                multipart.file(FILE_FIELD, file.clone());
            }
            Some(RequestBody::Multipart(multipart))
        }
    };

    Ok(HttpRequest {
        method,
        url: format!("{}{}", form.base_url, form.endpoint),
        headers,
        body,
    })
}

/// Text for the response area: the body pretty-printed as JSON, or
/// `Error: <message>` if the request failed or the body is not JSON.
///
/// The status code is not inspected; an error status with a JSON body is
/// rendered like any other response.
pub fn render_response(outcome: Outcome) -> String {
    match parse_json(outcome) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_default(),
        Err(message) => format!("Error: {message}"),
    }
}

fn parse_json(outcome: Outcome) -> Result<Value, String> {
    let response = outcome.map_err(|e| e.message)?;
    serde_json::from_str(&response.body).map_err(|e| e.to_string())
}

/// Identifies one send. Only the most recently issued ticket can update the
/// response area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendTicket(u64);

#[derive(Debug, Default)]
pub struct Playground {
    generation: u64,
    response_text: String,
}

impl Playground {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn response_text(&self) -> &str {
        &self.response_text
    }

    /// Start a send. Any send still in flight becomes stale.
    ///
    /// If the form cannot be turned into a request the error is shown in
    /// the response area right away and returned.
    pub fn begin_send(&mut self, form: &FormState) -> Result<(SendTicket, HttpRequest), ApiError> {
        self.generation += 1;
        let ticket = SendTicket(self.generation);
        match build_request(form) {
            Ok(request) => {
                debug!(generation = ticket.0, method = %request.method, url = %request.url, "sending request");
                Ok((ticket, request))
            }
            Err(err) => {
                self.response_text = format!("Error: {err}");
                Err(err)
            }
        }
    }

    /// Deliver the outcome of `ticket`. Returns `false` and leaves the
    /// response area alone if a newer send has been started since.
    pub fn finish_send(&mut self, ticket: SendTicket, outcome: Outcome) -> bool {
        if ticket.0 != self.generation {
            debug!(
                generation = ticket.0,
                latest = self.generation,
                "discarding stale response"
            );
            return false;
        }
        self.response_text = render_response(outcome);
        true
    }
}
