//! Executes core `HttpRequest` values over the network with blocking reqwest.
//!
//! HTTP error statuses come back as ordinary responses so the core decides
//! what they mean; only failures to complete the exchange become
//! `TransportError`.

use std::time::Duration;

use anyhow::Context;
use playground_core::{
    HttpMethod, HttpRequest, HttpResponse, MultipartForm, Outcome, PartValue, RequestBody,
    TransportError,
};
use reqwest::blocking::{multipart, Client};
use reqwest::Method;
use tracing::debug;

#[derive(Clone)]
pub struct Transport {
    client: Client,
}

impl Transport {
    /// `timeout` bounds the whole exchange; `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }

    pub fn execute(&self, request: HttpRequest) -> Outcome {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;
        debug!(%method, %url, "executing request");

        let mut builder = self.client.request(to_method(method), &url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match body {
            None => builder,
            Some(RequestBody::Text(text)) => builder.body(text),
            Some(RequestBody::Multipart(form)) => builder.multipart(to_form(form)?),
        };

        let response = builder.send().map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
            })
            .collect();
        let body = response.text().map_err(transport_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
    }
}

/// Parts are added in form order; reqwest picks the boundary.
fn to_form(form: MultipartForm) -> Result<multipart::Form, TransportError> {
    let mut multipart = multipart::Form::new();
    for part in form.into_parts() {
        multipart = match part.value {
            PartValue::Text(value) => multipart.text(part.name, value),
            PartValue::File(file) => {
                let content = multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(transport_error)?;
                multipart.part(part.name, content)
            }
        };
    }
    Ok(multipart)
}

fn transport_error(err: reqwest::Error) -> TransportError {
    TransportError::new(err.to_string())
}
