//! Core of the API playground and the porter data uploader.
//!
//! # Overview
//! Builds `HttpRequest` values from form snapshots and turns `HttpResponse`
//! values into display text without touching the network (host-does-IO
//! pattern). The host executes the round-trip and reports failures as
//! `TransportError`.
//!
//! # Design
//! - `PayloadRegistry` is constructed and loaded explicitly by the host.
//! - `FormState` is a plain snapshot; the content-type toggle only derives
//!   `Visibility`.
//! - `Playground` numbers sends so stale responses are discarded.
//! - `UploadController` always leaves its busy state in `finish`.

pub mod attributes;
pub mod auth;
pub mod error;
pub mod form;
pub mod http;
pub mod multipart;
pub mod playground;
pub mod registry;
pub mod types;
pub mod upload;

pub use attributes::{AttributeList, AttributeRow, RowId};
pub use auth::AuthScheme;
pub use error::ApiError;
pub use form::{FormState, Visibility};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Outcome, RequestBody, TransportError};
pub use multipart::{MultipartForm, Part, PartValue};
pub use playground::{build_request, render_response, Playground, SendTicket};
pub use registry::PayloadRegistry;
pub use types::{ContentType, FileSelection, RequestTemplate};
pub use upload::{MessageColor, UploadController, UploadForm, UploadView};
