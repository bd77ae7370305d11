//! Porter data upload form.
//!
//! # Design
//! `UploadController` owns the view state of the upload page. `submit`
//! puts the page into its busy state and builds the request; `finish`
//! writes the outcome message and always returns the page to idle,
//! whichever branch produced the message.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::http::{HttpMethod, HttpRequest, Outcome, RequestBody};
use crate::multipart::MultipartForm;
use crate::types::FileSelection;

pub const UPLOAD_PATH: &str = "/uploadPorterData";
pub const ORDER_FIELD: &str = "order_data";
pub const DRIVER_FIELD: &str = "driver_data";

pub const SUCCESS_MESSAGE: &str = "✅ Upload Successful!";
const FAILED_PREFIX: &str = "❌ Upload Failed: ";
const EXCEPTION_PREFIX: &str = "⚠️ Error Uploading: ";
const UNKNOWN_ERROR: &str = "Unknown error";
const INVALID_JSON: &str = "Invalid JSON response from server.";

/// The two file inputs of the upload form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub order_data: Option<FileSelection>,
    pub driver_data: Option<FileSelection>,
}

impl UploadForm {
    pub fn reset(&mut self) {
        self.order_data = None;
        self.driver_data = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageColor {
    Success,
    Failure,
}

impl MessageColor {
    /// CSS colour name used by the page.
    pub fn css(&self) -> &'static str {
        match self {
            MessageColor::Success => "lightgreen",
            MessageColor::Failure => "red",
        }
    }
}

/// Everything the upload page displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub pointer_events: bool,
    pub submit_enabled: bool,
    pub loading_visible: bool,
    pub message: String,
    pub message_color: Option<MessageColor>,
}

impl Default for UploadView {
    fn default() -> Self {
        Self {
            pointer_events: true,
            submit_enabled: true,
            loading_visible: false,
            message: String::new(),
            message_color: None,
        }
    }
}

impl UploadView {
    pub fn is_busy(&self) -> bool {
        self.loading_visible
    }

    fn set_busy(&mut self) {
        self.pointer_events = false;
        self.submit_enabled = false;
        self.loading_visible = true;
        self.message.clear();
        self.message_color = None;
    }

    fn set_idle(&mut self) {
        self.pointer_events = true;
        self.submit_enabled = true;
        self.loading_visible = false;
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Default)]
pub struct UploadController {
    view: UploadView,
}

impl UploadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &UploadView {
        &self.view
    }

    /// Enter the busy state and build the upload request. A missing file is
    /// sent as an empty file part; the server decides whether to reject it.
    pub fn submit(&mut self, form: &UploadForm, server: &str) -> HttpRequest {
        self.view.set_busy();

        let mut multipart = MultipartForm::new();
        for (field, file) in [(ORDER_FIELD, &form.order_data), (DRIVER_FIELD, &form.driver_data)] {
            if file.is_none() {
                debug!(field, "no file selected");
            }
            multipart.file(field, file.clone().unwrap_or_else(FileSelection::empty));
        }

        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{UPLOAD_PATH}", server.trim_end_matches('/')),
            headers: Vec::new(),
            body: Some(RequestBody::Multipart(multipart)),
        }
    }

    /// Show the outcome of the upload and leave the busy state. The form is
    /// cleared only on a 2xx response with a JSON body.
    pub fn finish(&mut self, form: &mut UploadForm, outcome: Outcome) -> &UploadView {
        let (message, color) = match outcome {
            Ok(response) if response.is_success() => {
                match serde_json::from_str::<Value>(&response.body) {
                    Ok(_) => {
                        form.reset();
                        (SUCCESS_MESSAGE.to_string(), MessageColor::Success)
                    }
                    Err(e) => {
                        warn!(status = response.status, error = %e, "upload response is not JSON");
                        (format!("{EXCEPTION_PREFIX}{INVALID_JSON}"), MessageColor::Failure)
                    }
                }
            }
            Ok(response) => {
                let reason = serde_json::from_str::<ErrorBody>(&response.body)
                    .ok()
                    .and_then(|body| body.error)
                    .filter(|reason| !reason.is_empty())
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
                warn!(status = response.status, %reason, "upload rejected");
                (format!("{FAILED_PREFIX}{reason}"), MessageColor::Failure)
            }
            Err(err) => {
                warn!(error = %err, "upload failed");
                (format!("{EXCEPTION_PREFIX}{err}"), MessageColor::Failure)
            }
        };
        self.view.message = message;
        self.view.message_color = Some(color);
        self.view.set_idle();
        &self.view
    }
}
